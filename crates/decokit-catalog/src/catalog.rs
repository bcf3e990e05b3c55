//! Catalog documents.
//!
//! Items and backgrounds are read from JSON. A document is either a bare
//! array of records or an object holding the array under `items` /
//! `backgrounds`.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use decokit_core::{Background, CatalogError, CatalogItem};

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemsDocument {
    List(Vec<CatalogItem>),
    Wrapped { items: Vec<CatalogItem> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BackgroundsDocument {
    List(Vec<Background>),
    Wrapped { backgrounds: Vec<Background> },
}

/// Items and backgrounds available to the designer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub items: Vec<CatalogItem>,
    pub backgrounds: Vec<Background>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>, backgrounds: Vec<Background>) -> Self {
        Self { items, backgrounds }
    }

    /// Read `items.json` and `backgrounds.json` from `dir`.
    ///
    /// A missing or broken document degrades to an empty list, so the
    /// designer still starts with whatever could be read.
    pub fn load_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let items = load_items(dir.join("items.json")).unwrap_or_else(|e| {
            tracing::error!("Failed to load items: {}", e);
            Vec::new()
        });
        let backgrounds = load_backgrounds(dir.join("backgrounds.json")).unwrap_or_else(|e| {
            tracing::error!("Failed to load backgrounds: {}", e);
            Vec::new()
        });
        tracing::info!(
            "Catalog loaded: {} items, {} backgrounds",
            items.len(),
            backgrounds.len()
        );
        Self { items, backgrounds }
    }

    pub fn find_item(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id.as_deref() == Some(id))
    }

    pub fn find_background(&self, id: &str) -> Option<&Background> {
        self.backgrounds
            .iter()
            .find(|bg| bg.id.as_deref() == Some(id))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.backgrounds.is_empty()
    }
}

/// Parse an items document and reject repeated identities.
pub fn parse_items(json: &str) -> Result<Vec<CatalogItem>, CatalogError> {
    let items = match serde_json::from_str::<ItemsDocument>(json)? {
        ItemsDocument::List(items) | ItemsDocument::Wrapped { items } => items,
    };
    check_unique_ids(&items)?;
    Ok(items)
}

pub fn parse_backgrounds(json: &str) -> Result<Vec<Background>, CatalogError> {
    Ok(match serde_json::from_str::<BackgroundsDocument>(json)? {
        BackgroundsDocument::List(list) | BackgroundsDocument::Wrapped { backgrounds: list } => {
            list
        }
    })
}

pub fn load_items(path: impl AsRef<Path>) -> Result<Vec<CatalogItem>, CatalogError> {
    parse_items(&read(path.as_ref())?)
}

pub fn load_backgrounds(path: impl AsRef<Path>) -> Result<Vec<Background>, CatalogError> {
    parse_backgrounds(&read(path.as_ref())?)
}

/// Items without an identity are not checked.
pub fn check_unique_ids(items: &[CatalogItem]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in items
        .iter()
        .filter_map(|item| item.id.as_deref())
        .filter(|id| !id.is_empty())
    {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId { id: id.to_string() });
        }
    }
    Ok(())
}

fn read(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_list() {
        let json = r#"[
            {"id": "b-1", "name": "Red bead", "image": "bead.png", "type": "비즈-세로펀칭", "color": "red"},
            {"id": "s-1", "name": "Star", "images": ["star.png", "star-l.png"], "tags": ["gold"]}
        ]"#;
        let items = parse_items(json).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].categories[0].parent(), "비즈");
        assert_eq!(items[0].colors, vec!["red".to_string()]);
        assert_eq!(items[1].images.len(), 2);
        assert_eq!(items[1].keywords, vec!["gold".to_string()]);
    }

    #[test]
    fn test_parse_wrapped_document() {
        let items = parse_items(r#"{"items": [{"name": "Heart"}]}"#).unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].id.is_none());

        let backgrounds =
            parse_backgrounds(r#"{"backgrounds": [{"name": "Paper", "src": "paper.png"}]}"#)
                .unwrap();
        assert_eq!(backgrounds[0].image().map(|i| i.as_str()), Some("paper.png"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[{"id": "x", "name": "A"}, {"id": "x", "name": "B"}, {"name": "C"}]"#;
        assert!(matches!(
            parse_items(json),
            Err(CatalogError::DuplicateId { id }) if id == "x"
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse_items("{nope"), Err(CatalogError::Json(_))));
    }
}
