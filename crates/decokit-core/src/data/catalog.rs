//! Catalog data model
//!
//! This module provides:
//! - `CatalogItem`: a placeable decorative asset with facet metadata
//! - `Category`: one- or two-level category strings (`parent` / `parent-child`)
//! - `Background`: a canvas background record
//!
//! Catalog records are read-only to the rest of the system. The JSON shape
//! accepts both the current field names and the short names used by older
//! `items.json` exports (`image`, `type`, `tags`, `color`, `size`).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reference to an image asset (relative path or URL)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    /// Create a new image reference
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The raw reference string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the reference points to nothing
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Hierarchical category, at most two levels deep
///
/// `"비즈"` is a top-level category, `"비즈-세로펀칭"` is the child
/// `"세로펀칭"` of parent `"비즈"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub String);

impl Category {
    /// Create a new category from its raw string
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The full category string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parent part of a `parent-child` category, or the whole string
    pub fn parent(&self) -> &str {
        match self.0.split_once('-') {
            Some((parent, _)) => parent,
            None => &self.0,
        }
    }

    /// Child part of a `parent-child` category
    pub fn child(&self) -> Option<&str> {
        self.0
            .split_once('-')
            .map(|(_, child)| child)
            .filter(|child| !child.is_empty())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Orientation attribute of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Wider than tall / horizontal punching
    Horizontal,
    /// Taller than wide / vertical punching
    Vertical,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "horizontal" | "가로" => Ok(Self::Horizontal),
            "vertical" | "세로" => Ok(Self::Vertical),
            _ => Err(format!("Unknown orientation: {}", s)),
        }
    }
}

/// Physical size in millimetres; a missing dimension is zero
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizeMm {
    #[serde(default)]
    pub width_mm: f64,
    #[serde(default)]
    pub height_mm: f64,
}

impl SizeMm {
    /// Create a new physical size
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    /// Area in square millimetres
    pub fn area(&self) -> f64 {
        self.width_mm * self.height_mm
    }

    /// The longer of the two dimensions
    pub fn longer_side(&self) -> f64 {
        self.width_mm.max(self.height_mm)
    }
}

/// A selectable decorative asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable identity, when the source provides one
    #[serde(default)]
    pub id: Option<String>,
    /// Display name
    pub name: String,
    /// Lightweight preview image
    #[serde(default)]
    pub thumbnail: Option<ImageRef>,
    /// Full-resolution images that can be placed on the canvas
    #[serde(default, alias = "image", alias = "src", deserialize_with = "one_or_many")]
    pub images: Vec<ImageRef>,
    /// Category strings (`parent` or `parent-child`)
    #[serde(default, alias = "type", deserialize_with = "one_or_many")]
    pub categories: Vec<Category>,
    /// Free-text search keywords
    #[serde(default, alias = "tags")]
    pub keywords: Vec<String>,
    /// Colour tags
    #[serde(default, alias = "color", deserialize_with = "one_or_many")]
    pub colors: Vec<String>,
    /// Physical size
    #[serde(default, alias = "size")]
    pub size_mm: Option<SizeMm>,
    /// Orientation attribute
    #[serde(default, rename = "direction")]
    pub orientation: Option<Orientation>,
}

impl CatalogItem {
    /// Create a minimal catalog item
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            thumbnail: None,
            images: Vec::new(),
            categories: Vec::new(),
            keywords: Vec::new(),
            colors: Vec::new(),
            size_mm: None,
            orientation: None,
        }
    }

    /// Set the identity
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a placeable image
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.images.push(ImageRef::new(image));
        self
    }

    /// Add a category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(Category::new(category));
        self
    }

    /// Add a keyword
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Add a colour tag
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.colors.push(color.into());
        self
    }

    /// Set the physical size
    pub fn with_size_mm(mut self, width_mm: f64, height_mm: f64) -> Self {
        self.size_mm = Some(SizeMm::new(width_mm, height_mm));
        self
    }

    /// Set the orientation
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// First placeable image, if any
    pub fn primary_image(&self) -> Option<&ImageRef> {
        self.images.iter().find(|image| !image.is_empty())
    }

    /// Image to show in the catalog grid
    pub fn thumbnail_or_primary(&self) -> Option<&ImageRef> {
        self.thumbnail.as_ref().or_else(|| self.primary_image())
    }

    /// Physical area in mm², zero when unknown
    pub fn area_mm2(&self) -> f64 {
        self.size_mm.map(|s| s.area()).unwrap_or(0.0)
    }
}

/// A canvas background record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "src", alias = "url")]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Background {
    /// Create a background with an image
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            image: Some(ImageRef::new(image)),
            category: None,
        }
    }

    /// The image reference if present and non-empty
    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref().filter(|image| !image.is_empty())
    }
}

/// Accept either a single value or a list for list-valued fields
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        One(T),
        Many(Vec<T>),
        Null(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
        OneOrMany::Null(()) => Vec::new(),
    })
}
