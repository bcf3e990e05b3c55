//! Faceted filter state
//!
//! `FilterState` is plain data: the facet values the user has chosen. The
//! matching rules live with the engine in `decokit-catalog`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::constants::ALL_FACET;

/// Result ordering of the filtered catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Catalog order
    #[default]
    Insertion,
    /// Smallest physical area first
    AreaAsc,
    /// Largest physical area first
    AreaDesc,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insertion => write!(f, "insertion"),
            Self::AreaAsc => write!(f, "area_asc"),
            Self::AreaDesc => write!(f, "area_desc"),
        }
    }
}

/// Currently selected facet values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Free-text search; empty matches everything
    pub search: String,
    /// Selected type, `"all"` when unrestricted
    pub type_facet: String,
    /// Selected colours; empty or containing `"all"` is unrestricted
    pub colors: BTreeSet<String>,
    /// Sub-facet name to selected value
    pub sub_facets: BTreeMap<String, String>,
    /// Result ordering
    pub sort: SortMode,
}

impl FilterState {
    /// Whether the type facet restricts anything
    pub fn type_is_all(&self) -> bool {
        self.type_facet.is_empty() || self.type_facet == ALL_FACET
    }

    /// Whether the colour facet restricts anything
    pub fn colors_are_all(&self) -> bool {
        self.colors.is_empty() || self.colors.contains(ALL_FACET)
    }

    /// Selected value of a sub-facet, `None` when unset or `"all"`
    pub fn sub_facet(&self, name: &str) -> Option<&str> {
        self.sub_facets
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty() && *value != ALL_FACET)
    }

    /// Toggle one colour in the multi-select
    ///
    /// Toggling `"all"` resets the set. Selecting a concrete colour drops the
    /// `"all"` sentinel; removing the last concrete colour restores it.
    pub fn toggle_color(&mut self, color: &str) {
        if color == ALL_FACET {
            self.colors = BTreeSet::from([ALL_FACET.to_string()]);
            return;
        }

        self.colors.remove(ALL_FACET);
        if !self.colors.remove(color) {
            self.colors.insert(color.to_string());
        }
        if self.colors.is_empty() {
            self.colors.insert(ALL_FACET.to_string());
        }
    }

    /// True when no facet restricts the catalog
    pub fn is_unrestricted(&self) -> bool {
        self.search.is_empty()
            && self.type_is_all()
            && self.colors_are_all()
            && self.sub_facets.keys().all(|name| self.sub_facet(name).is_none())
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            type_facet: ALL_FACET.to_string(),
            colors: BTreeSet::from([ALL_FACET.to_string()]),
            sub_facets: BTreeMap::new(),
            sort: SortMode::Insertion,
        }
    }
}
