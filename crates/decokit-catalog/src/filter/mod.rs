//! Faceted catalog filtering.
//!
//! [`FilterEngine`] owns the item list and the user's [`FilterState`].
//! Facet changes are pure state mutations; [`FilterEngine::apply`]
//! recomputes the matching subset, sorts it and publishes a
//! [`FilterEvent::Changed`].
//!
//! - `predicates`: per-facet matching rules
//! - `sort`: stable area ordering

pub mod predicates;
pub mod sort;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

use decokit_core::constants::{ALL_FACET, SEARCH_DEBOUNCE_MS};
use decokit_core::{
    AppEvent, CatalogItem, Debouncer, EventBus, FilterEvent, FilterState, SortMode,
};

pub use predicates::{
    matches_all, matches_color, matches_search, matches_subfacets, matches_type,
};
pub use sort::sort_items;

/// Where a sub-facet reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubFacetSource {
    /// The item's orientation attribute (or an equal keyword).
    Orientation,
    /// The child part of a `parent-child` category under the owning type.
    SubCategory,
    /// An exact keyword.
    Keyword,
}

/// A facet that only applies while its owning type is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubFacetSpec {
    pub name: String,
    pub owner_type: String,
    pub source: SubFacetSource,
}

impl SubFacetSpec {
    pub fn new(name: impl Into<String>, owner_type: impl Into<String>, source: SubFacetSource) -> Self {
        Self {
            name: name.into(),
            owner_type: owner_type.into(),
            source,
        }
    }
}

/// One facet mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum FacetChange {
    Search(String),
    Type(String),
    /// Toggles membership in the colour multi-select.
    ToggleColor(String),
    SubFacet { name: String, value: String },
    Sort(SortMode),
}

impl FacetChange {
    /// Build a change from a facet name as used by filter buttons
    /// (`search`, `type`, `color`, `sort`, or a sub-facet name).
    pub fn named(name: &str, value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        Some(match name {
            "search" => Self::Search(value),
            "type" => Self::Type(value),
            "color" | "colour" => Self::ToggleColor(value),
            "sort" => Self::Sort(parse_sort(&value)?),
            "" => return None,
            sub_facet => Self::SubFacet {
                name: sub_facet.to_string(),
                value,
            },
        })
    }
}

fn parse_sort(value: &str) -> Option<SortMode> {
    match value {
        "" | "insertion" | "default" => Some(SortMode::Insertion),
        "area_asc" | "asc" => Some(SortMode::AreaAsc),
        "area_desc" | "desc" => Some(SortMode::AreaDesc),
        _ => None,
    }
}

pub struct FilterEngine {
    items: Vec<CatalogItem>,
    state: FilterState,
    specs: Vec<SubFacetSpec>,
    filtered: Vec<CatalogItem>,
    search: Debouncer,
    pending_search: Option<String>,
    bus: Option<Arc<EventBus>>,
}

impl FilterEngine {
    /// Engine over `items` with every facet unrestricted.
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            filtered: items.clone(),
            items,
            state: FilterState::default(),
            specs: Vec::new(),
            search: Debouncer::from_millis(SEARCH_DEBOUNCE_MS),
            pending_search: None,
            bus: None,
        }
    }

    pub fn with_sub_facets(mut self, specs: Vec<SubFacetSpec>) -> Self {
        self.specs = specs;
        self
    }

    pub fn with_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search = Debouncer::new(delay);
        self
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn sub_facets(&self) -> &[SubFacetSpec] {
        &self.specs
    }

    /// Result of the last [`Self::apply`].
    pub fn filtered(&self) -> &[CatalogItem] {
        &self.filtered
    }

    pub fn count(&self) -> usize {
        self.filtered.len()
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// "12 items" when nothing is filtered out, "3 of 12 items" otherwise.
    pub fn count_label(&self) -> String {
        if self.count() == self.total() {
            format!("{} items", self.total())
        } else {
            format!("{} of {} items", self.count(), self.total())
        }
    }

    /// Mutate the filter state without recomputing.
    pub fn set_facet(&mut self, change: FacetChange) {
        tracing::debug!("Facet change: {:?}", change);
        match change {
            FacetChange::Search(text) => self.state.search = text,
            FacetChange::Type(value) => {
                self.state.type_facet = if value.is_empty() {
                    ALL_FACET.to_string()
                } else {
                    value
                }
            }
            FacetChange::ToggleColor(color) => self.state.toggle_color(&color),
            FacetChange::SubFacet { name, value } => {
                self.state.sub_facets.insert(name, value);
            }
            FacetChange::Sort(mode) => self.state.sort = mode,
        }
    }

    /// Apply a change by facet name. Unknown values are ignored.
    pub fn set_facet_named(&mut self, name: &str, value: &str) -> bool {
        match FacetChange::named(name, value) {
            Some(change) => {
                self.set_facet(change);
                true
            }
            None => {
                tracing::warn!("Ignoring facet '{}' = '{}'", name, value);
                false
            }
        }
    }

    /// Mutate and recompute in one step.
    pub fn update(&mut self, change: FacetChange) -> &[CatalogItem] {
        self.set_facet(change);
        self.apply()
    }

    /// Whether `item` passes every active facet.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        matches_all(&self.state, &self.specs, item)
    }

    /// Recompute the filtered list and publish it.
    pub fn apply(&mut self) -> &[CatalogItem] {
        let mut filtered: Vec<CatalogItem> = self
            .items
            .iter()
            .filter(|item| matches_all(&self.state, &self.specs, item))
            .cloned()
            .collect();
        sort_items(&mut filtered, self.state.sort);
        self.filtered = filtered;

        tracing::debug!("{}", self.count_label());
        self.publish();
        &self.filtered
    }

    /// Reset every facet to its sentinel and recompute.
    pub fn clear_filters(&mut self) -> &[CatalogItem] {
        self.state = FilterState::default();
        self.pending_search = None;
        self.search.cancel();
        self.apply()
    }

    /// Replace the catalog and recompute with the current facets.
    pub fn set_catalog(&mut self, items: Vec<CatalogItem>) -> &[CatalogItem] {
        tracing::info!("Catalog replaced: {} items", items.len());
        self.items = items;
        self.apply()
    }

    /// Record search input at `now`. The search is applied once typing
    /// pauses, on a later [`Self::tick`].
    pub fn search_input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending_search = Some(text.into());
        self.search.trigger(now);
    }

    /// Apply a settled search. Returns true if the filter was recomputed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.search.poll(now) {
            return false;
        }
        if let Some(text) = self.pending_search.take() {
            self.update(FacetChange::Search(text));
            return true;
        }
        false
    }

    fn publish(&self) {
        let Some(bus) = &self.bus else {
            return;
        };
        let event = FilterEvent::Changed {
            state: self.state.clone(),
            items: self.filtered.clone(),
            count: self.filtered.len(),
            total: self.items.len(),
        };
        if let Err(e) = bus.publish(AppEvent::Filter(event)) {
            tracing::trace!("Filter event dropped: {}", e);
        }
    }
}

impl std::fmt::Debug for FilterEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterEngine")
            .field("state", &self.state)
            .field("count", &self.count())
            .field("total", &self.total())
            .finish()
    }
}
