//! Facet predicates.
//!
//! Every predicate is total: an item either matches or is excluded. Facets
//! combine with AND; colours within the multi-select combine with OR.

use std::str::FromStr;

use decokit_core::{CatalogItem, FilterState, Orientation};

use super::{SubFacetSource, SubFacetSpec};

/// Case-insensitive substring of the name or of any keyword.
pub fn matches_search(state: &FilterState, item: &CatalogItem) -> bool {
    let needle = state.search.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.name.to_lowercase().contains(&needle)
        || item
            .keywords
            .iter()
            .any(|keyword| keyword.to_lowercase().contains(&needle))
}

/// A category matches as a whole or by its parent part.
pub fn matches_type(state: &FilterState, item: &CatalogItem) -> bool {
    if state.type_is_all() {
        return true;
    }
    let wanted = state.type_facet.as_str();
    item.categories
        .iter()
        .any(|category| category.as_str() == wanted || category.parent() == wanted)
}

pub fn matches_color(state: &FilterState, item: &CatalogItem) -> bool {
    if state.colors_are_all() {
        return true;
    }
    item.colors.iter().any(|color| {
        state
            .colors
            .iter()
            .any(|selected| selected.eq_ignore_ascii_case(color))
    })
}

/// Only sub-facets owned by the selected type restrict anything.
pub fn matches_subfacets(state: &FilterState, specs: &[SubFacetSpec], item: &CatalogItem) -> bool {
    if state.type_is_all() {
        return true;
    }
    specs
        .iter()
        .filter(|spec| spec.owner_type == state.type_facet)
        .all(|spec| match state.sub_facet(&spec.name) {
            Some(value) => matches_subfacet_value(spec, value, item),
            None => true,
        })
}

fn matches_subfacet_value(spec: &SubFacetSpec, value: &str, item: &CatalogItem) -> bool {
    match spec.source {
        SubFacetSource::Orientation => {
            let by_attribute = Orientation::from_str(value)
                .map(|wanted| item.orientation == Some(wanted))
                .unwrap_or(false);
            by_attribute || has_keyword(item, value)
        }
        SubFacetSource::SubCategory => item.categories.iter().any(|category| {
            category.parent() == spec.owner_type && category.child() == Some(value)
        }),
        SubFacetSource::Keyword => has_keyword(item, value),
    }
}

fn has_keyword(item: &CatalogItem, value: &str) -> bool {
    item.keywords
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(value))
}

/// Inclusion rule used by the engine.
pub fn matches_all(state: &FilterState, specs: &[SubFacetSpec], item: &CatalogItem) -> bool {
    matches_search(state, item)
        && matches_type(state, item)
        && matches_color(state, item)
        && matches_subfacets(state, specs, item)
}
