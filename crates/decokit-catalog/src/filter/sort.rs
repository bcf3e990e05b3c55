//! Result ordering.

use decokit_core::{CatalogItem, SortMode};

/// Stable sort by physical area; a missing dimension counts as zero.
/// Equal areas keep catalog order.
pub fn sort_items(items: &mut [CatalogItem], mode: SortMode) {
    match mode {
        SortMode::Insertion => {}
        SortMode::AreaAsc => items.sort_by(|a, b| a.area_mm2().total_cmp(&b.area_mm2())),
        SortMode::AreaDesc => items.sort_by(|a, b| b.area_mm2().total_cmp(&a.area_mm2())),
    }
}
