//! # DecoKit Catalog
//!
//! Catalog documents and the faceted filter that narrows them down before
//! items are placed.
//!
//! ```rust,ignore
//! use decokit_catalog::{Catalog, FacetChange, FilterEngine};
//!
//! let catalog = Catalog::load_dir("./public/data");
//! let mut engine = FilterEngine::new(catalog.items);
//! engine.update(FacetChange::Type("비즈".into()));
//! println!("{}", engine.count_label());
//! ```

pub mod catalog;
pub mod filter;

pub use catalog::{
    check_unique_ids, load_backgrounds, load_items, parse_backgrounds, parse_items, Catalog,
};
pub use filter::{FacetChange, FilterEngine, SubFacetSource, SubFacetSpec};
