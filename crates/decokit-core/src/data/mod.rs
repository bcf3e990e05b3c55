//! Data model shared by every DecoKit crate.
//!
//! - [`catalog`]: catalog items, backgrounds and their facet attributes
//! - [`filter`]: the user's faceted filter selection
//! - [`geometry`]: canvas geometry, transforms and object handles

pub mod catalog;
pub mod filter;
pub mod geometry;

pub use catalog::{Background, CatalogItem, Category, ImageRef, Orientation, SizeMm};
pub use filter::{FilterState, SortMode};
pub use geometry::{ImageSize, ObjectHandle, Point, Transform};
