//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: Shared vector and map aliases.

pub mod aliases;

pub use aliases::*;
