//! Error handling for DecoKit
//!
//! Provides error types for the two layers that can fail:
//! - Scene errors (image loading, background data, stale handles)
//! - Catalog errors (reading and decoding catalog documents)
//!
//! Filtering, sorting and history navigation are total and never produce
//! errors. All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::data::ObjectHandle;

/// Scene document error type
///
/// Every variant is raised before the document is mutated, so the document
/// is always left in its prior valid state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The image could not be fetched or decoded
    #[error("Failed to load image '{image}': {reason}")]
    ImageLoad {
        /// The image reference that failed.
        image: String,
        /// Why the load failed.
        reason: String,
    },

    /// Background record has no usable image reference
    #[error("Invalid background data: {reason}")]
    InvalidBackgroundData {
        /// What is wrong with the background record.
        reason: String,
    },

    /// The handle is not (or no longer) on the surface
    #[error("Unknown object handle {handle}")]
    UnknownHandle {
        /// The stale handle.
        handle: ObjectHandle,
    },

    /// An operation that needs an active item was invoked without one
    #[error("No item is selected")]
    NothingSelected,
}

impl SceneError {
    /// Shorthand for an image load failure.
    pub fn image_load(image: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ImageLoad {
            image: image.into(),
            reason: reason.into(),
        }
    }
}

/// Catalog error type
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Reading the catalog document failed
    #[error("Failed to read catalog '{path}': {source}")]
    Io {
        /// Path of the catalog document.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog document is not valid JSON for the expected shape
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two catalog records share the same identity
    #[error("Duplicate catalog id: {id}")]
    DuplicateId {
        /// The repeated identity.
        id: String,
    },
}

/// Main error type for DecoKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Scene document error
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an image load failure
    pub fn is_image_load(&self) -> bool {
        matches!(self, Error::Scene(SceneError::ImageLoad { .. }))
    }

    /// Check if this is a scene error
    pub fn is_scene_error(&self) -> bool {
        matches!(self, Error::Scene(_))
    }

    /// Check if this is a catalog error
    pub fn is_catalog_error(&self) -> bool {
        matches!(self, Error::Catalog(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
