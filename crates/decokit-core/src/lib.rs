//! # DecoKit Core
//!
//! Core types, events, and utilities for DecoKit.
//! Provides the catalog data model, canvas geometry, the error taxonomy,
//! and the event bus that decouples document mutations from presentation.

pub mod constants;
pub mod data;
pub mod debounce;
pub mod error;
pub mod event_bus;
pub mod types;
pub mod units;

pub use data::{
    Background, CatalogItem, Category, FilterState, ImageRef, ImageSize, ObjectHandle,
    Orientation, Point, SizeMm, SortMode, Transform,
};

pub use debounce::Debouncer;

pub use error::{CatalogError, Error, Result, SceneError};

pub use event_bus::{
    AppEvent, DocumentEvent, EventBus, EventBusError, EventCategory, EventFilter,
    FilterEvent, GroupSummary, HistoryEvent, NotificationEvent, NotificationLevel, ScrollRequest,
    SelectionEvent, SubscriptionId, ViewEvent,
};

pub use types::{thread_safe_rw_map, thread_safe_vec, ThreadSafeRwMap, ThreadSafeVec};
