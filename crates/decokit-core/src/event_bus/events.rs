//! Event type definitions for the event bus.
//!
//! Mutations publish typed events here; presentation subscribes and
//! re-renders on its own. Events are cloneable and serializable so they can
//! be logged or replayed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::{CatalogItem, FilterState, ImageRef, ObjectHandle};

/// Root event enum for all application events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Scene document changes
    Document(DocumentEvent),
    /// Undo/redo availability
    History(HistoryEvent),
    /// Summary list highlighting
    Selection(SelectionEvent),
    /// Catalog filter results
    Filter(FilterEvent),
    /// View-only changes (zoom, layout)
    View(ViewEvent),
    /// Transient user notifications
    Notification(NotificationEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Document(_) => EventCategory::Document,
            AppEvent::History(_) => EventCategory::History,
            AppEvent::Selection(_) => EventCategory::Selection,
            AppEvent::Filter(_) => EventCategory::Filter,
            AppEvent::View(_) => EventCategory::View,
            AppEvent::Notification(_) => EventCategory::Notification,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Document(e) => e.description(),
            AppEvent::History(e) => e.description(),
            AppEvent::Selection(e) => e.description(),
            AppEvent::Filter(e) => e.description(),
            AppEvent::View(e) => e.description(),
            AppEvent::Notification(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Scene document events.
    Document,
    /// History events.
    History,
    /// Summary selection events.
    Selection,
    /// Catalog filter events.
    Filter,
    /// View events.
    View,
    /// User notifications.
    Notification,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Document => write!(f, "Document"),
            EventCategory::History => write!(f, "History"),
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::Filter => write!(f, "Filter"),
            EventCategory::View => write!(f, "View"),
            EventCategory::Notification => write!(f, "Notification"),
        }
    }
}

/// One row of the quantity summary list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Position of the group in first-seen order
    pub index: usize,
    /// Display name of the representative
    pub name: String,
    /// Image of the representative
    pub image: ImageRef,
    /// Catalog identity, when known
    pub catalog_id: Option<String>,
    /// Size/image variant label chosen at placement
    pub variant: Option<String>,
    /// Number of members
    pub quantity: usize,
    /// Member handles in draw order
    pub members: Vec<ObjectHandle>,
}

/// Scene document events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocumentEvent {
    /// The document was mutated outside of replay.
    StateChanged {
        /// Monotonic mutation counter.
        revision: u64,
        /// Number of placed items after the change.
        item_count: usize,
    },
    /// The empty-document placeholder should be shown or hidden.
    PlaceholderVisibility {
        /// Whether the placeholder is visible.
        visible: bool,
    },
    /// The background was replaced or removed.
    BackgroundChanged {
        /// The new background image, `None` when cleared.
        image: Option<ImageRef>,
    },
    /// The quantity summary was regenerated.
    SummaryUpdated {
        /// Groups in first-seen order.
        groups: Vec<GroupSummary>,
    },
}

impl DocumentEvent {
    fn description(&self) -> String {
        match self {
            DocumentEvent::StateChanged {
                revision,
                item_count,
            } => format!("Document r{} ({} items)", revision, item_count),
            DocumentEvent::PlaceholderVisibility { visible } => {
                format!(
                    "Placeholder {}",
                    if *visible { "shown" } else { "hidden" }
                )
            }
            DocumentEvent::BackgroundChanged { image } => match image {
                Some(image) => format!("Background set to {}", image),
                None => "Background cleared".to_string(),
            },
            DocumentEvent::SummaryUpdated { groups } => {
                format!("Summary updated: {} groups", groups.len())
            }
        }
    }
}

/// Undo/redo state events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HistoryEvent {
    /// History length or cursor moved.
    Changed {
        /// Whether undo is available.
        can_undo: bool,
        /// Whether redo is available.
        can_redo: bool,
        /// Number of stored snapshots.
        len: usize,
        /// Cursor position, -1 when empty.
        cursor: isize,
    },
}

impl HistoryEvent {
    fn description(&self) -> String {
        match self {
            HistoryEvent::Changed { len, cursor, .. } => {
                format!("History {}/{}", cursor + 1, len)
            }
        }
    }
}

/// How the summary list should bring a row into view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollRequest {
    /// Scroll so the row sits in the vertical centre of its container.
    CenterVertically,
}

/// Summary list selection events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// A group became the single active row.
    GroupActivated {
        /// Index of the group in first-seen order.
        group_index: usize,
        /// The surface object that triggered the activation.
        handle: ObjectHandle,
        /// Scroll behaviour for the row.
        scroll: ScrollRequest,
    },
    /// No row is active.
    Cleared,
}

impl SelectionEvent {
    fn description(&self) -> String {
        match self {
            SelectionEvent::GroupActivated {
                group_index,
                handle,
                ..
            } => format!("Group {} activated by {}", group_index, handle),
            SelectionEvent::Cleared => "Selection cleared".to_string(),
        }
    }
}

/// Catalog filter events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterEvent {
    /// Facets were applied to the catalog.
    Changed {
        /// Facet values that produced this result.
        state: FilterState,
        /// Matching items in display order.
        items: Vec<CatalogItem>,
        /// Number of matching items.
        count: usize,
        /// Size of the unfiltered catalog.
        total: usize,
    },
}

impl FilterEvent {
    fn description(&self) -> String {
        match self {
            FilterEvent::Changed { count, total, .. } => {
                format!("Filter matched {} of {} items", count, total)
            }
        }
    }
}

/// View-only events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewEvent {
    /// The visual zoom factor changed.
    ZoomChanged {
        /// New zoom factor.
        zoom: f64,
    },
    /// The surface recomputed its screen offset after a resize burst.
    SurfaceOffsetRecalculated,
}

impl ViewEvent {
    fn description(&self) -> String {
        match self {
            ViewEvent::ZoomChanged { zoom } => format!("Zoom: {:.0}%", zoom * 100.0),
            ViewEvent::SurfaceOffsetRecalculated => "Surface offset recalculated".to_string(),
        }
    }
}

/// Severity of a user notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    /// Informational.
    Info,
    /// Something was adjusted on the user's behalf.
    Warning,
    /// An operation failed and was rolled back.
    Error,
}

/// Transient message for the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Severity.
    pub level: NotificationLevel,
    /// Human readable message.
    pub message: String,
    /// When the notification was raised.
    pub timestamp: DateTime<Utc>,
}

impl NotificationEvent {
    /// Create a notification stamped with the current time
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Shorthand for an error notification
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    fn description(&self) -> String {
        format!("{:?}: {}", self.level, self.message)
    }
}
