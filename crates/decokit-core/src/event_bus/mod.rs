//! # Event Bus Module
//!
//! Decoupled publish/subscribe between document mutations and presentation.
//!
//! ## Overview
//!
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers filter and receive events of interest
//! - Supports both sync handlers and async receivers
//!
//! The bus is an ordinary value. Construct one, wrap it in an `Arc`, and hand
//! it to every component that publishes or listens.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use decokit_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter, ViewEvent};
//!
//! let bus = Arc::new(EventBus::new());
//!
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::View]),
//!     |event| {
//!         if let AppEvent::View(ViewEvent::ZoomChanged { zoom }) = event {
//!             println!("zoom is now {zoom}");
//!         }
//!     },
//! );
//!
//! bus.publish(AppEvent::View(ViewEvent::ZoomChanged { zoom: 1.1 })).ok();
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
