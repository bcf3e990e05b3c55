//! Type aliases for shared state.
//!
//! Event handlers registered on the bus must be `Send + Sync`, so anything
//! they capture and mutate lives behind one of these.
//!
//! ```rust,ignore
//! use decokit_core::types::*;
//!
//! let seen: ThreadSafeVec<AppEvent> = thread_safe_vec();
//! let sink = seen.clone();
//! bus.subscribe(EventFilter::All, move |event| sink.lock().push(event));
//! ```

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// A mutex-protected vector, typically an event sink.
///
/// Uses `parking_lot::Mutex`, which never poisons.
pub type ThreadSafeVec<T> = Arc<Mutex<Vec<T>>>;

/// A thread-safe reader-writer hash map.
pub type ThreadSafeRwMap<K, V> = Arc<RwLock<HashMap<K, V>>>;

/// Create a new empty `ThreadSafeVec<T>`.
#[inline]
pub fn thread_safe_vec<T>() -> ThreadSafeVec<T> {
    Arc::new(Mutex::new(Vec::new()))
}

/// Create a new empty `ThreadSafeRwMap<K, V>`.
#[inline]
pub fn thread_safe_rw_map<K, V>() -> ThreadSafeRwMap<K, V> {
    Arc::new(RwLock::new(HashMap::new()))
}
