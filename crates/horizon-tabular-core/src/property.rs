//! Property system for Horizon Tabular.
//!
//! This module provides values with change detection and keyed memo cells for
//! derived values. Properties are the data backbone of the signal/slot system:
//! when a property changes, its owner emits a signal to notify interested
//! parties.
//!
//! # Types
//!
//! - **Property<T>**: A value whose `set` reports whether anything changed
//! - **Memo<K, V>**: A cached derived value, recomputed only when its key changes
//!
//! # Example
//!
//! ```
//! use horizon_tabular_core::{Property, Signal};
//!
//! struct Pager {
//!     page: Property<usize>,
//!     page_changed: Signal<usize>,
//! }
//!
//! impl Pager {
//!     fn go_to(&self, page: usize) {
//!         if self.page.set(page) {
//!             self.page_changed.emit(page);
//!         }
//!     }
//! }
//!
//! let pager = Pager { page: Property::new(1), page_changed: Signal::new() };
//! pager.go_to(3);
//! assert_eq!(pager.page.get(), 3);
//! ```

use std::fmt;

use parking_lot::RwLock;

use crate::logging::targets;

/// A reactive property that tracks changes.
///
/// `Property<T>` wraps a value and provides change detection. When `set()` is
/// called, it compares the new value with the current one and returns whether
/// the value actually changed.
///
/// # Example
///
/// ```
/// use horizon_tabular_core::Property;
///
/// let prop = Property::new(42);
/// assert!(!prop.set(42));
/// assert!(prop.set(100));
/// assert_eq!(prop.get(), 100);
/// ```
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    ///
    /// This clones the value. For large types, consider using `with()` instead.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Set the value without change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// The caller should emit the associated notification signal when this
    /// returns `true`.
    pub fn set(&self, value: T) -> bool {
        self.replace(value).is_some()
    }

    /// Set the value, returning the old value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            tracing::trace!(target: targets::PROPERTY, "property changed");
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &*self.value.read())
            .finish()
    }
}

/// A keyed cache for a derived value.
///
/// `Memo<K, V>` remembers the last computed value together with the key it was
/// computed from. `get_or_compute` only runs the computation when the key
/// differs from the cached one (or after `invalidate`), so callers can ask for
/// the value on every paint without redoing the work.
///
/// The key should capture every input of the computation. Inputs that are
/// expensive to compare (a whole dataset, for instance) are better represented
/// by a generation counter that the owner bumps on replacement.
///
/// # Example
///
/// ```
/// use horizon_tabular_core::Memo;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let runs = AtomicUsize::new(0);
/// let memo = Memo::<(u32, String), usize>::new();
///
/// let compute = || {
///     runs.fetch_add(1, Ordering::SeqCst);
///     7
/// };
/// memo.get_or_compute(&(1, "a".into()), compute);
/// memo.get_or_compute(&(1, "a".into()), compute);
/// assert_eq!(runs.load(Ordering::SeqCst), 1);
///
/// memo.get_or_compute(&(2, "a".into()), compute);
/// assert_eq!(runs.load(Ordering::SeqCst), 2);
/// ```
pub struct Memo<K, V> {
    cached: RwLock<Option<(K, V)>>,
}

impl<K: Clone + PartialEq, V: Clone> Memo<K, V> {
    /// Create an empty memo cell.
    pub fn new() -> Self {
        Self {
            cached: RwLock::new(None),
        }
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    ///
    /// The computation runs without any lock held, so it may freely read other
    /// state (including other memo cells).
    pub fn get_or_compute<F>(&self, key: &K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.peek(key) {
            tracing::trace!(target: targets::PROPERTY, "memo hit");
            return value;
        }

        let value = compute();
        *self.cached.write() = Some((key.clone(), value.clone()));
        value
    }

    /// Return the cached value if it was computed for `key`.
    pub fn peek(&self, key: &K) -> Option<V> {
        match &*self.cached.read() {
            Some((cached_key, value)) if cached_key == key => Some(value.clone()),
            _ => None,
        }
    }

    /// Drop the cached value, forcing recomputation on the next access.
    pub fn invalidate(&self) {
        *self.cached.write() = None;
    }

    /// Check whether a value is currently cached.
    pub fn is_cached(&self) -> bool {
        self.cached.read().is_some()
    }
}

impl<K: Clone + PartialEq, V: Clone> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Memo<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = self.cached.read();
        f.debug_struct("Memo")
            .field("key", &cached.as_ref().map(|(key, _)| key))
            .finish_non_exhaustive()
    }
}
