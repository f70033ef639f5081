#![forbid(unsafe_code)]

//! Observable value cell with change notification and version tracking.
//!
//! # Design
//!
//! [`Observable<T>`] wraps a value in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). When the value changes (determined by `PartialEq`),
//! all live subscribers are notified in registration order. Equal writes
//! are swallowed, which is what keeps frame-rate animation callbacks from
//! re-running derived work when nothing actually moved.
//!
//! Renderers hold a [`Subscription`] guard; dropping it detaches the
//! callback, so an observable with no attached drawing target simply
//! notifies nobody.
//!
//! # Failure Modes
//!
//! - **Re-entrant set from a subscriber**: the mutation itself is applied
//!   after the borrow is released, but a subscriber that loops back into
//!   `set()` synchronously can still recurse. Subscriber graphs here are
//!   flat (renderer reads only), so this is a design constraint, not a
//!   guarded path.
//! - **Subscriber leak**: dead weak references are pruned lazily during
//!   notification.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct ObservableInner<T> {
    value: T,
    version: u64,
    /// Subscribers stored as weak references. Dead entries are pruned on notify.
    subscribers: Vec<CallbackWeak<T>>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` creates a new handle to the **same** inner
/// state — both handles see the same value and share subscribers.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on each value-changing mutation.
/// 2. `set(v)` where `v == current` is a no-op (no notification).
/// 3. Subscribers are notified in registration order.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable with the given initial value.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Set a new value. If it differs from the current value (by
    /// `PartialEq`), the version increments and live subscribers are
    /// notified; otherwise this is a no-op.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Subscribe to value changes. The callback receives a reference to
    /// the new value on each change.
    ///
    /// Returns a [`Subscription`] guard; dropping it unsubscribes the
    /// callback.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        let weak = Rc::downgrade(&strong);
        self.inner.borrow_mut().subscribers.push(weak);
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Current version number. Increments by 1 on each value-changing
    /// mutation. Useful for dirty-checking in render loops.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of registered subscribers (including dead ones not yet
    /// pruned).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Notify live subscribers and prune dead ones.
    fn notify(&self) {
        // Collect live callbacks first so no borrow is held during calls.
        let callbacks: Vec<CallbackRc<T>> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner
                .subscribers
                .iter()
                .filter_map(|w| w.upgrade())
                .collect()
        };

        if callbacks.is_empty() {
            return;
        }

        let value = self.inner.borrow().value.clone();
        for cb in &callbacks {
            cb(&value);
        }
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping the guard drops the strong callback reference; the weak entry
/// in the subscriber list fails to upgrade on the next notification and is
/// pruned.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn get_returns_initial_value() {
        let obs = Observable::new(42);
        assert_eq!(obs.get(), 42);
        assert_eq!(obs.version(), 0);
    }

    #[test]
    fn set_changes_value_and_bumps_version() {
        let obs = Observable::new(1);
        obs.set(2);
        assert_eq!(obs.get(), 2);
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn equal_set_is_a_no_op() {
        let obs = Observable::new(7);
        let fired = Rc::new(Cell::new(0u32));
        let fired2 = Rc::clone(&fired);
        let _sub = obs.subscribe(move |_| fired2.set(fired2.get() + 1));

        obs.set(7);
        assert_eq!(obs.version(), 0);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn subscribers_notified_in_order() {
        let obs = Observable::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));
        let l1 = Rc::clone(&log);
        let l2 = Rc::clone(&log);
        let _a = obs.subscribe(move |v| l1.borrow_mut().push(("a", *v)));
        let _b = obs.subscribe(move |v| l2.borrow_mut().push(("b", *v)));

        obs.set(5);
        assert_eq!(*log.borrow(), vec![("a", 5), ("b", 5)]);
    }

    #[test]
    fn dropped_subscription_detaches() {
        let obs = Observable::new(0);
        let fired = Rc::new(Cell::new(0u32));
        let fired2 = Rc::clone(&fired);
        let sub = obs.subscribe(move |_| fired2.set(fired2.get() + 1));

        obs.set(1);
        assert_eq!(fired.get(), 1);

        drop(sub);
        obs.set(2);
        assert_eq!(fired.get(), 1);
        // Dead entry pruned during the notify above.
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[test]
    fn clone_shares_state() {
        let a = Observable::new(1);
        let b = a.clone();
        b.set(9);
        assert_eq!(a.get(), 9);
        assert_eq!(a.version(), b.version());
    }

    #[test]
    fn with_borrows_without_cloning() {
        let obs = Observable::new(vec![1, 2, 3]);
        let len = obs.with(|v| v.len());
        assert_eq!(len, 3);
    }

    #[test]
    fn no_subscribers_is_fine() {
        let obs = Observable::new(0.0f64);
        obs.set(1.5);
        assert_eq!(obs.get(), 1.5);
    }

    #[test]
    fn debug_format() {
        let obs = Observable::new(3);
        let dbg = format!("{obs:?}");
        assert!(dbg.contains("Observable"));
        assert!(dbg.contains("version"));
    }
}
