#![forbid(unsafe_code)]

//! Animated value: an observable cell driven by an optional tween.
//!
//! [`Animated<T>`] pairs an [`Observable`] with at most one in-flight
//! tween. `animate_to` captures the current value as the start point and
//! interpolates toward the target on each `tick`. Starting a new tween (or
//! calling `halt`) stops the previous one at its current value — a stale
//! target can never keep pulling the cell after being superseded.

use std::time::Duration;

use tourkit_core::animation::{Animation, EasingFn, Interpolate, Tween};

use crate::observable::Observable;

struct ActiveTween<T> {
    from: T,
    to: T,
    tween: Tween,
}

/// An observable cell whose value can be tweened over time.
pub struct Animated<T> {
    cell: Observable<T>,
    active: Option<ActiveTween<T>>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Animated<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animated")
            .field("cell", &self.cell)
            .field("animating", &self.active.is_some())
            .finish()
    }
}

impl<T: Interpolate + PartialEq + 'static> Animated<T> {
    /// Create a new animated cell with the given initial value.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            cell: Observable::new(value),
            active: None,
        }
    }

    /// The underlying observable, for renderer subscriptions.
    #[must_use]
    pub fn cell(&self) -> &Observable<T> {
        &self.cell
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.cell.get()
    }

    /// Halt any in-flight tween and set the value immediately.
    pub fn set(&mut self, value: T) {
        self.active = None;
        self.cell.set(value);
    }

    /// Halt any in-flight tween, freezing the cell at its current value.
    pub fn halt(&mut self) {
        self.active = None;
    }

    /// Tween from the current value to `target` over `duration`.
    ///
    /// Any previous tween is stopped first; its remaining motion is
    /// discarded.
    pub fn animate_to(&mut self, target: T, duration: Duration, easing: EasingFn) {
        self.active = Some(ActiveTween {
            from: self.get(),
            to: target,
            tween: Tween::new(duration).easing(easing),
        });
    }

    /// Whether a tween is currently in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Advance the in-flight tween, publishing the interpolated value.
    ///
    /// Returns `true` if a tween finished during this tick.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(active) = &mut self.active else {
            return false;
        };
        active.tween.tick(dt);
        let value = T::lerp(&active.from, &active.to, active.tween.value());
        let finished = active.tween.is_complete();
        let final_value = if finished {
            // Land exactly on the target, independent of easing shape.
            active.to.clone()
        } else {
            value
        };
        if finished {
            self.active = None;
        }
        self.cell.set(final_value);
        finished
    }
}
