#![forbid(unsafe_code)]

//! Transition coordinator: animatable geometry values with supersede
//! semantics.
//!
//! The coordinator owns the four values the renderers consume: two scalars
//! (tooltip vertical anchor, badge left offset) and two vectors (mask
//! position, mask size). [`TransitionCoordinator::move_to`] retargets all
//! of them at once, either animated or instant, and hands back a
//! [`MoveHandle`] that resolves when the move settles.
//!
//! # Supersede, not cancel
//!
//! A `move_to` issued while another move is in flight first *stops* the
//! previous tweens (so stale targets cannot keep animating), then resolves
//! the previous handle with [`MoveOutcome::Superseded`]. Callers awaiting
//! a superseded move are never left pending; the outcome tells them a
//! later move won.
//!
//! # Ordering
//!
//! All values retarget within one `move_to` call, and each `tick`
//! advances them together, so no two competing tweens ever drive the same
//! value.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tourkit_core::animation::EasingFn;
use tourkit_core::geometry::Vec2;
use tourkit_core::placement::Placement;

use crate::animated::Animated;
use crate::observable::Observable;

/// How a move resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move ran to completion; values sit at its targets.
    Completed,
    /// A later move (or a reset) took over before this one settled.
    Superseded,
}

struct MoveShared {
    outcome: Option<MoveOutcome>,
    callbacks: Vec<Box<dyn FnOnce(MoveOutcome)>>,
}

/// Completion signal for one `move_to` call.
///
/// Cheap to clone; all clones observe the same resolution.
#[derive(Clone)]
pub struct MoveHandle {
    inner: Rc<RefCell<MoveShared>>,
}

impl std::fmt::Debug for MoveHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveHandle")
            .field("outcome", &self.inner.borrow().outcome)
            .finish()
    }
}

impl MoveHandle {
    fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(MoveShared {
                outcome: None,
                callbacks: Vec::new(),
            })),
        }
    }

    fn resolved(outcome: MoveOutcome) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MoveShared {
                outcome: Some(outcome),
                callbacks: Vec::new(),
            })),
        }
    }

    fn resolve(&self, outcome: MoveOutcome) {
        let callbacks = {
            let mut shared = self.inner.borrow_mut();
            if shared.outcome.is_some() {
                return;
            }
            shared.outcome = Some(outcome);
            std::mem::take(&mut shared.callbacks)
        };
        for cb in callbacks {
            cb(outcome);
        }
    }

    /// Whether the move has resolved (either way).
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.inner.borrow().outcome.is_some()
    }

    /// The resolution, if any.
    #[must_use]
    pub fn outcome(&self) -> Option<MoveOutcome> {
        self.inner.borrow().outcome
    }

    /// Run `callback` when the move resolves. Fires immediately if it
    /// already has.
    pub fn on_resolve(&self, callback: impl FnOnce(MoveOutcome) + 'static) {
        let outcome = self.inner.borrow().outcome;
        match outcome {
            Some(o) => callback(o),
            None => self.inner.borrow_mut().callbacks.push(Box::new(callback)),
        }
    }
}

/// Owns and drives the animatable geometry values.
pub struct TransitionCoordinator {
    duration: Duration,
    easing: EasingFn,
    tooltip_anchor: Animated<f64>,
    badge_left: Animated<f64>,
    mask_position: Animated<Vec2>,
    mask_size: Animated<Vec2>,
    in_flight: Option<MoveHandle>,
}

impl std::fmt::Debug for TransitionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionCoordinator")
            .field("duration", &self.duration)
            .field("animating", &self.is_animating())
            .finish()
    }
}

impl TransitionCoordinator {
    /// Create a coordinator with all values zeroed.
    #[must_use]
    pub fn new(duration: Duration, easing: EasingFn) -> Self {
        Self {
            duration,
            easing,
            tooltip_anchor: Animated::new(0.0),
            badge_left: Animated::new(0.0),
            mask_position: Animated::new(Vec2::ZERO),
            mask_size: Animated::new(Vec2::ZERO),
            in_flight: None,
        }
    }

    /// The tooltip's vertical anchor offset (top or bottom value,
    /// whichever the current placement emits).
    #[must_use]
    pub fn tooltip_anchor(&self) -> &Observable<f64> {
        self.tooltip_anchor.cell()
    }

    /// The step-number badge's left offset.
    #[must_use]
    pub fn badge_left(&self) -> &Observable<f64> {
        self.badge_left.cell()
    }

    /// The mask cutout's position vector, for the mask renderer.
    #[must_use]
    pub fn mask_position(&self) -> &Observable<Vec2> {
        self.mask_position.cell()
    }

    /// The mask cutout's size vector, for the mask renderer.
    #[must_use]
    pub fn mask_size(&self) -> &Observable<Vec2> {
        self.mask_size.cell()
    }

    /// Whether any value tween is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tooltip_anchor.is_animating()
            || self.badge_left.is_animating()
            || self.mask_position.is_animating()
            || self.mask_size.is_animating()
    }

    /// Retarget all values at the given placement.
    ///
    /// A dropped (sanitized-away) placement field leaves the corresponding
    /// value where it is — missing means "unspecified", not zero.
    pub fn move_to(&mut self, placement: &Placement, animated: bool) -> MoveHandle {
        self.supersede();

        let anchor = placement
            .tooltip
            .top
            .or(placement.tooltip.bottom)
            .map_or_else(|| self.tooltip_anchor.get(), f64::from);
        let badge = placement
            .badge_left
            .map_or_else(|| self.badge_left.get(), f64::from);
        let current_pos = self.mask_position.get();
        let position = Vec2::new(
            placement.mask.x.map_or(current_pos.x, f64::from),
            placement.mask.y.map_or(current_pos.y, f64::from),
        );
        let current_size = self.mask_size.get();
        let size = Vec2::new(
            placement.mask.width.map_or(current_size.x, f64::from),
            placement.mask.height.map_or(current_size.y, f64::from),
        );

        if animated && !self.duration.is_zero() {
            self.tooltip_anchor.animate_to(anchor, self.duration, self.easing);
            self.badge_left.animate_to(badge, self.duration, self.easing);
            self.mask_position.animate_to(position, self.duration, self.easing);
            self.mask_size.animate_to(size, self.duration, self.easing);
            let handle = MoveHandle::new();
            self.in_flight = Some(handle.clone());
            handle
        } else {
            self.tooltip_anchor.set(anchor);
            self.badge_left.set(badge);
            self.mask_position.set(position);
            self.mask_size.set(size);
            MoveHandle::resolved(MoveOutcome::Completed)
        }
    }

    /// Advance all in-flight tweens; resolves the live handle once every
    /// tween has settled.
    pub fn tick(&mut self, dt: Duration) {
        self.tooltip_anchor.tick(dt);
        self.badge_left.tick(dt);
        self.mask_position.tick(dt);
        self.mask_size.tick(dt);

        if !self.is_animating()
            && let Some(handle) = self.in_flight.take()
        {
            handle.resolve(MoveOutcome::Completed);
        }
    }

    /// Halt everything and zero all values. Any in-flight move resolves
    /// as superseded.
    pub fn reset(&mut self) {
        self.supersede();
        self.tooltip_anchor.set(0.0);
        self.badge_left.set(0.0);
        self.mask_position.set(Vec2::ZERO);
        self.mask_size.set(Vec2::ZERO);
    }

    /// Stop in-flight tweens and resolve the live handle as superseded.
    fn supersede(&mut self) {
        self.tooltip_anchor.halt();
        self.badge_left.halt();
        self.mask_position.halt();
        self.mask_size.halt();
        if let Some(prev) = self.in_flight.take() {
            tracing::trace!("move superseded before settling");
            prev.resolve(MoveOutcome::Superseded);
        }
    }
}
