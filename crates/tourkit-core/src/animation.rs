#![forbid(unsafe_code)]

//! Tween and easing primitives.
//!
//! A [`Tween`] produces an eased progress value (0.0–1.0) over a fixed
//! duration, advanced by explicit `tick(dt)` calls from the host frame
//! loop. [`Interpolate`] maps that progress onto domain values (scalars,
//! vectors) so the runtime can animate geometry between placements.
//!
//! # Invariants
//!
//! 1. `value()` is always in [0.0, 1.0] for the shipped easing presets.
//! 2. A zero duration is clamped to 1ns to avoid division by zero; such a
//!    tween completes on the first tick.
//! 3. `tick()` past the end saturates; `is_complete()` stays `true`.

use std::time::Duration;

/// A time-advanced animation producing a scalar value.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}

/// Shaping function applied to linear progress.
pub type EasingFn = fn(f32) -> f32;

/// Identity easing.
pub fn linear(t: f32) -> f32 {
    t
}

/// Quadratic ease-in: slow start.
pub fn ease_in(t: f32) -> f32 {
    t * t
}

/// Quadratic ease-out: slow end.
pub fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out.
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u / 2.0
    }
}

/// Progress from 0.0 to 1.0 over a duration, shaped by an easing function.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Tween {
    /// Create a tween over `duration` with linear easing.
    ///
    /// A zero duration is clamped to 1ns.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: linear,
        }
    }

    /// Set the easing function (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Linear (un-eased) progress in [0.0, 1.0].
    #[must_use]
    pub fn progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

/// Values that can be linearly interpolated by a tween's progress.
pub trait Interpolate: Clone {
    /// Interpolate between `from` and `to` at eased progress `t`.
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Interpolate for f64 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * f64::from(t)
    }
}

impl Interpolate for crate::geometry::Vec2 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            x: f64::lerp(&from.x, &to.x, t),
            y: f64::lerp(&from.y, &to.y, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_200: Duration = Duration::from_millis(200);

    #[test]
    fn tween_linear_progress() {
        let mut tw = Tween::new(MS_200);
        assert_eq!(tw.value(), 0.0);
        tw.tick(MS_100);
        assert!((tw.value() - 0.5).abs() < 0.01);
        tw.tick(MS_100);
        assert!(tw.is_complete());
        assert!((tw.value() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn tween_saturates_past_end() {
        let mut tw = Tween::new(MS_100);
        tw.tick(Duration::from_secs(10));
        assert!(tw.is_complete());
        assert!((tw.value() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_duration_clamped() {
        let mut tw = Tween::new(Duration::ZERO);
        assert!(!tw.is_complete());
        tw.tick(Duration::from_nanos(1));
        assert!(tw.is_complete());
    }

    #[test]
    fn reset_restarts() {
        let mut tw = Tween::new(MS_100);
        tw.tick(MS_100);
        assert!(tw.is_complete());
        tw.reset();
        assert!(!tw.is_complete());
        assert_eq!(tw.value(), 0.0);
    }

    #[test]
    fn ease_out_is_ahead_of_linear() {
        let mut tw = Tween::new(MS_200).easing(ease_out);
        tw.tick(MS_100);
        assert!(tw.value() > 0.5);
    }

    #[test]
    fn ease_in_is_behind_linear() {
        let mut tw = Tween::new(MS_200).easing(ease_in);
        tw.tick(MS_100);
        assert!(tw.value() < 0.5);
    }

    #[test]
    fn easing_endpoints() {
        for f in [linear as EasingFn, ease_in, ease_out, ease_in_out] {
            assert!((f(0.0) - 0.0).abs() < f32::EPSILON);
            assert!((f(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn scalar_lerp() {
        assert_eq!(f64::lerp(&10.0, &20.0, 0.5), 15.0);
        assert_eq!(f64::lerp(&10.0, &20.0, 0.0), 10.0);
        assert_eq!(f64::lerp(&10.0, &20.0, 1.0), 20.0);
    }

    #[test]
    fn vec2_lerp() {
        let a = Vec2::new(0.0, 100.0);
        let b = Vec2::new(10.0, 200.0);
        assert_eq!(Vec2::lerp(&a, &b, 0.5), Vec2::new(5.0, 150.0));
    }
}
