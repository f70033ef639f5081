#![forbid(unsafe_code)]

//! Tourkit public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.

// --- Core re-exports -------------------------------------------------------

pub use tourkit_core::animation::{
    Animation, EasingFn, Interpolate, Tween, ease_in, ease_in_out, ease_out, linear,
};
pub use tourkit_core::config::{Color, Labels, OverlayStrategy, TourConfig};
pub use tourkit_core::geometry::{Insets, Rect, Size, Vec2};
pub use tourkit_core::placement::{
    ArrowDirection, ArrowGeometry, HorizontalAnchor, MaskGeometry, Placement, PlacementOptions,
    SanitizedRect, TooltipGeometry, VerticalAnchor, compute_placement,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use tourkit_runtime::{
    Animated, MoveHandle, MoveOutcome, Observable, ScrollHost, StepRegistry, Subscription,
    TourController, TourEvent, TransitionCoordinator,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Insets, Placement, PlacementOptions, Rect, Size, TourConfig, compute_placement,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{ScrollHost, StepRegistry, TourController, TourEvent};

    pub use crate::core;
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use tourkit_core as core;
#[cfg(feature = "runtime")]
pub use tourkit_runtime as runtime;
