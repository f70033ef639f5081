#![forbid(unsafe_code)]

//! Core: geometry, placement, and animation primitives for guided tours.
//!
//! # Role in tourkit
//! `tourkit-core` is the pure layer. It owns the coordinate types, the
//! placement engine that derives tooltip/arrow/badge/mask geometry from a
//! target rectangle, and the tween/easing primitives the runtime animates
//! with. Nothing in this crate holds mutable state or talks to a renderer.
//!
//! # Primary responsibilities
//! - **Geometry**: [`Rect`], [`Size`], [`Insets`], [`Vec2`] value types.
//! - **Placement**: [`compute_placement`] — the full tooltip/arrow/badge/mask
//!   derivation, including safe-area clamping and NaN sanitization.
//! - **Animation**: the [`Animation`](animation::Animation) trait, [`Tween`],
//!   and easing presets.
//! - **Configuration**: [`TourConfig`] statics consumed by renderers.
//!
//! # How it fits in the system
//! The runtime (`tourkit-runtime`) feeds measured target rects into
//! [`compute_placement`] and drives [`Tween`]s against the resulting
//! [`Placement`]. Renderers consume the sanitized integer geometry; any
//! field dropped during sanitization is surfaced as `None`, never as zero.

pub mod animation;
pub mod config;
pub mod geometry;
pub mod placement;

pub use animation::{Animation, EasingFn, Interpolate, Tween, ease_in, ease_in_out, ease_out, linear};
pub use config::{Color, Labels, OverlayStrategy, TourConfig};
pub use geometry::{Insets, Rect, Size, Vec2};
pub use placement::{
    ArrowDirection, ArrowGeometry, HorizontalAnchor, MaskGeometry, Placement, PlacementOptions,
    SanitizedRect, TooltipGeometry, VerticalAnchor, compute_placement,
};
