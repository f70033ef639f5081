#![forbid(unsafe_code)]

//! Placement engine: derives tooltip, arrow, badge, and mask geometry from
//! a measured target rect.
//!
//! [`compute_placement`] is a pure function. It runs a fixed pipeline whose
//! order matters — each step feeds the next:
//!
//! 1. Status-bar compensation (subtracted from the target's `y`).
//! 2. Step-number badge horizontal position.
//! 3. Vertical side decision (tooltip above vs below the target).
//! 4. Horizontal anchor decision (pin the tooltip's left vs right edge).
//! 5. Geometry assembly with safe-area clamping.
//! 6. Sanitization: every output field floored to an integer; NaN fields
//!    dropped (`None`), never propagated.
//!
//! The tooltip's true height is unknown until its content renders once, so
//! the first call usually runs with `known_tooltip_height: None` and a
//! coarse heuristic. The caller re-invokes the engine with the same target
//! rect once the rendered height is reported, provided the active step has
//! not changed in the interim. That bookkeeping belongs to the caller; the
//! engine stays stateless.
//!
//! # Invariants
//!
//! 1. With a known tooltip height, the tooltip's vertical span lies within
//!    `[insets.top + margin, container.height - insets.bottom - margin]`
//!    (the safe-area floor wins over the upper bound when they conflict).
//! 2. Identical inputs produce identical output — no positional drift
//!    across repeated calls.
//! 3. Output integers only; a NaN input coordinate surfaces as a dropped
//!    (`None`) field, never as a number.
//! 4. Mask `x`/`y` are clamped to be non-negative.
//!
//! # Edge cases
//!
//! - A zero-width target is a caller-side gate ([`Rect::is_unmeasured`]);
//!   feeding one in is a contract violation, not a handled case.
//! - A zero-size container degrades to maximally-clamped (degenerate)
//!   geometry without erroring.

use crate::config::TourConfig;
use crate::geometry::{Insets, Rect, Size};

/// Which side of the target the tooltip sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    /// Tooltip above the target; the `bottom` offset is emitted.
    Top,
    /// Tooltip below the target; the `top` offset is emitted.
    Bottom,
}

/// Which horizontal edge of the tooltip is pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAnchor {
    /// The `left` offset is emitted; tooltip grows rightward.
    Left,
    /// The `right` offset is emitted; tooltip grows leftward.
    Right,
}

/// Sanitized tooltip style record.
///
/// Exactly one of `top`/`bottom` and one of `left`/`right` is populated
/// for finite inputs (per the anchor decisions); a NaN input additionally
/// drops the affected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipGeometry {
    pub vertical: VerticalAnchor,
    pub horizontal: HorizontalAnchor,
    pub top: Option<i32>,
    pub bottom: Option<i32>,
    pub left: Option<i32>,
    pub right: Option<i32>,
    pub max_width: Option<i32>,
}

/// Direction the arrow points, toward the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    /// Tooltip below the target; arrow on its top edge points up.
    Up,
    /// Tooltip above the target; arrow on its bottom edge points down.
    Down,
}

/// Sanitized arrow style record. Absent entirely when the configured
/// arrow size is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowGeometry {
    pub direction: ArrowDirection,
    pub top: Option<i32>,
    pub bottom: Option<i32>,
}

/// Integer-floored mask cutout rect; `x`/`y` clamped non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskGeometry {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// The target rect echoed back after status-bar adjustment and
/// sanitization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizedRect {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// Full output bundle of one engine invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub tooltip: TooltipGeometry,
    pub arrow: Option<ArrowGeometry>,
    /// Step-number badge left offset.
    pub badge_left: Option<i32>,
    pub mask: MaskGeometry,
    pub target: SanitizedRect,
}

/// Tunable inputs of one engine invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementOptions {
    /// Gap between target and tooltip, in px.
    pub margin: f64,
    /// Arrow size in px; 0 disables the arrow.
    pub arrow_size: f64,
    /// Step-number badge radius in px.
    pub badge_radius: f64,
    /// Rendered tooltip height, once known. `Some(h)` with `h <= 0` or a
    /// non-finite `h` is treated as unknown.
    pub known_tooltip_height: Option<f64>,
    /// Platform status-bar compensation; subtracted from the target's `y`.
    pub status_bar_offset: f64,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            margin: 8.0,
            arrow_size: 6.0,
            badge_radius: 14.0,
            known_tooltip_height: None,
            status_bar_offset: 0.0,
        }
    }
}

impl PlacementOptions {
    /// Derive options from a [`TourConfig`] plus the caller-tracked height.
    #[must_use]
    pub fn from_config(config: &TourConfig, known_tooltip_height: Option<f64>) -> Self {
        Self {
            margin: config.margin,
            arrow_size: config.arrow_size,
            badge_radius: config.badge_radius,
            known_tooltip_height,
            status_bar_offset: config.status_bar_offset,
        }
    }
}

/// Floor to an integer; NaN becomes a dropped field.
fn sanitize(v: f64) -> Option<i32> {
    if v.is_nan() { None } else { Some(v.floor() as i32) }
}

/// Floor to a non-negative integer; NaN becomes a dropped field.
fn sanitize_non_negative(v: f64) -> Option<i32> {
    sanitize(clamp_low(v, 0.0))
}

/// Upper clamp that lets NaN pass through (so sanitization can drop it).
/// `f64::min` would silently replace NaN with the bound instead.
fn clamp_high(v: f64, hi: f64) -> f64 {
    if v > hi { hi } else { v }
}

/// Lower clamp that lets NaN pass through.
fn clamp_low(v: f64, lo: f64) -> f64 {
    if v < lo { lo } else { v }
}

/// Compute tooltip, arrow, badge, and mask geometry for one target.
#[must_use]
pub fn compute_placement(
    target: Rect,
    container: Size,
    insets: Insets,
    opts: &PlacementOptions,
) -> Placement {
    // Step 1: status-bar compensation, before everything else.
    let target = Rect {
        y: target.y - opts.status_bar_offset,
        ..target
    };

    // A reported height only counts once it is a real, positive number.
    let known_height = opts
        .known_tooltip_height
        .filter(|h| h.is_finite() && *h > 0.0);

    // Step 2: badge horizontal position. Default hangs off the target's
    // left edge; flip to the right edge if that would go negative, then
    // keep the whole badge inside the container.
    let badge_diameter = opts.badge_radius * 2.0;
    let mut badge_left = target.x - opts.badge_radius;
    if badge_left < 0.0 {
        badge_left = target.right() - opts.badge_radius;
    }
    badge_left = clamp_high(badge_left, container.width - badge_diameter);

    // Step 3: vertical side decision.
    let space_above = target.y - insets.top - opts.margin;
    let space_below = container.height - target.bottom() - insets.bottom - opts.margin;
    let vertical = match known_height {
        Some(h) => {
            if space_below >= h {
                VerticalAnchor::Bottom
            } else if space_above >= h {
                VerticalAnchor::Top
            } else if space_below >= space_above {
                VerticalAnchor::Bottom
            } else {
                VerticalAnchor::Top
            }
        }
        // Height not yet known: coarse center-distance heuristic. The
        // imprecision is corrected on the second pass once the rendered
        // height is reported.
        None => {
            let center_y = target.center_y();
            if container.height - center_y > center_y {
                VerticalAnchor::Bottom
            } else {
                VerticalAnchor::Top
            }
        }
    };

    // Step 4: horizontal anchor — pin the edge on the side with more room.
    let center_x = target.center_x();
    let horizontal = if center_x > container.width - center_x {
        HorizontalAnchor::Right
    } else {
        HorizontalAnchor::Left
    };

    // Step 5: assembly.
    let (tooltip_top, tooltip_bottom, arrow) = match vertical {
        VerticalAnchor::Bottom => {
            let mut top = target.bottom() + opts.margin;
            if let Some(h) = known_height {
                let max_top = container.height - h - insets.bottom - opts.margin;
                // Clamp order: never exceed max_top, never go below the
                // safe-area floor (the floor wins on conflict).
                top = clamp_low(clamp_high(top, max_top), insets.top + opts.margin);
            }
            let arrow = (opts.arrow_size > 0.0).then(|| ArrowGeometry {
                direction: ArrowDirection::Up,
                top: sanitize(top - 2.0 * opts.arrow_size),
                bottom: None,
            });
            (Some(top), None, arrow)
        }
        VerticalAnchor::Top => {
            let mut bottom = container.height - (target.y - opts.margin);
            if let Some(h) = known_height {
                let max_bottom = container.height - h - insets.top - opts.margin;
                bottom = clamp_low(clamp_high(bottom, max_bottom), opts.margin + insets.bottom);
            }
            let arrow = (opts.arrow_size > 0.0).then(|| ArrowGeometry {
                direction: ArrowDirection::Down,
                top: None,
                bottom: sanitize(bottom - 2.0 * opts.arrow_size),
            });
            (None, Some(bottom), arrow)
        }
    };

    let (tooltip_left, tooltip_right, max_width) = match horizontal {
        HorizontalAnchor::Left => {
            let mut left = clamp_low(target.x, 0.0);
            if left == 0.0 {
                // Never place the tooltip flush against the edge.
                left = opts.margin;
            }
            (Some(left), None, container.width - left - opts.margin)
        }
        HorizontalAnchor::Right => {
            let mut right = clamp_low(container.width - target.right(), 0.0);
            if right == 0.0 {
                right = opts.margin;
            }
            (None, Some(right), container.width - right - opts.margin)
        }
    };

    // Step 6: sanitization at the output boundary.
    Placement {
        tooltip: TooltipGeometry {
            vertical,
            horizontal,
            top: tooltip_top.and_then(sanitize),
            bottom: tooltip_bottom.and_then(sanitize),
            left: tooltip_left.and_then(sanitize),
            right: tooltip_right.and_then(sanitize),
            max_width: sanitize(max_width),
        },
        arrow,
        badge_left: sanitize(badge_left),
        mask: MaskGeometry {
            x: sanitize_non_negative(target.x),
            y: sanitize_non_negative(target.y),
            width: sanitize(target.width),
            height: sanitize(target.height),
        },
        target: SanitizedRect {
            x: sanitize(target.x),
            y: sanitize(target.y),
            width: sanitize(target.width),
            height: sanitize(target.height),
        },
    }
}
