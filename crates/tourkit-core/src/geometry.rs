#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All types use `f64` container-local coordinates (origin at top-left,
//! y growing downward). Measured rects arrive as floats from the host
//! layout system; the placement engine floors them to integers only at
//! its output boundary.

/// A target's bounding box in container-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width; non-negative for measured rects.
    pub width: f64,
    /// Height; non-negative for measured rects.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal center.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical center.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// A zero-width rect means the host has not finished layout yet.
    ///
    /// Callers poll measurement until this returns `false`; the placement
    /// engine must never be fed an unmeasured rect.
    #[inline]
    pub fn is_unmeasured(&self) -> bool {
        !(self.width > 0.0)
    }

    /// All four fields are finite (no NaN, no infinities).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Container dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Safe-area reserved space (status bars, notches). Non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Insets {
    /// Create insets with equal values on all sides.
    pub const fn all(val: f64) -> Self {
        Self {
            top: val,
            bottom: val,
            left: val,
            right: val,
        }
    }

    /// Create insets with vertical values only.
    pub const fn vertical(val: f64) -> Self {
        Self {
            top: val,
            bottom: val,
            left: 0.0,
            right: 0.0,
        }
    }

    /// Create insets with horizontal values only.
    pub const fn horizontal(val: f64) -> Self {
        Self {
            top: 0.0,
            bottom: 0.0,
            left: val,
            right: val,
        }
    }

    /// Create insets with specific values.
    pub const fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }
}

impl From<f64> for Insets {
    fn from(val: f64) -> Self {
        Self::all(val)
    }
}

impl From<(f64, f64)> for Insets {
    fn from((vertical, horizontal): (f64, f64)) -> Self {
        Self {
            top: vertical,
            bottom: vertical,
            left: horizontal,
            right: horizontal,
        }
    }
}

/// A 2-component vector for animatable mask position/size pairs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Origin / zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::{Insets, Rect, Vec2};

    #[test]
    fn rect_edges_and_centers() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.bottom(), 60.0);
        assert_eq!(rect.center_x(), 25.0);
        assert_eq!(rect.center_y(), 40.0);
    }

    #[test]
    fn zero_width_rect_is_unmeasured() {
        assert!(Rect::new(5.0, 5.0, 0.0, 10.0).is_unmeasured());
        assert!(!Rect::new(5.0, 5.0, 1.0, 10.0).is_unmeasured());
    }

    #[test]
    fn nan_width_rect_is_unmeasured() {
        assert!(Rect::new(0.0, 0.0, f64::NAN, 10.0).is_unmeasured());
    }

    #[test]
    fn rect_finite_check() {
        assert!(Rect::new(1.0, 2.0, 3.0, 4.0).is_finite());
        assert!(!Rect::new(f64::NAN, 2.0, 3.0, 4.0).is_finite());
        assert!(!Rect::new(1.0, f64::INFINITY, 3.0, 4.0).is_finite());
    }

    #[test]
    fn insets_constructors_and_conversions() {
        assert_eq!(Insets::all(3.0), Insets::from(3.0));
        assert_eq!(
            Insets::vertical(4.0),
            Insets {
                top: 4.0,
                bottom: 4.0,
                left: 0.0,
                right: 0.0,
            }
        );
        assert_eq!(
            Insets::from((1.0, 2.0)),
            Insets {
                top: 1.0,
                bottom: 1.0,
                left: 2.0,
                right: 2.0,
            }
        );
    }

    #[test]
    fn vec2_zero() {
        assert_eq!(Vec2::ZERO, Vec2::new(0.0, 0.0));
    }
}
