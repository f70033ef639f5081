#![forbid(unsafe_code)]

//! Static tour configuration consumed by the runtime and the renderers.

use std::time::Duration;

use crate::animation::{EasingFn, ease_in_out};

/// An RGBA color handed to the backdrop/arrow renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a color from RGBA components.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

/// How the mask renderer carves the cutout.
///
/// The rendering itself lives outside this crate; the strategy only
/// selects which geometry contract the renderer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayStrategy {
    /// Single vector path with an even-odd cutout.
    #[default]
    Path,
    /// Four opaque rectangles surrounding the cutout.
    Rects,
}

/// Display strings for the tooltip's navigation buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub finish: String,
    pub next: String,
    pub previous: String,
    pub skip: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            finish: "Finish".to_string(),
            next: "Next".to_string(),
            previous: "Previous".to_string(),
            skip: "Skip".to_string(),
        }
    }
}

/// Recognized tour options.
///
/// `status_bar_offset` is the platform status-bar compensation: when
/// non-zero it is subtracted from every measured target's `y` before
/// placement. Zero disables the compensation. An `arrow_size` of zero
/// suppresses the arrow geometry entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct TourConfig {
    /// Duration of one animated move.
    pub animation_duration: Duration,
    /// Easing applied to animated moves.
    pub easing: EasingFn,
    /// Whether step transitions animate at all.
    pub animated: bool,
    /// Gap between the target rect and the tooltip, in px.
    pub margin: f64,
    /// Arrow size in px; 0 disables the arrow.
    pub arrow_size: f64,
    /// Arrow fill color.
    pub arrow_color: Color,
    /// Backdrop (dimmed overlay) color.
    pub backdrop_color: Color,
    /// Mask cutout rendering strategy.
    pub overlay: OverlayStrategy,
    /// Platform status-bar height to compensate for; 0 disables.
    pub status_bar_offset: f64,
    /// Whether tapping the backdrop outside the cutout stops the tour.
    pub dismiss_on_backdrop_press: bool,
    /// Step-number badge radius in px.
    pub badge_radius: f64,
    /// Navigation button labels.
    pub labels: Labels,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            animation_duration: Duration::from_millis(300),
            easing: ease_in_out,
            animated: true,
            margin: 8.0,
            arrow_size: 6.0,
            arrow_color: Color::rgb(255, 255, 255),
            backdrop_color: Color::rgba(0, 0, 0, 180),
            overlay: OverlayStrategy::Path,
            status_bar_offset: 0.0,
            dismiss_on_backdrop_press: false,
            badge_radius: 14.0,
            labels: Labels::default(),
        }
    }
}

impl TourConfig {
    /// Set the animation duration (builder pattern).
    #[must_use]
    pub fn animation_duration(mut self, d: Duration) -> Self {
        self.animation_duration = d;
        self
    }

    /// Set the easing function (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Set the target-to-tooltip margin (builder pattern).
    #[must_use]
    pub fn margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the arrow size; 0 disables the arrow (builder pattern).
    #[must_use]
    pub fn arrow_size(mut self, size: f64) -> Self {
        self.arrow_size = size;
        self
    }

    /// Set the status-bar compensation offset (builder pattern).
    #[must_use]
    pub fn status_bar_offset(mut self, offset: f64) -> Self {
        self.status_bar_offset = offset;
        self
    }

    /// Enable or disable backdrop-press dismissal (builder pattern).
    #[must_use]
    pub fn dismiss_on_backdrop_press(mut self, dismiss: bool) -> Self {
        self.dismiss_on_backdrop_press = dismiss;
        self
    }

    /// Set the navigation labels (builder pattern).
    #[must_use]
    pub fn labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_labels() {
        let labels = Labels::default();
        assert_eq!(labels.finish, "Finish");
        assert_eq!(labels.next, "Next");
        assert_eq!(labels.previous, "Previous");
        assert_eq!(labels.skip, "Skip");
    }

    #[test]
    fn builder_chain() {
        let config = TourConfig::default()
            .animation_duration(Duration::from_millis(500))
            .margin(13.0)
            .arrow_size(0.0)
            .dismiss_on_backdrop_press(true);
        assert_eq!(config.animation_duration, Duration::from_millis(500));
        assert_eq!(config.margin, 13.0);
        assert_eq!(config.arrow_size, 0.0);
        assert!(config.dismiss_on_backdrop_press);
    }

    #[test]
    fn color_constructors() {
        assert_eq!(Color::rgb(1, 2, 3), Color::rgba(1, 2, 3, 255));
    }

    #[test]
    fn overlay_strategy_default_is_path() {
        assert_eq!(OverlayStrategy::default(), OverlayStrategy::Path);
    }
}
