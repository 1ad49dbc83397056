//! Percentage <-> pixel coordinate normalization
//!
//! The model stores geometry as percentages of the card; the editing surface
//! and the static renderer both draw in pixels. Both go through these
//! functions so the two never drift apart. The editor runs
//! `to_percent(to_pixels(g))` on every commit, so the pair must round-trip.

use crate::Geometry;
use serde::{Deserialize, Serialize};

/// Card width at which stored font sizes are authored
pub const REFERENCE_WIDTH: f64 = 400.0;

/// A target drawing surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    // Non-positive or non-finite sizes collapse to 1px so divisions stay total.
    fn sanitized(&self) -> (f64, f64) {
        let fix = |v: f64| if v.is_finite() && v > 0.0 { v } else { 1.0 };
        (fix(self.width), fix(self.height))
    }

    /// Scale factor applied to font sizes and other reference-width lengths
    pub fn font_scale(&self) -> f64 {
        self.sanitized().0 / REFERENCE_WIDTH
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(REFERENCE_WIDTH, 600.0)
    }
}

/// A rectangle in surface pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Check whether a point lies inside the (unrotated) rectangle
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left
            && x <= self.left + self.width
            && y >= self.top
            && y <= self.top + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Scale percentage geometry onto a `width` x `height` surface
pub fn to_pixels(geometry: &Geometry, width: f64, height: f64) -> PixelRect {
    let (w, h) = Surface::new(width, height).sanitized();
    PixelRect {
        left: geometry.x * w / 100.0,
        top: geometry.y * h / 100.0,
        width: geometry.width * w / 100.0,
        height: geometry.height * h / 100.0,
    }
}

/// Exact inverse of [`to_pixels`].
///
/// The result is not clamped; a rectangle dragged partly off the surface
/// yields values outside [0, 100]. Use [`to_percent_clamped`] before storing.
pub fn to_percent(rect: &PixelRect, width: f64, height: f64) -> Geometry {
    let (w, h) = Surface::new(width, height).sanitized();
    Geometry {
        x: rect.left * 100.0 / w,
        y: rect.top * 100.0 / h,
        width: rect.width * 100.0 / w,
        height: rect.height * 100.0 / h,
    }
}

/// Inverse transform for committing: degenerate sizes grow to `min_px` and
/// every field is clamped into [0, 100].
pub fn to_percent_clamped(rect: &PixelRect, width: f64, height: f64, min_px: f64) -> Geometry {
    let min_px = if min_px.is_finite() && min_px > 0.0 { min_px } else { 1.0 };
    let sized = PixelRect {
        width: if rect.width.is_finite() && rect.width > 0.0 { rect.width } else { min_px },
        height: if rect.height.is_finite() && rect.height > 0.0 { rect.height } else { min_px },
        ..*rect
    };
    let g = to_percent(&sized, width, height);
    Geometry::clamped(g.x, g.y, g.width, g.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-3 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_portrait_at_400_by_600() {
        let portrait = Geometry::clamped(50.0, 0.0, 50.0, 85.0);
        let rect = to_pixels(&portrait, 400.0, 600.0);
        assert_eq!(rect, PixelRect::new(200.0, 0.0, 200.0, 510.0));
    }

    #[test]
    fn test_degenerate_rect_gets_min_footprint() {
        let rect = PixelRect::new(10.0, 10.0, 0.0, -4.0);
        let g = to_percent_clamped(&rect, 400.0, 600.0, 4.0);
        assert!(approx(g.width, 1.0));
        assert!(approx(g.height, 4.0 / 6.0));
    }

    #[test]
    fn test_clamped_inverse_keeps_range() {
        let rect = PixelRect::new(-40.0, 580.0, 100.0, 100.0);
        let g = to_percent_clamped(&rect, 400.0, 600.0, 1.0);
        assert!(g.is_in_range());
        assert_eq!(g.x, 0.0);
    }

    #[test]
    fn test_zero_surface_does_not_divide_by_zero() {
        let g = to_percent(&PixelRect::new(1.0, 1.0, 1.0, 1.0), 0.0, 0.0);
        assert!(g.x.is_finite());
    }

    #[test]
    fn test_font_scale() {
        assert_eq!(Surface::new(800.0, 1200.0).font_scale(), 2.0);
        assert_eq!(Surface::default().font_scale(), 1.0);
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            x in 0.0f64..=100.0,
            y in 0.0f64..=100.0,
            width in 0.0f64..=100.0,
            height in 0.0f64..=100.0,
            surface_w in 1.0f64..5000.0,
            surface_h in 1.0f64..5000.0,
        ) {
            let g = Geometry { x, y, width, height };
            let back = to_percent(&to_pixels(&g, surface_w, surface_h), surface_w, surface_h);
            prop_assert!(approx(back.x, g.x));
            prop_assert!(approx(back.y, g.y));
            prop_assert!(approx(back.width, g.width));
            prop_assert!(approx(back.height, g.height));
        }
    }
}
