//! Viewport size and pixel to NDC conversion.

use glam::Vec2;

/// Viewport dimensions in pixels, used to normalize pointer positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Viewport of the given pixel size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    /// Whether either dimension is zero (minimized window, hidden canvas).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Width over height, or 1 when degenerate.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.is_degenerate() {
            1.0
        } else {
            self.width / self.height
        }
    }

    /// Normalized device coordinates of a pixel position: x in [-1, 1]
    /// left to right, y in [-1, 1] bottom to top.
    ///
    /// Returns `None` for a degenerate viewport.
    #[must_use]
    pub fn to_ndc(&self, x: f32, y: f32) -> Option<Vec2> {
        if self.is_degenerate() {
            return None;
        }
        Some(Vec2::new(
            (x / self.width) * 2.0 - 1.0,
            1.0 - (y / self.height) * 2.0,
        ))
    }

    /// Pixel position of an NDC point (inverse of [`Self::to_ndc`]).
    #[must_use]
    pub fn from_ndc(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_centre_map_to_ndc() {
        let vp = Viewport::new(800, 600);
        assert_eq!(vp.to_ndc(400.0, 300.0), Some(Vec2::ZERO));
        assert_eq!(vp.to_ndc(0.0, 0.0), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(vp.to_ndc(800.0, 600.0), Some(Vec2::new(1.0, -1.0)));
    }

    #[test]
    fn ndc_round_trips_to_pixels() {
        let vp = Viewport::new(1024, 768);
        let ndc = vp.to_ndc(100.0, 700.0).unwrap();
        let px = vp.from_ndc(ndc);
        assert!((px - Vec2::new(100.0, 700.0)).length() < 1e-3);
    }

    #[test]
    fn degenerate_viewport_has_no_ndc() {
        let vp = Viewport::new(0, 600);
        assert!(vp.to_ndc(0.0, 0.0).is_none());
        assert_eq!(vp.aspect(), 1.0);
    }
}
