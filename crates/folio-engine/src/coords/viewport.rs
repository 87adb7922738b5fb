use super::Vec2;

/// Viewport size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Center point; the origin of theme transition bursts.
    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Converts a `vmax` length (percent of the larger side) to pixels.
    #[inline]
    pub fn vmax(self, percent: f32) -> f32 {
        self.width.max(self.height) * percent / 100.0
    }
}
