use super::Vec2;

/// Axis-aligned rectangle in logical pixels, relative to the viewport.
///
/// This is the shape of a bounding-box query: `origin.y` is the element's top
/// edge relative to the top of the viewport and goes negative once the element
/// has scrolled above it.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn top(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x * 0.5, self.origin.y + self.size.y * 0.5)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.origin.x
            && p.y >= self.origin.y
            && p.x < self.origin.x + self.size.x
            && p.y < self.origin.y + self.size.y
    }

    /// Returns the same rectangle shifted vertically, as after scrolling by `dy`.
    #[inline]
    pub fn scrolled_by(self, dy: f32) -> Self {
        Rect::new(self.origin.x, self.origin.y - dy, self.size.x, self.size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── edges ─────────────────────────────────────────────────────────────

    #[test]
    fn top_and_bottom() {
        let rect = r(0.0, -120.0, 800.0, 900.0);
        assert_eq!(rect.top(), -120.0);
        assert_eq!(rect.bottom(), 780.0);
    }

    #[test]
    fn center_of_viewport_rect() {
        assert_eq!(r(0.0, 0.0, 1280.0, 720.0).center(), Vec2::new(640.0, 360.0));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(10.0, 10.0, 5.0, 5.0).contains(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(10.0, 10.0)));
    }

    // ── scrolling ─────────────────────────────────────────────────────────

    #[test]
    fn scrolling_down_moves_top_up() {
        let rect = r(0.0, 0.0, 100.0, 100.0).scrolled_by(40.0);
        assert_eq!(rect.top(), -40.0);
        assert_eq!(rect.size, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
