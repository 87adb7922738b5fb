use super::Color;

/// A single gradient stop. `t` is in [0, 1].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Circular gradient centred on the filled shape, `t = 0` at the center and
/// `t = 1` at the farthest edge.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(stops: Vec<ColorStop>) -> Self {
        Self { stops }
    }

    /// Structurally usable: at least two finite stops in ascending order.
    pub fn is_valid(&self) -> bool {
        self.stops.len() >= 2
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.stops.windows(2).all(|w| w[0].t <= w[1].t)
    }
}
