//! Paint model handed to the rendering collaborator.
//!
//! Scope:
//! - color representation (premultiplied alpha) and CSS color parsing
//! - paint sources (solid, radial gradient)
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::{Color, ColorParseError};
pub use gradient::{ColorStop, RadialGradient};

/// Paint source for filling a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    RadialGradient(RadialGradient),
}

impl Paint {
    #[inline]
    pub fn solid(color: Color) -> Self {
        Paint::Solid(color)
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        match self {
            Paint::Solid(c) => c.a >= 1.0,
            Paint::RadialGradient(g) => g.stops.iter().all(|s| s.color.a >= 1.0),
        }
    }
}
