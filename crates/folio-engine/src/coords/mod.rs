//! Coordinate and geometry types shared by the engines and their host.
//!
//! Canonical space:
//! - Logical CSS pixels
//! - Origin top-left of the viewport
//! - +X right, +Y down

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
