use std::cell::Cell;
use std::rc::Rc;

use crate::coords::{Rect, Vec2, Viewport};

/// Synchronous layout queries made inside a recompute step.
pub trait GeometryProvider {
    /// Bounding box of the tracked region relative to the viewport, or `None`
    /// when the region is not in the document.
    fn region_rect(&self) -> Option<Rect>;

    /// Current viewport size.
    fn viewport(&self) -> Viewport;
}

#[derive(Debug, Copy, Clone)]
struct Layout {
    region: Option<Rect>,
    viewport: Viewport,
}

/// Geometry driven by the host (or a test) instead of a live layout engine.
///
/// Clones share the same layout, so the driver keeps one handle and mutates it
/// while the engine queries another.
#[derive(Debug, Clone)]
pub struct FixedGeometry(Rc<Cell<Layout>>);

impl FixedGeometry {
    /// A full-viewport region resting at the top of the page.
    pub fn new(viewport: Viewport) -> Self {
        let region = Rect::new(0.0, 0.0, viewport.width, viewport.height);
        Self(Rc::new(Cell::new(Layout { region: Some(region), viewport })))
    }

    /// No tracked region present.
    pub fn without_region(viewport: Viewport) -> Self {
        Self(Rc::new(Cell::new(Layout { region: None, viewport })))
    }

    pub fn set_region(&self, region: Option<Rect>) {
        let mut layout = self.0.get();
        layout.region = region;
        self.0.set(layout);
    }

    /// Moves the region's top edge, keeping its size. Inserts a
    /// viewport-sized region if none is present.
    pub fn set_region_top(&self, top: f32) {
        let mut layout = self.0.get();
        let size = layout
            .region
            .map(|r| r.size)
            .unwrap_or(Vec2::new(layout.viewport.width, layout.viewport.height));
        layout.region = Some(Rect::new(0.0, top, size.x, size.y));
        self.0.set(layout);
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        let mut layout = self.0.get();
        layout.viewport = viewport;
        self.0.set(layout);
    }
}

impl GeometryProvider for FixedGeometry {
    fn region_rect(&self) -> Option<Rect> {
        self.0.get().region
    }

    fn viewport(&self) -> Viewport {
        self.0.get().viewport
    }
}
