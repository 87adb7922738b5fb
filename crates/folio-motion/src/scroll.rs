use folio_engine::env::{GeometryProvider, MotionPreference};
use folio_engine::events::{EventKind, EventRegistry, Subscription};
use folio_engine::time::{FrameRequests, FrameTime};

use crate::config::ScrollTuning;

/// "Leaving" progress of a region: 0 while its top edge is at or below the
/// viewport top, 1 once it has scrolled a full viewport height past it.
///
/// A non-positive or non-finite viewport height is treated as 1 px.
pub fn leaving_progress(region_top: f32, viewport_height: f32) -> f32 {
    let vh = if viewport_height.is_finite() && viewport_height > 0.0 { viewport_height } else { 1.0 };
    let raw = (0.0 - region_top) / vh;
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 1.0)
}

/// Hero transform derived from scroll progress.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HeroParams {
    pub progress: f32,
    pub scale: f32,
    pub opacity: f32,
    /// Vertical offset in px.
    pub translate_y: f32,
    /// Blur radius in px.
    pub blur: f32,
    /// Opacity of the separate darkening layer.
    pub overlay_opacity: f32,
}

impl HeroParams {
    pub fn from_progress(progress: f32, tuning: &ScrollTuning) -> Self {
        let p = progress.clamp(0.0, 1.0);
        Self {
            progress: p,
            scale: 1.0 + p * tuning.zoom,
            opacity: 1.0 - p * tuning.fade,
            translate_y: p * tuning.lift,
            blur: p * tuning.blur,
            overlay_opacity: p * tuning.overlay,
        }
    }
}

/// Result of [`ScrollProgressEngine::mount`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MountOutcome {
    /// Listening to scroll and resize.
    Active,
    /// Reduced motion: nothing subscribed, progress stays 0.
    ReducedMotion,
    /// The tracked region is not present: nothing subscribed, progress stays 0.
    RegionMissing,
}

/// Tracks how far the hero region has scrolled out of view.
///
/// Scroll and resize events only request an animation frame; the geometry is
/// read once per presented frame in [`on_frame`](Self::on_frame), however
/// many events arrived in between.
pub struct ScrollProgressEngine {
    geometry: Box<dyn GeometryProvider>,
    motion: Box<dyn MotionPreference>,
    tuning: ScrollTuning,
    registry: EventRegistry,
    subscriptions: Vec<Subscription>,
    frames: FrameRequests,
    progress: f32,
    recomputes: u64,
}

impl ScrollProgressEngine {
    pub fn new(
        geometry: impl GeometryProvider + 'static,
        motion: impl MotionPreference + 'static,
        registry: EventRegistry,
        tuning: ScrollTuning,
    ) -> Self {
        Self {
            geometry: Box::new(geometry),
            motion: Box::new(motion),
            tuning,
            registry,
            subscriptions: Vec::new(),
            frames: FrameRequests::new(),
            progress: 0.0,
            recomputes: 0,
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn hero_params(&self) -> HeroParams {
        HeroParams::from_progress(self.progress, &self.tuning)
    }

    pub fn is_active(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Number of geometry recomputations since creation.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Subscribes to scroll and resize and computes the initial progress.
    pub fn mount(&mut self) -> MountOutcome {
        if self.is_active() {
            return MountOutcome::Active;
        }
        if self.motion.prefers_reduced_motion() {
            self.progress = 0.0;
            log::debug!("scroll progress disabled: reduced motion");
            return MountOutcome::ReducedMotion;
        }
        if self.geometry.region_rect().is_none() {
            self.progress = 0.0;
            log::debug!("scroll progress disabled: tracked region missing");
            return MountOutcome::RegionMissing;
        }

        self.subscriptions = vec![
            self.registry.subscribe(EventKind::Scroll),
            self.registry.subscribe(EventKind::Resize),
        ];
        self.recompute();
        log::info!("scroll progress mounted at {:.3}", self.progress);
        MountOutcome::Active
    }

    /// Releases subscriptions and cancels a pending frame. Progress keeps its
    /// last value.
    pub fn unmount(&mut self) {
        let cancelled = self.frames.cancel();
        if self.is_active() {
            log::debug!("scroll progress unmounted (pending frame cancelled: {cancelled})");
        }
        self.subscriptions.clear();
    }

    pub fn on_scroll(&mut self) {
        self.schedule();
    }

    pub fn on_resize(&mut self) {
        self.schedule();
    }

    fn schedule(&mut self) {
        if self.is_active() {
            self.frames.request();
        }
    }

    /// Animation-frame callback. Returns whether a recompute happened.
    pub fn on_frame(&mut self, frame: &FrameTime) -> bool {
        if self.frames.take().is_none() {
            return false;
        }
        self.recompute();
        log::debug!("frame {}: hero progress {:.3}", frame.frame_index, self.progress);
        true
    }

    /// Re-reads the motion preference after the host saw it change.
    pub fn on_motion_change(&mut self) -> MountOutcome {
        if self.motion.prefers_reduced_motion() {
            self.unmount();
            self.progress = 0.0;
            MountOutcome::ReducedMotion
        } else {
            self.mount()
        }
    }

    fn recompute(&mut self) {
        self.recomputes += 1;
        self.progress = match self.geometry.region_rect() {
            Some(rect) => leaving_progress(rect.top(), self.geometry.viewport().height),
            None => 0.0,
        };
    }
}

impl Drop for ScrollProgressEngine {
    fn drop(&mut self) {
        self.unmount();
    }
}
