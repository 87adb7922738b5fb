use std::time::Duration;

/// Delays of the two theme transition callbacks, measured from the request.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ThemeTimings {
    /// When the new theme is committed, persisted and applied.
    pub commit_delay: Duration,
    /// When the burst and the transitioning flag are cleared.
    pub cleanup_delay: Duration,
}

impl Default for ThemeTimings {
    fn default() -> Self {
        Self {
            commit_delay: Duration::from_millis(170),
            cleanup_delay: Duration::from_millis(950),
        }
    }
}

impl ThemeTimings {
    pub fn commit_delay(mut self, v: Duration) -> Self { self.commit_delay = v; self }
    pub fn cleanup_delay(mut self, v: Duration) -> Self { self.cleanup_delay = v; self }
}

/// Visual constants of a transition burst. Times are in seconds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BurstConfig {
    pub particle_count: usize,
    /// Multiplier applied to each particle's displacement at the end of its flight.
    pub displacement_scale: f64,
    /// Added to each particle's own duration.
    pub extra_duration: f64,
    /// Rendered particle diameter = `size * size_scale`.
    pub size_scale: f64,
    pub initial_scale: f64,
    pub initial_blur: f64,
    pub tint_duration: f64,
    pub tint_opacity: f64,
    pub tint_initial_scale: f64,
    /// Tint disc diameter in `vmax` percent.
    pub tint_diameter_vmax: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            particle_count: 140,
            displacement_scale: 2.4,
            extra_duration: 0.2,
            size_scale: 1.6,
            initial_scale: 0.3,
            initial_blur: 2.0,
            tint_duration: 0.6,
            tint_opacity: 0.18,
            tint_initial_scale: 0.12,
            tint_diameter_vmax: 170.0,
        }
    }
}

impl BurstConfig {
    pub fn particle_count(mut self, v: usize) -> Self { self.particle_count = v; self }
    pub fn displacement_scale(mut self, v: f64) -> Self { self.displacement_scale = v; self }
}

/// Coefficients mapping scroll progress onto the hero transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScrollTuning {
    pub zoom: f32,
    pub fade: f32,
    /// Vertical offset in px at full progress (negative = upward).
    pub lift: f32,
    /// Blur radius in px at full progress.
    pub blur: f32,
    pub overlay: f32,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self { zoom: 0.22, fade: 0.85, lift: -60.0, blur: 2.0, overlay: 0.35 }
    }
}

/// Aggregate configuration for both engines.
///
/// ```rust
/// use std::time::Duration;
/// use folio_motion::config::{MotionConfig, ThemeTimings};
///
/// let config = MotionConfig::default()
///     .storage_key("site-theme")
///     .timings(ThemeTimings::default().commit_delay(Duration::from_millis(120)));
/// assert_eq!(config.timings.cleanup_delay, Duration::from_millis(950));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MotionConfig {
    /// Key of the persisted theme preference.
    pub storage_key: String,
    pub timings: ThemeTimings,
    pub burst: BurstConfig,
    pub scroll: ScrollTuning,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            timings: ThemeTimings::default(),
            burst: BurstConfig::default(),
            scroll: ScrollTuning::default(),
        }
    }
}

impl MotionConfig {
    pub fn storage_key(mut self, v: impl Into<String>) -> Self { self.storage_key = v.into(); self }
    pub fn timings(mut self, v: ThemeTimings) -> Self { self.timings = v; self }
    pub fn burst(mut self, v: BurstConfig) -> Self { self.burst = v; self }
    pub fn scroll(mut self, v: ScrollTuning) -> Self { self.scroll = v; self }
}
