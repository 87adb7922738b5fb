//! Folio motion: theme switching and scroll-driven animation state on top of
//! `folio-engine`.
//!
//! Nothing here renders. Both engines expose plain data (current theme, burst
//! samples, hero transform) and the host maps it onto its own surface.
//!
//! # Quick start
//!
//! ```rust
//! use folio_engine::coords::Viewport;
//! use folio_engine::env::{FixedGeometry, MemoryStore, StaticMotion};
//! use folio_engine::events::EventRegistry;
//! use folio_engine::time::{Clock, FrameClock, ManualClock};
//! use folio_motion::prelude::*;
//!
//! let clock = ManualClock::new();
//! let registry = EventRegistry::new();
//! let config = MotionConfig::default();
//!
//! let mut themes = ThemeEngine::new(MemoryStore::new(), StaticMotion(false), clock.clone(), config.clone())
//!     .registry(registry.clone());
//!
//! let geometry = FixedGeometry::new(Viewport::new(1280.0, 800.0));
//! let mut hero = ScrollProgressEngine::new(geometry.clone(), StaticMotion(false), registry, config.scroll);
//! hero.mount();
//!
//! themes.request_theme(Theme::Spotify);
//! geometry.set_region_top(-400.0);
//! hero.on_scroll();
//!
//! let mut frames = FrameClock::new();
//! clock.advance_ms(16);
//! let ft = frames.tick(clock.now());
//! themes.tick();
//! hero.on_frame(&ft);
//!
//! assert!(themes.burst_frame().is_some());
//! assert_eq!(hero.hero_params().progress, 0.5);
//! ```

pub mod burst;
pub mod config;
pub mod easing;
pub mod particles;
pub mod reveal;
pub mod scroll;
pub mod theme;
pub mod theme_engine;

pub use theme::Theme;
pub use theme_engine::ThemeEngine;

/// The types most hosts need.
pub mod prelude {
    pub use crate::burst::{BurstFrame, ParticleSample, TintSample, TransitionBurst};
    pub use crate::config::{BurstConfig, MotionConfig, ScrollTuning, ThemeTimings};
    pub use crate::particles::{generate_particles, Particle, DEFAULT_PARTICLE_COUNT};
    pub use crate::reveal::{InViewTrigger, Reveal, RevealSample, Stagger};
    pub use crate::scroll::{leaving_progress, HeroParams, MountOutcome, ScrollProgressEngine};
    pub use crate::theme::{load_persisted_theme, Theme, ThemeMeta};
    pub use crate::theme_engine::{MenuItem, ThemeEngine, ThemeEvent, ThemeState};
}
