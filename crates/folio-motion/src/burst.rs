use std::time::Duration;

use folio_engine::coords::Vec2;
use folio_engine::paint::{Color, Paint};

use crate::config::BurstConfig;
use crate::easing::{lerp, linear_progress, EASE_OUT};
use crate::particles::{generate_particles, Particle};
use crate::theme::Theme;

/// One in-flight theme transition effect.
///
/// The origin is captured when the transition is requested and is not
/// recomputed if the viewport changes while the burst plays.
#[derive(Debug, Clone)]
pub struct TransitionBurst {
    generation: u64,
    seed: u64,
    origin: Vec2,
    target: Theme,
    started_at: Duration,
    config: BurstConfig,
    particles: Vec<Particle>,
}

/// Tint disc state at one instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TintSample {
    pub center: Vec2,
    /// Diameter in `vmax` percent before `scale` is applied.
    pub diameter_vmax: f32,
    pub scale: f32,
    pub opacity: f32,
    pub color: Color,
}

/// One droplet's state at one instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParticleSample {
    pub id: usize,
    pub center: Vec2,
    pub diameter: f32,
    pub scale: f32,
    pub opacity: f32,
    pub blur: f32,
}

/// Everything the collaborator needs to draw a burst for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BurstFrame {
    pub tint: TintSample,
    pub particle_paint: Paint,
    pub particles: Vec<ParticleSample>,
}

impl TransitionBurst {
    pub fn new(
        generation: u64,
        seed: u64,
        origin: Vec2,
        target: Theme,
        started_at: Duration,
        config: BurstConfig,
    ) -> Self {
        Self {
            generation,
            seed,
            origin,
            target,
            started_at,
            config,
            particles: generate_particles(seed, config.particle_count),
        }
    }

    pub fn generation(&self) -> u64 { self.generation }
    pub fn seed(&self) -> u64 { self.seed }
    pub fn origin(&self) -> Vec2 { self.origin }
    pub fn target(&self) -> Theme { self.target }
    pub fn started_at(&self) -> Duration { self.started_at }
    pub fn particles(&self) -> &[Particle] { &self.particles }

    /// Accent color, derived from the target theme.
    pub fn accent(&self) -> Color {
        self.target.accent()
    }

    /// Samples the burst at clock time `now`.
    pub fn sample(&self, now: Duration) -> BurstFrame {
        let c = &self.config;
        let t = now.saturating_sub(self.started_at).as_secs_f64();

        let tint_k = EASE_OUT.apply(linear_progress(t, 0.0, c.tint_duration));
        let tint = TintSample {
            center: self.origin,
            diameter_vmax: c.tint_diameter_vmax,
            scale: lerp(c.tint_initial_scale, 1.0, tint_k) as f32,
            opacity: lerp(0.0, c.tint_opacity, tint_k) as f32,
            color: self.accent(),
        };

        let particles = self
            .particles
            .iter()
            .map(|p| {
                let k = EASE_OUT.apply(linear_progress(t, p.delay, p.duration + c.extra_duration));
                let (fx, fy) = p.displacement(c.displacement_scale);
                ParticleSample {
                    id: p.id,
                    center: self.origin + Vec2::new((fx * k) as f32, (fy * k) as f32),
                    diameter: (p.size * c.size_scale) as f32,
                    scale: lerp(c.initial_scale, 1.0, k) as f32,
                    opacity: lerp(p.opacity, 0.0, k) as f32,
                    blur: lerp(c.initial_blur, 0.0, k) as f32,
                }
            })
            .collect();

        BurstFrame { tint, particle_paint: self.target.particle_paint(), particles }
    }

    /// Whether every particle and the tint have reached their end state.
    pub fn is_settled(&self, now: Duration) -> bool {
        let t = now.saturating_sub(self.started_at).as_secs_f64();
        let c = &self.config;
        t >= c.tint_duration
            && self
                .particles
                .iter()
                .all(|p| t >= p.delay + p.duration + c.extra_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burst() -> TransitionBurst {
        TransitionBurst::new(
            1,
            42,
            Vec2::new(640.0, 360.0),
            Theme::Spotify,
            Duration::from_millis(1_000),
            BurstConfig::default(),
        )
    }

    #[test]
    fn starts_collapsed_at_origin() {
        let b = burst();
        let frame = b.sample(Duration::from_millis(1_000));
        assert_eq!(frame.tint.opacity, 0.0);
        assert!((frame.tint.scale - 0.12).abs() < 1e-6);
        for (s, p) in frame.particles.iter().zip(b.particles()) {
            assert_eq!(s.center, b.origin());
            assert!((s.scale - 0.3).abs() < 1e-6);
            assert!((s.blur - 2.0).abs() < 1e-6);
            assert!((s.opacity as f64 - p.opacity).abs() < 1e-6);
        }
    }

    #[test]
    fn ends_fully_displaced_and_transparent() {
        let b = burst();
        let end = Duration::from_millis(2_000);
        assert!(b.is_settled(end));
        let frame = b.sample(end);
        assert!((frame.tint.opacity - 0.18).abs() < 1e-6);
        assert!((frame.tint.scale - 1.0).abs() < 1e-6);
        let first = frame.particles[0];
        let p = b.particles()[0];
        assert!((first.center.x - (640.0 + (p.dx * 2.4) as f32)).abs() < 1e-2);
        assert!((first.center.y - (360.0 + (p.dy * 2.4) as f32)).abs() < 1e-2);
        assert_eq!(first.opacity, 0.0);
        assert_eq!(first.blur, 0.0);
    }

    #[test]
    fn mid_flight_is_between_endpoints() {
        let b = burst();
        let frame = b.sample(Duration::from_millis(1_300));
        assert!(!b.is_settled(Duration::from_millis(1_300)));
        assert!(frame.tint.opacity > 0.0 && frame.tint.opacity < 0.18);
        assert!(frame.particles.iter().any(|s| s.opacity > 0.0 && s.center != b.origin()));
    }

    #[test]
    fn diameter_uses_size_scale() {
        let b = burst();
        let frame = b.sample(Duration::from_millis(1_100));
        let p = b.particles()[3];
        assert!((frame.particles[3].diameter - (p.size * 1.6) as f32).abs() < 1e-4);
    }

    #[test]
    fn accent_and_paint_follow_target() {
        let b = burst();
        assert_eq!(b.accent(), Theme::Spotify.accent());
        assert_eq!(b.sample(Duration::ZERO).particle_paint, Theme::Spotify.particle_paint());
    }
}
