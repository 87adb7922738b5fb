//! Deterministic particle field of a theme transition burst.
//!
//! The field is a pure function of `(seed, count)`: the same inputs give the
//! same particles on every call and in every process.

use std::f64::consts::TAU;

/// Default number of particles in one burst.
pub const DEFAULT_PARTICLE_COUNT: usize = 140;

/// Mulberry32 generator: 32-bit state, uniform draws in [0, 1).
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Seeds from the low 32 bits of `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed as u32 }
    }

    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        (t ^ (t >> 14)) as f64 / 4_294_967_296.0
    }
}

/// One droplet of a burst. Times are in seconds, lengths in px.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Particle {
    pub id: usize,
    /// Launch direction in radians, [0, 2π).
    pub angle: f64,
    /// Radial magnitude before jitter, [60, 580).
    pub base: f64,
    /// Travel distance, `base * [0.75, 1.65)`.
    pub distance: f64,
    /// Size, [5, 19).
    pub size: f64,
    /// Unscaled displacement, `(cos, sin) * distance`.
    pub dx: f64,
    pub dy: f64,
    /// Launch delay, [0, 0.09).
    pub delay: f64,
    /// Flight duration, [0.35, 0.7).
    pub duration: f64,
    /// Opacity at launch, [0.22, 0.77).
    pub opacity: f64,
}

impl Particle {
    /// Final offset from the burst origin once scaled by `scale`.
    pub fn displacement(&self, scale: f64) -> (f64, f64) {
        (self.dx * scale, self.dy * scale)
    }
}

/// Builds the particle field for `seed`.
///
/// Each particle consumes seven draws in a fixed order (angle, base, jitter,
/// size, delay, duration, opacity); changing that order changes every field.
pub fn generate_particles(seed: u64, count: usize) -> Vec<Particle> {
    let mut rng = Mulberry32::new(seed);
    (0..count)
        .map(|id| {
            let angle = rng.next_f64() * TAU;
            let base = 60.0 + rng.next_f64() * 520.0;
            let distance = base * (0.75 + rng.next_f64() * 0.9);
            let size = 5.0 + rng.next_f64() * 14.0;

            Particle {
                id,
                angle,
                base,
                distance,
                size,
                dx: angle.cos() * distance,
                dy: angle.sin() * distance,
                delay: rng.next_f64() * 0.09,
                duration: 0.35 + rng.next_f64() * 0.35,
                opacity: 0.22 + rng.next_f64() * 0.55,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

    // ── generator ─────────────────────────────────────────────────────────

    #[test]
    fn mulberry32_known_sequence() {
        let mut rng = Mulberry32::new(42);
        assert!(close(rng.next_f64(), 0.6011037519201636));
        assert!(close(rng.next_f64(), 0.44829055899754167));
        assert!(close(rng.next_f64(), 0.8524657934904099));
    }

    #[test]
    fn seed_uses_low_32_bits() {
        let mut a = Mulberry32::new(42);
        let mut b = Mulberry32::new((1u64 << 32) + 42);
        assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
    }

    // ── golden field ──────────────────────────────────────────────────────

    #[test]
    fn seed_42_first_particle_golden() {
        let p = generate_particles(42, DEFAULT_PARTICLE_COUNT);
        assert_eq!(p.len(), 140);
        let first = p[0];
        assert!(close(first.angle, 3.776846262155295));
        assert!(close(first.base, 293.11109067872167));
        assert!(close(first.distance, 444.7137786556896));
        assert!(close(first.size, 14.37627658015117));
        assert!(close(first.delay, 0.01573325088713318));
        assert!(close(first.duration, 0.5343073897645808));
        assert!(close(first.opacity, 0.37027539688162503));
        assert!(close(first.dx, -357.95956424237306));
        assert!(close(first.dy, -263.8850039195712));
    }

    #[test]
    fn seed_42_last_particle_golden() {
        let last = generate_particles(42, 140)[139];
        assert_eq!(last.id, 139);
        assert!(close(last.angle, 5.272079963337819));
        assert!(close(last.distance, 332.54689534121536));
        assert!(close(last.size, 17.123148961924016));
    }

    #[test]
    fn timestamp_seed_golden() {
        let p = generate_particles(1_700_000_000_000, 3);
        assert!(close(p[0].angle, 1.7153735830293668));
        assert!(close(p[0].distance, 676.8845321768282));
        assert!(close(p[0].size, 9.657185059972107));
    }

    // ── properties ────────────────────────────────────────────────────────

    #[test]
    fn same_inputs_same_output() {
        let a = generate_particles(7, 140);
        let b = generate_particles(7, 140);
        assert_eq!(a, b);
    }

    #[test]
    fn shorter_field_is_prefix_of_longer() {
        let long = generate_particles(99, 140);
        let short = generate_particles(99, 10);
        assert_eq!(&long[..10], &short[..]);
    }

    #[test]
    fn fields_stay_in_range() {
        for p in generate_particles(123_456, 500) {
            assert!((0.0..TAU).contains(&p.angle));
            assert!((60.0..580.0).contains(&p.base));
            assert!(p.distance >= p.base * 0.75 && p.distance < p.base * 1.65);
            assert!((5.0..19.0).contains(&p.size));
            assert!((0.0..0.09).contains(&p.delay));
            assert!((0.35..0.7).contains(&p.duration));
            assert!((0.22..0.77).contains(&p.opacity));
            assert!(close(p.dx.hypot(p.dy), p.distance));
        }
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(generate_particles(1, 0).is_empty());
    }

    #[test]
    fn displacement_scales_vector() {
        let p = generate_particles(42, 1)[0];
        let (x, y) = p.displacement(2.4);
        assert!(close(x, p.dx * 2.4) && close(y, p.dy * 2.4));
    }
}
