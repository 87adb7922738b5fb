//! Timing curves for sampled animations.

/// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing function with fixed
/// endpoints (0,0) and (1,1).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

/// The `easeOut` curve used by every burst and reveal animation.
pub const EASE_OUT: CubicBezier = CubicBezier::new(0.0, 0.0, 0.58, 1.0);

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample(a1: f64, a2: f64, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
    }

    fn slope_x(&self, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * self.x1 + 6.0 * inv * s * (self.x2 - self.x1) + 3.0 * s * s * (1.0 - self.x2)
    }

    /// Curve parameter whose x equals `x`.
    fn solve_s(&self, x: f64) -> f64 {
        let mut s = x;
        for _ in 0..8 {
            let err = Self::sample(self.x1, self.x2, s) - x;
            if err.abs() < 1e-7 {
                return s;
            }
            let d = self.slope_x(s);
            if d.abs() < 1e-6 {
                break;
            }
            s -= err / d;
        }

        // Newton stalled on a flat segment; bisection always converges since x(s) is monotone.
        let (mut lo, mut hi) = (0.0, 1.0);
        s = x;
        for _ in 0..64 {
            let v = Self::sample(self.x1, self.x2, s);
            if (v - x).abs() < 1e-7 {
                break;
            }
            if v < x { lo = s } else { hi = s }
            s = (lo + hi) * 0.5;
        }
        s
    }

    /// Eased value for linear progress `t`, clamped to [0, 1].
    pub fn apply(&self, t: f64) -> f64 {
        if !(t > 0.0) {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        Self::sample(self.y1, self.y2, self.solve_s(t))
    }
}

/// Linear progress of an animation that starts after `delay` and runs for
/// `duration` seconds, clamped to [0, 1].
pub fn linear_progress(elapsed: f64, delay: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return if elapsed >= delay { 1.0 } else { 0.0 };
    }
    ((elapsed - delay) / duration).clamp(0.0, 1.0)
}

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_endpoints() {
        assert_eq!(EASE_OUT.apply(0.0), 0.0);
        assert_eq!(EASE_OUT.apply(1.0), 1.0);
        assert_eq!(EASE_OUT.apply(-3.0), 0.0);
        assert_eq!(EASE_OUT.apply(f64::NAN), 0.0);
    }

    #[test]
    fn ease_out_runs_ahead_of_linear() {
        for i in 1..10 {
            let t = i as f64 / 10.0;
            assert!(EASE_OUT.apply(t) > t, "t = {t}");
        }
    }

    #[test]
    fn ease_out_is_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = EASE_OUT.apply(i as f64 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn linear_curve_is_identity() {
        let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        assert!((linear.apply(0.3) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn linear_progress_respects_delay() {
        assert_eq!(linear_progress(0.05, 0.1, 0.5), 0.0);
        assert!((linear_progress(0.35, 0.1, 0.5) - 0.5).abs() < 1e-12);
        assert_eq!(linear_progress(2.0, 0.1, 0.5), 1.0);
        assert_eq!(linear_progress(0.0, 0.0, 0.0), 1.0);
    }
}
