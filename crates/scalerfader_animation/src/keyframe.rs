// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframes and easing curves.

use serde::{Deserialize, Serialize};

/// Easing curve applied to the linear progress of an animation.
///
/// The curve maps the fraction of the duration that has elapsed to the
/// fraction used to sample keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Interpolator {
    /// Constant rate of change
    #[default]
    Linear,
    /// Starts slowly and speeds up
    Accelerate {
        /// Curve exponent factor, `1.0` is a parabola
        factor: f32,
    },
    /// Starts quickly and slows down
    Decelerate {
        /// Curve exponent factor, `1.0` is an inverted parabola
        factor: f32,
    },
    /// Slow start and end, quick through the middle
    AccelerateDecelerate,
    /// CSS-style cubic bezier with fixed end points (0,0) and (1,1)
    CubicBezier {
        /// First control point x, must lie in [0, 1]
        x1: f32,
        /// First control point y
        y1: f32,
        /// Second control point x, must lie in [0, 1]
        x2: f32,
        /// Second control point y
        y2: f32,
    },
}

impl Interpolator {
    /// Map an elapsed fraction to an eased fraction.
    ///
    /// The input is clamped to [0, 1]. Bezier curves may overshoot that range.
    pub fn apply(&self, fraction: f32) -> f32 {
        let t = fraction.clamp(0.0, 1.0);
        match *self {
            Self::Linear => t,
            Self::Accelerate { factor } => {
                if factor == 1.0 {
                    t * t
                } else {
                    t.powf(2.0 * factor)
                }
            }
            Self::Decelerate { factor } => {
                let inv = 1.0 - t;
                if factor == 1.0 {
                    1.0 - inv * inv
                } else {
                    1.0 - inv.powf(2.0 * factor)
                }
            }
            Self::AccelerateDecelerate => ((t + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5,
            Self::CubicBezier { x1, y1, x2, y2 } => {
                let s = Interpolation::solve_bezier_x(x1, x2, t);
                Interpolation::bezier(0.0, y1, y2, 1.0, s)
            }
        }
    }

    /// Whether the curve parameters are usable
    pub fn is_valid(&self) -> bool {
        match *self {
            Self::Linear | Self::AccelerateDecelerate => true,
            Self::Accelerate { factor } | Self::Decelerate { factor } => {
                factor.is_finite() && factor > 0.0
            }
            Self::CubicBezier { x1, y1, x2, y2 } => {
                [x1, y1, x2, y2].iter().all(|v| v.is_finite())
                    && (0.0..=1.0).contains(&x1)
                    && (0.0..=1.0).contains(&x2)
            }
        }
    }
}

/// A float value pinned at a point of normalized progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Progress in [0, 1]
    pub fraction: f32,
    /// Value at this keyframe
    pub value: f32,
}

impl Keyframe {
    /// Create a new keyframe
    pub fn new(fraction: f32, value: f32) -> Self {
        Self { fraction, value }
    }
}

/// Interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two floats
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Cubic bezier interpolation
    pub fn bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        p0 * mt3 + 3.0 * p1 * mt2 * t + 3.0 * p2 * mt * t2 + p3 * t3
    }

    /// Find the curve parameter whose x coordinate is `x` on the bezier
    /// `(0,0) (x1,_) (x2,_) (1,1)`.
    fn solve_bezier_x(x1: f32, x2: f32, x: f32) -> f32 {
        const EPSILON: f32 = 1e-6;

        // Newton first, it converges in a handful of steps for sane curves
        let mut s = x;
        for _ in 0..8 {
            let err = Self::bezier(0.0, x1, x2, 1.0, s) - x;
            if err.abs() < EPSILON {
                return s;
            }
            let slope = 3.0 * (1.0 - s) * (1.0 - s) * x1
                + 6.0 * (1.0 - s) * s * (x2 - x1)
                + 3.0 * s * s * (1.0 - x2);
            if slope.abs() < EPSILON {
                break;
            }
            s -= err / slope;
        }

        // Bisection fallback; x(s) is monotonic when x1, x2 lie in [0, 1]
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        s = x;
        for _ in 0..32 {
            let value = Self::bezier(0.0, x1, x2, 1.0, s);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_curves_hit_end_points() {
        let curves = [
            Interpolator::Linear,
            Interpolator::Accelerate { factor: 1.0 },
            Interpolator::Accelerate { factor: 1.5 },
            Interpolator::Decelerate { factor: 1.0 },
            Interpolator::AccelerateDecelerate,
            Interpolator::CubicBezier { x1: 0.25, y1: 0.1, x2: 0.25, y2: 1.0 },
        ];
        for curve in curves {
            assert!(approx(curve.apply(0.0), 0.0), "{curve:?} at 0");
            assert!(approx(curve.apply(1.0), 1.0), "{curve:?} at 1");
        }
    }

    #[test]
    fn test_curve_shapes() {
        assert!(approx(Interpolator::Linear.apply(0.3), 0.3));
        assert!(approx(Interpolator::Accelerate { factor: 1.0 }.apply(0.5), 0.25));
        assert!(approx(Interpolator::Decelerate { factor: 1.0 }.apply(0.5), 0.75));
        assert!(approx(Interpolator::AccelerateDecelerate.apply(0.5), 0.5));
        assert!(Interpolator::AccelerateDecelerate.apply(0.1) < 0.1);
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Interpolator::Linear.apply(-0.5), 0.0);
        assert_eq!(Interpolator::Linear.apply(1.5), 1.0);
    }

    #[test]
    fn test_linear_bezier_matches_linear() {
        let curve = Interpolator::CubicBezier { x1: 0.0, y1: 0.0, x2: 1.0, y2: 1.0 };
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!(approx(curve.apply(t), t), "t = {t}");
        }
    }

    #[test]
    fn test_validation() {
        assert!(Interpolator::Linear.is_valid());
        assert!(!Interpolator::Accelerate { factor: 0.0 }.is_valid());
        assert!(!Interpolator::CubicBezier { x1: 1.5, y1: 0.0, x2: 0.5, y2: 1.0 }.is_valid());
    }
}
