//! Timing functions (easing curves) for drawer animations.
//!
//! The named curves use the standard cubic-bezier control points, so
//! [`TimingFunction::EaseOut`] is `cubic-bezier(0, 0, 0.58, 1)`.
//!
//! - [`TimingFunction::Linear`] - Constant speed
//! - [`TimingFunction::EaseIn`] - Starts slow, ends fast
//! - [`TimingFunction::EaseOut`] - Starts fast, ends slow
//! - [`TimingFunction::EaseInOut`] - Slow start and end
//! - [`TimingFunction::CubicBezier`] - Arbitrary control points
//! - [`TimingFunction::Spring`] - Physics-based, driven by real elapsed time
//! - [`TimingFunction::Custom`] - User-defined curve

use super::spring::SpringConfig;
use std::rc::Rc;

/// Timing function that controls the animation curve
#[derive(Clone)]
pub enum TimingFunction {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Cubic bezier curve (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
    /// Spring physics; the animator steps a [`super::SpringState`] instead of
    /// calling [`TimingFunction::evaluate`]
    Spring(SpringConfig),
    Custom(Rc<dyn Fn(f32) -> f32>),
}

impl TimingFunction {
    /// Map normalized time `t` (clamped to 0.0..=1.0) to an interpolation factor.
    ///
    /// Springs fall back to linear here.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            TimingFunction::Linear | TimingFunction::Spring(_) => t,
            TimingFunction::EaseIn => cubic_bezier(t, 0.42, 0.0, 1.0, 1.0),
            TimingFunction::EaseOut => cubic_bezier(t, 0.0, 0.0, 0.58, 1.0),
            TimingFunction::EaseInOut => cubic_bezier(t, 0.42, 0.0, 0.58, 1.0),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
            TimingFunction::Custom(f) => f(t),
        }
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + 'static,
    {
        TimingFunction::Custom(Rc::new(f))
    }

    pub fn is_spring(&self) -> bool {
        matches!(self, TimingFunction::Spring(_))
    }
}

impl Default for TimingFunction {
    fn default() -> Self {
        TimingFunction::EaseInOut
    }
}

impl std::fmt::Debug for TimingFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingFunction::Linear => write!(f, "Linear"),
            TimingFunction::EaseIn => write!(f, "EaseIn"),
            TimingFunction::EaseOut => write!(f, "EaseOut"),
            TimingFunction::EaseInOut => write!(f, "EaseInOut"),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "CubicBezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
            TimingFunction::Spring(config) => write!(f, "Spring({:?})", config),
            TimingFunction::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Solve the curve for x = `t` with Newton-Raphson, then return its y.
/// Assumes x1 and x2 lie in [0, 1].
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let mut u = t;
    for _ in 0..8 {
        let slope = bezier_slope(u, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        u = (u - (bezier_component(u, x1, x2) - t) / slope).clamp(0.0, 1.0);
    }
    bezier_component(u, y1, y2)
}

/// One axis of a cubic bezier anchored at 0 and 1
fn bezier_component(u: f32, p1: f32, p2: f32) -> f32 {
    let mu = 1.0 - u;
    3.0 * mu * mu * u * p1 + 3.0 * mu * u * u * p2 + u * u * u
}

fn bezier_slope(u: f32, p1: f32, p2: f32) -> f32 {
    let mu = 1.0 - u;
    3.0 * mu * mu * p1 + 6.0 * mu * u * (p2 - p1) + 3.0 * u * u * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for timing in [
            TimingFunction::Linear,
            TimingFunction::EaseIn,
            TimingFunction::EaseOut,
            TimingFunction::EaseInOut,
        ] {
            assert!(timing.evaluate(0.0).abs() < 1e-4, "{:?}", timing);
            assert!((timing.evaluate(1.0) - 1.0).abs() < 1e-4, "{:?}", timing);
        }
    }

    #[test]
    fn test_ease_out_leads_linear() {
        assert!(TimingFunction::EaseOut.evaluate(0.5) > 0.5);
        assert!(TimingFunction::EaseIn.evaluate(0.5) < 0.5);
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(TimingFunction::Linear.evaluate(-1.0), 0.0);
        assert_eq!(TimingFunction::Linear.evaluate(2.0), 1.0);
    }

    #[test]
    fn test_custom() {
        let timing = TimingFunction::custom(|t| t * t);
        assert_eq!(timing.evaluate(0.5), 0.25);
        assert_eq!(format!("{:?}", timing), "Custom");
    }
}
