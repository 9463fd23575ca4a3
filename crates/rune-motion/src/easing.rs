//! Easing curves for tween transitions.
//!
//! Named curves serialize as camelCase strings (`"easeOut"`), custom curves as
//! `{"cubicBezier": {"x1": .., "y1": .., "x2": .., "y2": ..}}`.
//!
//! ```
//! use rune_motion::easing::EasingFunction;
//!
//! let ease = EasingFunction::EaseOut;
//! assert!(ease.evaluate(0.5) > 0.5);
//! ```

use serde::{Deserialize, Serialize};

/// Easing function for tween timing.
///
/// Maps linear progress in `0.0..=1.0` to eased progress. Overshooting curves
/// (`BackOut`, `Anticipate`) may leave that range mid-animation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EasingFunction {
    Linear,
    /// `cubic-bezier(0.25, 0.1, 0.25, 1.0)`
    Ease,
    /// `cubic-bezier(0.42, 0, 1, 1)`
    EaseIn,
    /// `cubic-bezier(0, 0, 0.58, 1)`
    #[default]
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`
    EaseInOut,
    CircIn,
    CircOut,
    CircInOut,
    BackIn,
    /// `cubic-bezier(0.33, 1.53, 0.69, 0.99)`
    BackOut,
    BackInOut,
    /// Pulls back first, then shoots towards the target.
    Anticipate,
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl EasingFunction {
    /// Evaluate the curve at `t`, clamped to `0.0..=1.0`.
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CircIn => circ_in(t),
            Self::CircOut => reverse(circ_in, t),
            Self::CircInOut => mirror(circ_in, t),
            Self::BackIn => back_in(t),
            Self::BackOut => back_out(t),
            Self::BackInOut => mirror(back_in, t),
            Self::Anticipate => anticipate(t),
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(*x1, *y1, *x2, *y2, t),
        }
    }

    /// Create a custom cubic bezier curve.
    ///
    /// # Panics
    /// Panics if x1 or x2 are outside [0, 1].
    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2),
            "Bezier x values must be in [0, 1]"
        );
        Self::CubicBezier { x1, y1, x2, y2 }
    }
}

fn circ_in(t: f64) -> f64 {
    1.0 - t.acos().sin()
}

fn back_out(t: f64) -> f64 {
    cubic_bezier(0.33, 1.53, 0.69, 0.99, t)
}

fn back_in(t: f64) -> f64 {
    reverse(back_out, t)
}

fn anticipate(t: f64) -> f64 {
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * back_in(t)
    } else {
        0.5 * (2.0 - 2f64.powf(-10.0 * (t - 1.0)))
    }
}

/// Turn an ease-in into an ease-out and vice versa.
fn reverse(curve: fn(f64) -> f64, t: f64) -> f64 {
    1.0 - curve(1.0 - t)
}

/// Build an in-out curve from an ease-in.
fn mirror(curve: fn(f64) -> f64, t: f64) -> f64 {
    if t <= 0.5 {
        curve(2.0 * t) / 2.0
    } else {
        (2.0 - curve(2.0 * (1.0 - t))) / 2.0
    }
}

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_PRECISION: f64 = 1e-7;
const SUBDIVISION_ITERATIONS: usize = 24;

/// Evaluate a cubic bezier timing curve at progress `x`.
///
/// Solves x(t) = progress with Newton-Raphson, falling back to bisection when
/// the slope is too flat to converge.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, progress: f64) -> f64 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }
    if x1 == y1 && x2 == y2 {
        return progress;
    }

    let t = solve_curve_x(x1, x2, progress);
    bezier(y1, y2, t)
}

fn solve_curve_x(x1: f64, x2: f64, target: f64) -> f64 {
    let mut t = target;
    for _ in 0..NEWTON_ITERATIONS {
        let error = bezier(x1, x2, t) - target;
        if error.abs() < NEWTON_PRECISION {
            return t;
        }
        let slope = bezier_slope(x1, x2, t);
        if slope.abs() < 1e-6 {
            break;
        }
        t -= error / slope;
    }

    let (mut lower, mut upper) = (0.0, 1.0);
    t = target;
    for _ in 0..SUBDIVISION_ITERATIONS {
        let x = bezier(x1, x2, t);
        if (x - target).abs() < NEWTON_PRECISION {
            break;
        }
        if x < target {
            lower = t;
        } else {
            upper = t;
        }
        t = (lower + upper) / 2.0;
    }
    t
}

/// One coordinate of the curve: 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

#[inline]
fn bezier_slope(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}
