//! Interpolation between animatable values.
//!
//! Numbers and colors blend linearly. Keywords and mismatched value kinds
//! cannot blend, so they switch to the target as soon as progress leaves zero.

use crate::types::AnimatableValue;

/// Trait for types that can be interpolated between two values.
pub trait Interpolate: Sized {
    /// Interpolate between self and `to`.
    ///
    /// `t = 0.0` returns self, `t = 1.0` returns `to`. Values outside that range
    /// extrapolate where the type allows it, so spring overshoot is preserved.
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

#[inline]
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        lerp(*self, *to, t)
    }
}

impl Interpolate for [f32; 4] {
    /// Per-channel blend; channels are clamped so overshoot never produces
    /// an invalid color.
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        let mut out = [0.0; 4];
        for (i, channel) in out.iter_mut().enumerate() {
            *channel = lerp(self[i] as f64, to[i] as f64, t).clamp(0.0, 1.0) as f32;
        }
        out
    }
}

impl Interpolate for AnimatableValue {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        match (self, to) {
            (Self::F64(a), Self::F64(b)) => Self::F64(a.interpolate(b, t)),
            (Self::Color { rgba: a }, Self::Color { rgba: b }) => Self::Color {
                rgba: a.interpolate(b, t),
            },
            (from, Self::Keyframes(frames)) => {
                sample_keyframes(frames, t).unwrap_or_else(|| from.clone())
            }
            _ => discrete(self, to, t),
        }
    }
}

/// Step interpolation for values that cannot blend.
fn discrete(from: &AnimatableValue, to: &AnimatableValue, t: f64) -> AnimatableValue {
    if t > 0.0 { to.clone() } else { from.clone() }
}

/// Sample an evenly spaced keyframe sequence at `progress`.
///
/// Returns `None` for an empty sequence.
pub fn sample_keyframes(frames: &[AnimatableValue], progress: f64) -> Option<AnimatableValue> {
    match frames {
        [] => None,
        [only] => Some(only.clone()),
        _ => {
            let segments = (frames.len() - 1) as f64;
            let scaled = progress.clamp(0.0, 1.0) * segments;
            let index = (scaled.floor() as usize).min(frames.len() - 2);
            let local = scaled - index as f64;
            Some(frames[index].interpolate(&frames[index + 1], local))
        }
    }
}
