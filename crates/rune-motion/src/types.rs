//! Core animation types.
//!
//! - `AnimatableProperty`: the closed set of keys a node can animate
//! - `AnimatableValue`: the typed values those keys hold
//! - `AnimationType`: the sources that compete for control of a key
//! - `AnimationId` / `PlaybackState`: identity and lifecycle of a running animation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::MotionError;

/// Unique identifier for an animation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationId(pub u64);

impl AnimationId {
    /// Generate a new unique animation ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for AnimationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle state of a single running animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Created but still inside its delay.
    #[default]
    Pending,
    /// Actively advancing.
    Running,
    /// Held at its current progress.
    Paused,
    /// Reached its target.
    Finished,
    /// Stopped before reaching its target, usually by a newer animation.
    Cancelled,
}

impl PlaybackState {
    /// Whether the animation has reached a terminal state.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }
}

/// A value an animatable property can hold or animate towards.
///
/// Serialized untagged so that request documents read naturally:
/// `20`, `"none"`, `{"rgba": [1, 0, 0, 1]}` and `[0, 1, 0.5]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnimatableValue {
    /// Numeric value (offsets, opacity, sizes, angles in degrees).
    F64(f64),
    /// RGBA color, each channel in `0.0..=1.0`.
    Color { rgba: [f32; 4] },
    /// Discrete keyword such as `display: none`. Never interpolated.
    Keyword(String),
    /// Keyframe sequence, evenly spaced over the animation.
    Keyframes(Vec<AnimatableValue>),
}

impl AnimatableValue {
    /// Try to extract an f64 value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(value) => Some(*value),
            _ => None,
        }
    }

    /// Try to extract a color value.
    pub fn as_color(&self) -> Option<[f32; 4]> {
        match self {
            Self::Color { rgba } => Some(*rgba),
            _ => None,
        }
    }

    /// Try to extract a keyword.
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true for keyframe sequences.
    pub fn is_keyframes(&self) -> bool {
        matches!(self, Self::Keyframes(_))
    }

    /// The value this resolves to once an animation towards it completes.
    ///
    /// For keyframes this is the last keyframe; an empty sequence resolves to itself.
    pub fn final_value(&self) -> &AnimatableValue {
        match self {
            Self::Keyframes(frames) => frames.last().map_or(self, |last| last.final_value()),
            _ => self,
        }
    }
}

impl From<f64> for AnimatableValue {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<[f32; 4]> for AnimatableValue {
    fn from(c: [f32; 4]) -> Self {
        Self::Color { rgba: c }
    }
}

impl From<&str> for AnimatableValue {
    fn from(keyword: &str) -> Self {
        Self::Keyword(keyword.to_string())
    }
}

impl From<Vec<AnimatableValue>> for AnimatableValue {
    fn from(frames: Vec<AnimatableValue>) -> Self {
        Self::Keyframes(frames)
    }
}

/// Animatable node properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimatableProperty {
    // Transform
    TransformPerspective,
    X,
    Y,
    Z,
    TranslateX,
    TranslateY,
    TranslateZ,
    Scale,
    ScaleX,
    ScaleY,
    Rotate,
    RotateX,
    RotateY,
    RotateZ,
    Skew,
    SkewX,
    SkewY,

    // Visual
    Opacity,
    BackgroundColor,
    Color,
    BorderColor,
    BorderRadius,
    BorderWidth,
    PathLength,

    // Geometry
    Width,
    Height,
    FontSize,

    // Discrete
    Display,
    Visibility,
}

impl AnimatableProperty {
    /// Every property, transform properties first in composition order.
    pub const ALL: [AnimatableProperty; 29] = [
        Self::TransformPerspective,
        Self::X,
        Self::Y,
        Self::Z,
        Self::TranslateX,
        Self::TranslateY,
        Self::TranslateZ,
        Self::Scale,
        Self::ScaleX,
        Self::ScaleY,
        Self::Rotate,
        Self::RotateX,
        Self::RotateY,
        Self::RotateZ,
        Self::Skew,
        Self::SkewX,
        Self::SkewY,
        Self::Opacity,
        Self::BackgroundColor,
        Self::Color,
        Self::BorderColor,
        Self::BorderRadius,
        Self::BorderWidth,
        Self::PathLength,
        Self::Width,
        Self::Height,
        Self::FontSize,
        Self::Display,
        Self::Visibility,
    ];

    /// The key used for this property in request documents.
    pub fn name(self) -> &'static str {
        match self {
            Self::TransformPerspective => "transformPerspective",
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::TranslateZ => "translateZ",
            Self::Scale => "scale",
            Self::ScaleX => "scaleX",
            Self::ScaleY => "scaleY",
            Self::Rotate => "rotate",
            Self::RotateX => "rotateX",
            Self::RotateY => "rotateY",
            Self::RotateZ => "rotateZ",
            Self::Skew => "skew",
            Self::SkewX => "skewX",
            Self::SkewY => "skewY",
            Self::Opacity => "opacity",
            Self::BackgroundColor => "backgroundColor",
            Self::Color => "color",
            Self::BorderColor => "borderColor",
            Self::BorderRadius => "borderRadius",
            Self::BorderWidth => "borderWidth",
            Self::PathLength => "pathLength",
            Self::Width => "width",
            Self::Height => "height",
            Self::FontSize => "fontSize",
            Self::Display => "display",
            Self::Visibility => "visibility",
        }
    }

    /// Returns true if this property is composed into the node's transform.
    ///
    /// Reduced motion snaps these instead of animating them.
    pub fn is_transform(self) -> bool {
        matches!(
            self,
            Self::TransformPerspective
                | Self::X
                | Self::Y
                | Self::Z
                | Self::TranslateX
                | Self::TranslateY
                | Self::TranslateZ
                | Self::Scale
                | Self::ScaleX
                | Self::ScaleY
                | Self::Rotate
                | Self::RotateX
                | Self::RotateY
                | Self::RotateZ
                | Self::Skew
                | Self::SkewX
                | Self::SkewY
        )
    }

    /// Returns true for the scale family.
    pub fn is_scale(self) -> bool {
        matches!(self, Self::Scale | Self::ScaleX | Self::ScaleY)
    }

    /// Value a property holds before anything has been declared for it.
    pub fn initial_value(self) -> AnimatableValue {
        match self {
            Self::Scale | Self::ScaleX | Self::ScaleY | Self::Opacity => AnimatableValue::F64(1.0),
            Self::BackgroundColor | Self::BorderColor => AnimatableValue::Color {
                rgba: [0.0, 0.0, 0.0, 0.0],
            },
            Self::Color => AnimatableValue::Color {
                rgba: [0.0, 0.0, 0.0, 1.0],
            },
            Self::Display => AnimatableValue::Keyword("block".to_string()),
            Self::Visibility => AnimatableValue::Keyword("visible".to_string()),
            _ => AnimatableValue::F64(0.0),
        }
    }
}

impl fmt::Display for AnimatableProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnimatableProperty {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|property| property.name() == s)
            .ok_or_else(|| MotionError::UnknownProperty(s.to_string()))
    }
}

/// The source that drove (or wants to drive) a value.
///
/// `Initial` is only a label: it names the state a value starts in and has no
/// type state of its own. The remaining variants are listed in priority order,
/// lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationType {
    Initial,
    Animate,
    InView,
    Focus,
    Hover,
    Press,
    Drag,
    Exit,
}

impl AnimationType {
    /// Types that own a type state, lowest priority first.
    pub const PRIORITY: [AnimationType; 7] = [
        Self::Animate,
        Self::InView,
        Self::Focus,
        Self::Hover,
        Self::Press,
        Self::Drag,
        Self::Exit,
    ];

    /// Position in [`Self::PRIORITY`], or `None` for `Initial`.
    pub fn priority(self) -> Option<usize> {
        Self::PRIORITY.iter().position(|ty| *ty == self)
    }
}
