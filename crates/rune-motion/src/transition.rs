//! Transition descriptions.
//!
//! A [`Transition`] is what callers write: shared fields, optional per-property
//! overrides and an optional `default` entry. The resolver turns it into a
//! [`ResolvedTransition`] for one property, with every field concrete.
//!
//! ```ignore
//! use rune_motion::transition::Transition;
//! use rune_motion::AnimatableProperty;
//!
//! // 200ms tween for everything, but a spring for `x`
//! let transition = Transition::tween(200.0)
//!     .with_value(AnimatableProperty::X, Transition::spring(400.0, 30.0).base);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::easing::EasingFunction;
use crate::error::{MotionError, Result};
use crate::types::{AnimatableProperty, AnimatableValue};

/// The kind of animation a transition asks for.
///
/// Serialized as `"tween"`, `"spring"`, `"keyframes"`, or `false` for
/// [`TransitionType::Instant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTransitionType", into = "RawTransitionType")]
pub enum TransitionType {
    Tween,
    Spring,
    /// Tween through a keyframe sequence.
    Keyframes,
    /// Snap to the target without interpolation.
    Instant,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawTransitionType {
    Flag(bool),
    Name(String),
}

impl TryFrom<RawTransitionType> for TransitionType {
    type Error = MotionError;

    fn try_from(raw: RawTransitionType) -> Result<Self> {
        match raw {
            RawTransitionType::Flag(false) => Ok(Self::Instant),
            RawTransitionType::Flag(true) => Err(MotionError::InvalidTransitionType("true".into())),
            RawTransitionType::Name(name) => match name.as_str() {
                "tween" => Ok(Self::Tween),
                "spring" => Ok(Self::Spring),
                "keyframes" => Ok(Self::Keyframes),
                _ => Err(MotionError::InvalidTransitionType(name)),
            },
        }
    }
}

impl From<TransitionType> for RawTransitionType {
    fn from(kind: TransitionType) -> Self {
        match kind {
            TransitionType::Tween => Self::Name("tween".into()),
            TransitionType::Spring => Self::Name("spring".into()),
            TransitionType::Keyframes => Self::Name("keyframes".into()),
            TransitionType::Instant => Self::Flag(false),
        }
    }
}

/// Transition fields for a single value. Every field is optional; unset
/// fields are inherited from the enclosing transition or filled in with
/// defaults during resolution.
///
/// Times are in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueTransition {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransitionType>,
    #[serde(rename = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
    #[serde(rename = "delay", skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ease: Option<EasingFunction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stiffness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damping: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass: Option<f64>,
    /// Start from this value instead of the value's current one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<AnimatableValue>,
    /// Extra tween iterations after the first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<u32>,
}

impl ValueTransition {
    /// Overlay `self` on `base`: fields set on `self` win.
    pub fn merged_over(&self, base: &ValueTransition) -> ValueTransition {
        ValueTransition {
            kind: self.kind.or(base.kind),
            duration_ms: self.duration_ms.or(base.duration_ms),
            delay_ms: self.delay_ms.or(base.delay_ms),
            ease: self.ease.or(base.ease),
            stiffness: self.stiffness.or(base.stiffness),
            damping: self.damping.or(base.damping),
            mass: self.mass.or(base.mass),
            from: self.from.clone().or_else(|| base.from.clone()),
            repeat: self.repeat.or(base.repeat),
        }
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == ValueTransition::default()
    }
}

/// A transition as written by callers.
///
/// In JSON, shared fields sit at the top level next to per-property entries:
///
/// ```json
/// { "duration": 200, "ease": "easeIn", "x": { "type": "spring" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Fields shared by every property.
    #[serde(flatten)]
    pub base: ValueTransition,
    /// Entry used by properties without their own entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ValueTransition>,
    /// Per-property entries.
    #[serde(flatten)]
    pub values: HashMap<AnimatableProperty, ValueTransition>,
}

impl Transition {
    /// A tween over `duration_ms`.
    pub fn tween(duration_ms: f64) -> Self {
        Self::from_base(ValueTransition {
            kind: Some(TransitionType::Tween),
            duration_ms: Some(duration_ms),
            ..Default::default()
        })
    }

    /// A spring with the given stiffness and damping.
    pub fn spring(stiffness: f64, damping: f64) -> Self {
        Self::from_base(ValueTransition {
            kind: Some(TransitionType::Spring),
            stiffness: Some(stiffness),
            damping: Some(damping),
            ..Default::default()
        })
    }

    /// The `type: false` transition.
    pub fn instant() -> Self {
        Self::from_base(ValueTransition {
            kind: Some(TransitionType::Instant),
            ..Default::default()
        })
    }

    pub fn from_base(base: ValueTransition) -> Self {
        Self {
            base,
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.base.delay_ms = Some(delay_ms);
        self
    }

    pub fn with_ease(mut self, ease: EasingFunction) -> Self {
        self.base.ease = Some(ease);
        self
    }

    pub fn with_from(mut self, from: impl Into<AnimatableValue>) -> Self {
        self.base.from = Some(from.into());
        self
    }

    /// Add or replace the entry for one property.
    pub fn with_value(mut self, property: AnimatableProperty, transition: ValueTransition) -> Self {
        self.values.insert(property, transition);
        self
    }

    /// Set the entry used by properties without their own entry.
    pub fn with_default(mut self, transition: ValueTransition) -> Self {
        self.default = Some(transition);
        self
    }

    /// Parse a transition from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Concrete animation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolvedKind {
    Tween { duration_ms: f64, ease: EasingFunction },
    Spring { stiffness: f64, damping: f64, mass: f64 },
    /// Assign the target directly.
    Instant,
}

/// A fully resolved transition for one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTransition {
    pub kind: ResolvedKind,
    pub delay_ms: f64,
    /// Time already spent by an animation this one takes over from.
    pub elapsed_ms: f64,
    pub from: Option<AnimatableValue>,
    pub repeat: u32,
}

impl ResolvedTransition {
    /// The `type: false` sentinel.
    pub fn instant() -> Self {
        Self {
            kind: ResolvedKind::Instant,
            delay_ms: 0.0,
            elapsed_ms: 0.0,
            from: None,
            repeat: 0,
        }
    }

    pub fn is_instant(&self) -> bool {
        matches!(self.kind, ResolvedKind::Instant)
    }
}

static_assertions::assert_impl_all!(Transition: Send, Sync);
static_assertions::assert_impl_all!(ResolvedTransition: Send, Sync);
