//! Per-value transition resolution.
//!
//! Resolution happens in two steps. [`value_transition`] picks the entry for
//! one property out of a [`Transition`] and merges it over the shared fields.
//! [`ResolvedTransition::finalize`] then fills every field still unset from
//! [`MotionDefaults`], choosing a default kind from the property and target.
//!
//! Both steps are pure.

use rune_config::MotionConfig;

use crate::easing::EasingFunction;
use crate::transition::{
    ResolvedKind, ResolvedTransition, Transition, TransitionType, ValueTransition,
};
use crate::types::{AnimatableProperty, AnimatableValue};

/// Merge the entry for `property` over the transition's shared fields.
///
/// A property without its own entry uses the `default` entry if present.
/// An absent transition yields an empty [`ValueTransition`].
pub fn value_transition(
    transition: Option<&Transition>,
    property: AnimatableProperty,
) -> ValueTransition {
    let Some(transition) = transition else {
        return ValueTransition::default();
    };

    match transition
        .values
        .get(&property)
        .or(transition.default.as_ref())
    {
        Some(entry) => entry.merged_over(&transition.base),
        None => transition.base.clone(),
    }
}

/// Parameters used for fields a transition leaves unset.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionDefaults {
    pub tween_duration_ms: f64,
    pub keyframes_duration_ms: f64,
    pub ease: EasingFunction,
    pub spring_stiffness: f64,
    pub spring_damping: f64,
    pub spring_mass: f64,
    pub scale_spring_stiffness: f64,
    pub scale_spring_damping: f64,
}

impl From<&MotionConfig> for MotionDefaults {
    fn from(config: &MotionConfig) -> Self {
        Self {
            tween_duration_ms: config.tween_duration_ms,
            keyframes_duration_ms: config.keyframes_duration_ms,
            ease: EasingFunction::EaseOut,
            spring_stiffness: config.spring_stiffness,
            spring_damping: config.spring_damping,
            spring_mass: config.spring_mass,
            scale_spring_stiffness: config.scale_spring_stiffness,
            scale_spring_damping: config.scale_spring_damping,
        }
    }
}

impl Default for MotionDefaults {
    fn default() -> Self {
        Self::from(&MotionConfig::default())
    }
}

impl MotionDefaults {
    fn spring_for(&self, property: AnimatableProperty, vt: &ValueTransition) -> ResolvedKind {
        let (stiffness, damping) = if property.is_scale() {
            (self.scale_spring_stiffness, self.scale_spring_damping)
        } else {
            (self.spring_stiffness, self.spring_damping)
        };
        ResolvedKind::Spring {
            stiffness: vt.stiffness.unwrap_or(stiffness),
            damping: vt.damping.unwrap_or(damping),
            mass: vt.mass.unwrap_or(self.spring_mass),
        }
    }

    fn tween_for(&self, vt: &ValueTransition, duration_ms: f64) -> ResolvedKind {
        ResolvedKind::Tween {
            duration_ms: vt.duration_ms.unwrap_or(duration_ms),
            ease: vt.ease.unwrap_or(self.ease),
        }
    }
}

fn springs_by_default(property: AnimatableProperty) -> bool {
    property.is_transform() && property != AnimatableProperty::TransformPerspective
}

impl ResolvedTransition {
    /// Fill in everything `vt` leaves unset.
    ///
    /// Keyword targets always snap. Otherwise an explicit `type` wins, then a
    /// kind implied by the fields present, then the per-property default.
    pub fn finalize(
        vt: &ValueTransition,
        property: AnimatableProperty,
        target: &AnimatableValue,
        defaults: &MotionDefaults,
    ) -> Self {
        let keyframes = target.is_keyframes();
        let tween_duration = if keyframes {
            defaults.keyframes_duration_ms
        } else {
            defaults.tween_duration_ms
        };

        let kind = if target.final_value().as_keyword().is_some() {
            ResolvedKind::Instant
        } else {
            match vt.kind {
                Some(TransitionType::Instant) => ResolvedKind::Instant,
                Some(TransitionType::Spring) => defaults.spring_for(property, vt),
                Some(TransitionType::Tween | TransitionType::Keyframes) => {
                    defaults.tween_for(vt, tween_duration)
                }
                None if vt.duration_ms.is_some() || vt.ease.is_some() => {
                    defaults.tween_for(vt, tween_duration)
                }
                None if vt.stiffness.is_some() || vt.damping.is_some() || vt.mass.is_some() => {
                    defaults.spring_for(property, vt)
                }
                None if keyframes => defaults.tween_for(vt, defaults.keyframes_duration_ms),
                None if springs_by_default(property) => defaults.spring_for(property, vt),
                None => defaults.tween_for(vt, defaults.tween_duration_ms),
            }
        };

        Self {
            kind,
            delay_ms: vt.delay_ms.unwrap_or(0.0),
            elapsed_ms: 0.0,
            from: vt.from.clone(),
            repeat: vt.repeat.unwrap_or(0),
        }
    }
}

/// Resolves a caller's transition into a concrete one for each value.
#[derive(Debug, Clone, Default)]
pub struct TransitionResolver {
    defaults: MotionDefaults,
}

impl TransitionResolver {
    pub fn new(defaults: MotionDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &MotionDefaults {
        &self.defaults
    }

    /// Resolve `transition` for `property`, falling back to `node_default`
    /// when absent.
    ///
    /// `delay_ms` applies unless the transition sets its own delay. Elapsed
    /// time always starts at zero; handoff overwrites it afterwards.
    pub fn resolve(
        &self,
        transition: Option<&Transition>,
        node_default: Option<&Transition>,
        property: AnimatableProperty,
        target: &AnimatableValue,
        delay_ms: f64,
    ) -> ResolvedTransition {
        let vt = value_transition(transition.or(node_default), property);
        let mut resolved = ResolvedTransition::finalize(&vt, property, target, &self.defaults);
        resolved.delay_ms = vt.delay_ms.unwrap_or(delay_ms);
        resolved.elapsed_ms = 0.0;
        resolved
    }
}
