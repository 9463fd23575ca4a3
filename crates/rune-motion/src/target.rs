//! Animation targets.
//!
//! A [`Target`] maps properties to the values they should reach, in the order
//! the caller wrote them. A key may be present with no value; such keys are
//! skipped when animating. A [`TargetAndTransition`] adds the transition
//! fields that travel with a request.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use crate::error::Result;
use crate::transition::Transition;
use crate::types::{AnimatableProperty, AnimatableValue, AnimationType};

/// Insertion-ordered property targets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Target {
    entries: Vec<(AnimatableProperty, Option<AnimatableValue>)>,
}

impl Target {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `property` to `value`. An existing key keeps its position.
    pub fn insert(&mut self, property: AnimatableProperty, value: Option<AnimatableValue>) {
        match self.entries.iter_mut().find(|(key, _)| *key == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    pub fn with(mut self, property: AnimatableProperty, value: impl Into<AnimatableValue>) -> Self {
        self.insert(property, Some(value.into()));
        self
    }

    /// Declare `property` without a value.
    pub fn with_undefined(mut self, property: AnimatableProperty) -> Self {
        self.insert(property, None);
        self
    }

    /// The target for `property`: `None` if the key is absent, `Some(None)`
    /// if it is present without a value.
    pub fn get(&self, property: AnimatableProperty) -> Option<Option<&AnimatableValue>> {
        self.entries
            .iter()
            .find(|(key, _)| *key == property)
            .map(|(_, value)| value.as_ref())
    }

    pub fn contains(&self, property: AnimatableProperty) -> bool {
        self.get(property).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnimatableProperty, Option<&AnimatableValue>)> {
        self.entries.iter().map(|(key, value)| (*key, value.as_ref()))
    }

    pub fn keys(&self) -> impl Iterator<Item = AnimatableProperty> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(AnimatableProperty, AnimatableValue)> for Target {
    fn from_iter<I: IntoIterator<Item = (AnimatableProperty, AnimatableValue)>>(iter: I) -> Self {
        let mut target = Target::new();
        for (property, value) in iter {
            target.insert(property, Some(value));
        }
        target
    }
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (property, value) in &self.entries {
            map.serialize_entry(property.name(), value)?;
        }
        map.end()
    }
}

struct TargetVisitor;

impl<'de> Visitor<'de> for TargetVisitor {
    type Value = Target;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of animatable properties to target values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Target, A::Error> {
        let mut target = Target::new();
        while let Some(key) = access.next_key::<String>()? {
            let property = key.parse::<AnimatableProperty>().map_err(de::Error::custom)?;
            let value = access.next_value::<Option<AnimatableValue>>()?;
            target.insert(property, value);
        }
        Ok(target)
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(TargetVisitor)
    }
}

/// A target plus the transition fields that travel with it.
///
/// ```json
/// {
///   "x": 100,
///   "opacity": 1,
///   "transition": { "duration": 200 },
///   "transitionFrom": { "hover": { "type": "spring" } },
///   "transitionEnd": { "display": "none" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetAndTransition {
    #[serde(flatten)]
    pub target: Target,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
    /// Transitions keyed by the animation type that last drove a value.
    #[serde(
        rename = "transitionFrom",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transition_from: Option<HashMap<AnimationType, Transition>>,
    /// Assigned directly once every started animation settles.
    #[serde(rename = "transitionEnd", default, skip_serializing_if = "Option::is_none")]
    pub transition_end: Option<Target>,
}

impl TargetAndTransition {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn with_transition_from(mut self, from: AnimationType, transition: Transition) -> Self {
        self.transition_from
            .get_or_insert_with(HashMap::new)
            .insert(from, transition);
        self
    }

    pub fn with_transition_end(mut self, target: Target) -> Self {
        self.transition_end = Some(target);
        self
    }

    /// Parse a request from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Target> for TargetAndTransition {
    fn from(target: Target) -> Self {
        Self::new(target)
    }
}
