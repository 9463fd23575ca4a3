//! Animated scene nodes.
//!
//! A [`VisualNode`] owns the [`MotionValue`]s of one element together with
//! the props that describe how it should animate. Nodes are shared as
//! [`NodeHandle`]s so features, drivers and deferred callbacks can reach them.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::arbiter::AnimationState;
use crate::features::{IntersectionCallback, PointerCallback, ViewportOptions};
use crate::target::{Target, TargetAndTransition};
use crate::transition::Transition;
use crate::types::{AnimatableProperty, AnimatableValue, AnimationType};
use crate::value::MotionValue;

pub type NodeHandle = Rc<RefCell<VisualNode>>;

/// Identity of one node, unique for the life of the process.
///
/// Node ids are chosen by callers and may repeat; drivers key their
/// bookkeeping by this instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey(u64);

impl NodeKey {
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NodeKey {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys whose values are currently animating, shared with the compositor.
#[derive(Debug, Clone, Default)]
pub struct WillChange {
    keys: Rc<RefCell<Vec<AnimatableProperty>>>,
}

impl WillChange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, key: AnimatableProperty) {
        let mut keys = self.keys.borrow_mut();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    pub fn remove(&self, key: AnimatableProperty) {
        self.keys.borrow_mut().retain(|k| *k != key);
    }

    pub fn contains(&self, key: AnimatableProperty) -> bool {
        self.keys.borrow().contains(&key)
    }

    pub fn keys(&self) -> Vec<AnimatableProperty> {
        self.keys.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.borrow().is_empty()
    }
}

/// The `initial` prop.
#[derive(Debug, Clone, PartialEq)]
pub enum Initial {
    /// `initial: false`: start at the `animate` values without animating.
    Disabled,
    Target(Target),
}

/// Declared animation props of a node.
#[derive(Clone, Default)]
pub struct MotionProps {
    pub initial: Option<Initial>,
    pub animate: Option<TargetAndTransition>,
    pub while_hover: Option<TargetAndTransition>,
    pub while_in_view: Option<TargetAndTransition>,
    /// Identifier of an appear animation started outside this engine.
    pub appear_id: Option<String>,
    pub viewport: ViewportOptions,
    pub on_hover_start: Option<PointerCallback>,
    pub on_hover_end: Option<PointerCallback>,
    pub on_viewport_enter: Option<IntersectionCallback>,
    pub on_viewport_leave: Option<IntersectionCallback>,
}

impl MotionProps {
    /// True when `initial` names a starting target. `initial: false` does
    /// not count.
    pub fn declares_initial(&self) -> bool {
        matches!(self.initial, Some(Initial::Target(_)))
    }

    /// The declared target for an animation type, if any.
    pub fn target_for(&self, ty: AnimationType) -> Option<&TargetAndTransition> {
        match ty {
            AnimationType::Animate => self.animate.as_ref(),
            AnimationType::Hover => self.while_hover.as_ref(),
            AnimationType::InView => self.while_in_view.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Debug for MotionProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionProps")
            .field("initial", &self.initial)
            .field("animate", &self.animate)
            .field("while_hover", &self.while_hover)
            .field("while_in_view", &self.while_in_view)
            .field("appear_id", &self.appear_id)
            .field("viewport", &self.viewport)
            .field("on_hover_start", &self.on_hover_start.is_some())
            .field("on_hover_end", &self.on_hover_end.is_some())
            .field("on_viewport_enter", &self.on_viewport_enter.is_some())
            .field("on_viewport_leave", &self.on_viewport_leave.is_some())
            .finish()
    }
}

/// An element whose properties can be animated.
#[derive(Debug, Default)]
pub struct VisualNode {
    id: String,
    key: NodeKey,
    values: HashMap<AnimatableProperty, MotionValue>,
    /// Values known before a motion value exists for the key.
    latest_values: HashMap<AnimatableProperty, AnimatableValue>,
    props: MotionProps,
    default_transition: Option<Transition>,
    reduce_motion: bool,
    will_change: Option<WillChange>,
    animation_state: Option<AnimationState>,
}

impl VisualNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the props. Values declared by `initial` become the latest values.
    pub fn with_props(mut self, props: MotionProps) -> Self {
        self.set_props(props);
        self
    }

    pub fn with_default_transition(mut self, transition: Transition) -> Self {
        self.default_transition = Some(transition);
        self
    }

    pub fn with_reduced_motion(mut self, reduce: bool) -> Self {
        self.reduce_motion = reduce;
        self
    }

    pub fn with_will_change(mut self, will_change: WillChange) -> Self {
        self.will_change = Some(will_change);
        self
    }

    /// Track animation types, declaring each type's keys from the props.
    pub fn with_animation_state(mut self) -> Self {
        self.animation_state = Some(AnimationState::new());
        self.declare_prop_keys();
        self
    }

    pub fn with_value(mut self, key: AnimatableProperty, value: impl Into<AnimatableValue>) -> Self {
        self.latest_values.insert(key, value.into());
        self
    }

    pub fn into_handle(self) -> NodeHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn props(&self) -> &MotionProps {
        &self.props
    }

    pub fn set_props(&mut self, props: MotionProps) {
        if let Some(Initial::Target(initial)) = &props.initial {
            for (key, value) in initial.iter() {
                if let Some(value) = value {
                    if !self.values.contains_key(&key) {
                        self.latest_values.insert(key, value.final_value().clone());
                    }
                }
            }
        }
        self.props = props;
        self.declare_prop_keys();
    }

    fn declare_prop_keys(&mut self) {
        let Some(state) = self.animation_state.as_mut() else {
            return;
        };
        for ty in [AnimationType::Animate, AnimationType::Hover, AnimationType::InView] {
            let keys: Vec<AnimatableProperty> = self
                .props
                .target_for(ty)
                .map(|request| request.target.keys().collect())
                .unwrap_or_default();
            state.declare_keys(ty, keys);
        }
    }

    pub fn default_transition(&self) -> Option<&Transition> {
        self.default_transition.as_ref()
    }

    pub fn should_reduce_motion(&self) -> bool {
        self.reduce_motion
    }

    pub fn will_change(&self) -> Option<&WillChange> {
        self.will_change.as_ref()
    }

    pub fn animation_state(&self) -> Option<&AnimationState> {
        self.animation_state.as_ref()
    }

    pub fn animation_state_mut(&mut self) -> Option<&mut AnimationState> {
        self.animation_state.as_mut()
    }

    /// The motion value for `key`, created on first access from `fallback`,
    /// then the latest known value, then the property's initial value.
    pub fn get_value(
        &mut self,
        key: AnimatableProperty,
        fallback: Option<AnimatableValue>,
    ) -> &mut MotionValue {
        let latest = &self.latest_values;
        self.values.entry(key).or_insert_with(|| {
            let initial = fallback
                .or_else(|| latest.get(&key).cloned())
                .unwrap_or_else(|| key.initial_value());
            MotionValue::new(initial)
        })
    }

    pub fn value(&self, key: AnimatableProperty) -> Option<&MotionValue> {
        self.values.get(&key)
    }

    pub fn has_value(&self, key: AnimatableProperty) -> bool {
        self.values.contains_key(&key)
    }

    /// Current value of `key`, whether or not a motion value exists yet.
    pub fn latest(&self, key: AnimatableProperty) -> Option<&AnimatableValue> {
        self.values
            .get(&key)
            .map(MotionValue::get)
            .or_else(|| self.latest_values.get(&key))
    }

    /// Snapshot of every known value.
    pub fn latest_values(&self) -> HashMap<AnimatableProperty, AnimatableValue> {
        let mut snapshot = self.latest_values.clone();
        for (key, value) in &self.values {
            snapshot.insert(*key, value.get().clone());
        }
        snapshot
    }

    /// Assign every defined entry of `target` directly, without animating.
    /// Keyframe targets assign their final keyframe.
    pub fn set_target(&mut self, target: &Target) {
        for (key, value) in target.iter() {
            if let Some(value) = value {
                self.get_value(key, None).set(value.final_value().clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_will_change_dedupes() {
        let will_change = WillChange::new();
        let shared = will_change.clone();
        will_change.add(AnimatableProperty::X);
        will_change.add(AnimatableProperty::X);
        will_change.add(AnimatableProperty::Opacity);
        assert_eq!(shared.keys(), vec![AnimatableProperty::X, AnimatableProperty::Opacity]);

        shared.remove(AnimatableProperty::X);
        assert!(!will_change.contains(AnimatableProperty::X));
        shared.remove(AnimatableProperty::Opacity);
        assert!(will_change.is_empty());
    }

    #[test]
    fn test_nodes_sharing_an_id_have_distinct_keys() {
        let a = VisualNode::new("item");
        let b = VisualNode::new("item");
        assert_eq!(a.id(), b.id());
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_get_value_fallback_order() {
        let mut node = VisualNode::new("n").with_value(AnimatableProperty::X, 5.0);

        assert_eq!(
            node.get_value(AnimatableProperty::X, None).get(),
            &AnimatableValue::F64(5.0)
        );
        assert_eq!(
            node.get_value(AnimatableProperty::Y, Some(AnimatableValue::F64(2.0))).get(),
            &AnimatableValue::F64(2.0)
        );
        assert_eq!(
            node.get_value(AnimatableProperty::Opacity, None).get(),
            &AnimatableValue::F64(1.0)
        );

        // Existing values ignore the fallback.
        assert_eq!(
            node.get_value(AnimatableProperty::X, Some(AnimatableValue::F64(9.0))).get(),
            &AnimatableValue::F64(5.0)
        );
    }

    #[test]
    fn test_initial_props_seed_latest_values() {
        let props = MotionProps {
            initial: Some(Initial::Target(Target::new().with(AnimatableProperty::Opacity, 0.0))),
            ..Default::default()
        };
        let node = VisualNode::new("n").with_props(props);

        assert!(node.props().declares_initial());
        assert_eq!(node.latest(AnimatableProperty::Opacity), Some(&AnimatableValue::F64(0.0)));
        assert!(!node.has_value(AnimatableProperty::Opacity));
    }

    #[test]
    fn test_initial_false_is_not_declared() {
        let props = MotionProps {
            initial: Some(Initial::Disabled),
            ..Default::default()
        };
        assert!(!props.declares_initial());
        assert!(!MotionProps::default().declares_initial());
    }

    #[test]
    fn test_set_target_uses_final_keyframe() {
        let mut node = VisualNode::new("n");
        let target = Target::new()
            .with(
                AnimatableProperty::X,
                AnimatableValue::Keyframes(vec![AnimatableValue::F64(1.0), AnimatableValue::F64(7.0)]),
            )
            .with_undefined(AnimatableProperty::Y);

        node.set_target(&target);
        assert_eq!(node.latest(AnimatableProperty::X), Some(&AnimatableValue::F64(7.0)));
        assert!(!node.has_value(AnimatableProperty::Y));
        assert_eq!(node.latest_values().len(), 1);
    }

    #[test]
    fn test_animation_state_declares_prop_keys() {
        let props = MotionProps {
            animate: Some(Target::new().with(AnimatableProperty::X, 10.0).into()),
            while_hover: Some(Target::new().with(AnimatableProperty::Scale, 1.1).into()),
            ..Default::default()
        };
        let mut node = VisualNode::new("n").with_props(props).with_animation_state();

        let state = node.animation_state_mut().unwrap();
        state.set_active(AnimationType::Hover, true);

        let hover = state.type_state(AnimationType::Hover).unwrap();
        assert!(hover.declared_keys.contains(&AnimatableProperty::Scale));
        let animate = state.type_state(AnimationType::Animate).unwrap();
        assert!(animate.protected_keys.contains(&AnimatableProperty::Scale));
    }
}
