//! Seams between the animator and the code that actually runs animations.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;

use crate::handle::AnimationHandle;
use crate::node::{NodeKey, VisualNode};
use crate::transition::ResolvedTransition;
use crate::types::{AnimatableProperty, AnimatableValue};
use crate::value::MotionValue;

/// Everything a driver needs to start one value animation.
pub struct StartRequest<'a> {
    pub node_id: &'a str,
    /// Identity of the owning node; `node_id` may be shared by several nodes.
    pub node_key: NodeKey,
    /// The owning node, for drivers that write samples back later.
    pub node: Weak<RefCell<VisualNode>>,
    pub property: AnimatableProperty,
    pub value: &'a mut MotionValue,
    pub target: &'a AnimatableValue,
    /// May be [`ResolvedTransition::instant`].
    pub transition: &'a ResolvedTransition,
    /// The animation continues one already running outside this engine.
    pub is_handoff: bool,
}

/// Starts per-value animations.
pub trait AnimationDriver {
    /// Start animating `request.value` towards `request.target`.
    ///
    /// Returns `None` when nothing is left running, for example when an
    /// instant transition assigned the target directly.
    ///
    /// Called with the node mutably borrowed. Implementations must not settle
    /// any handle here, since settle callbacks may borrow the node; replaced
    /// animations are cancelled by the caller afterwards.
    fn start(&mut self, request: StartRequest<'_>) -> Option<AnimationHandle>;
}

/// Looks up appear animations started before this engine took over.
pub trait HandoffRegistry {
    /// Time the appear animation `appear_id` has already spent on `property`.
    fn elapsed_ms(&self, appear_id: &str, property: AnimatableProperty) -> Option<f64>;
}

/// No appear animations ever run.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHandoff;

impl HandoffRegistry for NoHandoff {
    fn elapsed_ms(&self, _appear_id: &str, _property: AnimatableProperty) -> Option<f64> {
        None
    }
}

/// A fixed table of appear animations.
#[derive(Debug, Clone, Default)]
pub struct HandoffMap {
    elapsed: HashMap<(String, AnimatableProperty), f64>,
}

impl HandoffMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, appear_id: impl Into<String>, property: AnimatableProperty, elapsed_ms: f64) {
        self.elapsed.insert((appear_id.into(), property), elapsed_ms);
    }

    pub fn with(mut self, appear_id: impl Into<String>, property: AnimatableProperty, elapsed_ms: f64) -> Self {
        self.insert(appear_id, property, elapsed_ms);
        self
    }
}

impl HandoffRegistry for HandoffMap {
    fn elapsed_ms(&self, appear_id: &str, property: AnimatableProperty) -> Option<f64> {
        self.elapsed.get(&(appear_id.to_string(), property)).copied()
    }
}

impl<T: HandoffRegistry + ?Sized> HandoffRegistry for &T {
    fn elapsed_ms(&self, appear_id: &str, property: AnimatableProperty) -> Option<f64> {
        (**self).elapsed_ms(appear_id, property)
    }
}
