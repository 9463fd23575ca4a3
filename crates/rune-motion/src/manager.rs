//! Reference animation driver.
//!
//! The `AnimationManager` runs every value animation started through it:
//! - tweens, eased and optionally repeated, including keyframe sequences
//! - damped springs, integrated with a fixed maximum step
//! - one animation per (node, property); a newer one cancels the older
//! - samples are written back into the node's motion values each update
//!
//! # Usage
//!
//! ```ignore
//! let mut animator = TargetAnimator::new(AnimationManager::new(), batch.clone());
//! animator.animate_target(&node, &request, AnimateOptions::default());
//!
//! // Each frame: tick, then flush deferred side effects.
//! animator.driver_mut().update(16.0);
//! batch.flush();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;

use crate::driver::{AnimationDriver, StartRequest};
use crate::easing::EasingFunction;
use crate::events::{EventQueue, MotionEvent};
use crate::handle::AnimationHandle;
use crate::interpolate::Interpolate;
use crate::node::{NodeKey, VisualNode};
use crate::transition::ResolvedKind;
use crate::types::{AnimatableProperty, AnimatableValue, AnimationId, PlaybackState};

/// Maximum integration step for springs, in seconds.
const MAX_STEP_SECS: f64 = 0.004;
/// Distance from the target under which a spring may come to rest.
const REST_THRESHOLD: f64 = 0.001;
/// Speed under which a spring may come to rest.
const VELOCITY_THRESHOLD: f64 = 0.01;
/// Longer gaps settle a spring outright instead of integrating them.
const MAX_SPRING_ADVANCE_SECS: f64 = 10.0;
const MIN_STIFFNESS: f64 = 0.1;
const MIN_MASS: f64 = 0.01;

/// Damped spring over normalized progress, moving from 0 towards 1.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SpringState {
    position: f64,
    velocity: f64,
    stiffness: f64,
    damping: f64,
    mass: f64,
}

impl SpringState {
    fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            stiffness: stiffness.max(MIN_STIFFNESS),
            damping: damping.max(0.0),
            mass: mass.max(MIN_MASS),
        }
    }

    /// Semi-implicit Euler.
    fn step(&mut self, dt: f64) {
        let displacement = self.position - 1.0;
        let force = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += force / self.mass * dt;
        self.position += self.velocity * dt;
    }

    fn advance(&mut self, delta_ms: f64) {
        let mut remaining = delta_ms / 1000.0;
        if remaining > MAX_SPRING_ADVANCE_SECS {
            self.position = 1.0;
            self.velocity = 0.0;
            return;
        }
        while remaining > 0.0 {
            let dt = remaining.min(MAX_STEP_SECS);
            self.step(dt);
            remaining -= dt;
        }
        if self.is_at_rest() {
            self.position = 1.0;
            self.velocity = 0.0;
        }
    }

    fn is_at_rest(&self) -> bool {
        (1.0 - self.position).abs() < REST_THRESHOLD && self.velocity.abs() < VELOCITY_THRESHOLD
    }
}

#[derive(Debug, Clone)]
enum Motion {
    Tween {
        duration_ms: f64,
        ease: EasingFunction,
        repeat: u32,
    },
    Spring(SpringState),
}

/// Runtime state of one value animation.
#[derive(Debug)]
struct ActiveAnimation {
    handle: AnimationHandle,
    node: Weak<RefCell<VisualNode>>,
    node_key: NodeKey,
    node_id: String,
    property: AnimatableProperty,
    from: AnimatableValue,
    to: AnimatableValue,
    motion: Motion,
    /// Delay still to wait out.
    delay_ms: f64,
    elapsed_ms: f64,
    /// Eased progress, may overshoot for springs.
    progress: f64,
    done: bool,
    /// Replaced by a newer animation of the same value; cancelled at the
    /// next update.
    superseded: bool,
}

impl ActiveAnimation {
    fn is_live(&self) -> bool {
        !self.superseded && !self.handle.is_settled()
    }

    fn is_waiting(&self) -> bool {
        self.delay_ms > 0.0
    }

    /// Advance by `delta_ms`, consuming the delay first.
    fn tick(&mut self, delta_ms: f64) {
        let mut delta = delta_ms.max(0.0);
        if self.delay_ms > 0.0 {
            let consumed = delta.min(self.delay_ms);
            self.delay_ms -= consumed;
            delta -= consumed;
            if self.delay_ms > 0.0 {
                return;
            }
        }
        if self.handle.state() == PlaybackState::Pending {
            self.handle.settle(PlaybackState::Running);
        }

        self.elapsed_ms += delta;
        match &mut self.motion {
            Motion::Tween {
                duration_ms,
                ease,
                repeat,
            } => {
                let duration = *duration_ms;
                let total = duration * (*repeat as f64 + 1.0);
                if duration <= 0.0 || self.elapsed_ms >= total {
                    self.progress = 1.0;
                    self.done = true;
                } else {
                    let linear = (self.elapsed_ms % duration) / duration;
                    self.progress = ease.evaluate(linear);
                }
            }
            Motion::Spring(spring) => {
                spring.advance(delta);
                self.progress = spring.position;
                self.done = spring.is_at_rest();
            }
        }
    }

    fn current_value(&self) -> AnimatableValue {
        self.from.interpolate(&self.to, self.progress)
    }

    /// Write the current sample into the node. Returns false if the node is
    /// gone.
    fn write_sample(&self) -> bool {
        let Some(node) = self.node.upgrade() else {
            return false;
        };
        match node.try_borrow_mut() {
            Ok(mut node) => {
                node.get_value(self.property, None).set(self.current_value());
            }
            Err(_) => {
                tracing::warn!(
                    node_id = %self.node_id,
                    property = %self.property,
                    "node borrowed during update, sample dropped"
                );
            }
        }
        true
    }
}

/// Runs value animations and writes their samples into nodes.
#[derive(Debug, Default)]
pub struct AnimationManager {
    animations: HashMap<AnimationId, ActiveAnimation>,

    /// Only one animation is active per (node, property) pair.
    node_property_index: HashMap<(NodeKey, AnimatableProperty), AnimationId>,

    event_queue: EventQueue,
}

impl AnimationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an animation for `request`.
    ///
    /// Instant transitions assign the final target and return `None`.
    /// Any animation already running for the same node and property is
    /// superseded: it stops writing samples at once and settles as
    /// `Cancelled` at the next [`update`](Self::update). Nothing settles
    /// here, so the caller may hold the node borrowed.
    pub fn start_animation(&mut self, request: StartRequest<'_>) -> Option<AnimationHandle> {
        let StartRequest {
            node_id,
            node_key,
            node,
            property,
            value,
            target,
            transition,
            is_handoff,
        } = request;

        let motion = match transition.kind {
            ResolvedKind::Instant => {
                self.supersede(node_key, property);
                value.set(target.final_value().clone());
                return None;
            }
            ResolvedKind::Tween { duration_ms, ease } => Motion::Tween {
                duration_ms,
                ease,
                repeat: transition.repeat,
            },
            ResolvedKind::Spring {
                stiffness,
                damping,
                mass,
            } => Motion::Spring(SpringState::new(stiffness, damping, mass)),
        };

        let from = transition
            .from
            .as_ref()
            .map(|from| from.final_value().clone())
            .unwrap_or_else(|| value.get().clone());

        let id = AnimationId::new();
        let handle = AnimationHandle::new(id);
        let mut animation = ActiveAnimation {
            handle: handle.clone(),
            node,
            node_key,
            node_id: node_id.to_string(),
            property,
            from,
            to: target.clone(),
            motion,
            delay_ms: transition.delay_ms.max(0.0),
            elapsed_ms: 0.0,
            progress: 0.0,
            done: false,
            superseded: false,
        };
        if transition.elapsed_ms > 0.0 {
            animation.tick(transition.elapsed_ms);
        }

        self.supersede(node_key, property);
        self.node_property_index.insert((node_key, property), id);

        tracing::trace!(
            ?id,
            node_id,
            %property,
            delay_ms = transition.delay_ms,
            is_handoff,
            "animation started"
        );
        self.event_queue.push(MotionEvent::Started {
            animation_id: id,
            node_id: node_id.to_string(),
            property,
            is_handoff,
        });
        self.animations.insert(id, animation);

        Some(handle)
    }

    fn supersede(&mut self, node: NodeKey, property: AnimatableProperty) {
        let Some(previous) = self.node_property_index.remove(&(node, property)) else {
            return;
        };
        if let Some(previous) = self.animations.get_mut(&previous) {
            previous.superseded = true;
        }
    }

    /// Advance every animation by `delta_ms`.
    ///
    /// Call once per frame. Finished animations settle their handles, which
    /// runs their completion callbacks before this returns.
    pub fn update(&mut self, delta_ms: f64) {
        if self.animations.is_empty() {
            return;
        }

        let mut settled = Vec::new();
        for (id, animation) in self.animations.iter_mut() {
            if animation.superseded {
                settled.push((*id, PlaybackState::Cancelled));
                continue;
            }
            match animation.handle.state() {
                PlaybackState::Finished | PlaybackState::Cancelled => {
                    settled.push((*id, animation.handle.state()));
                    continue;
                }
                PlaybackState::Paused => continue,
                PlaybackState::Pending | PlaybackState::Running => {}
            }

            animation.tick(delta_ms);
            if animation.is_waiting() {
                continue;
            }
            if !animation.write_sample() {
                settled.push((*id, PlaybackState::Cancelled));
            } else if animation.done {
                settled.push((*id, PlaybackState::Finished));
            }
        }

        settled.sort_by_key(|(id, _)| id.0);
        for (id, state) in settled {
            self.finish(id, state);
        }
    }

    fn finish(&mut self, id: AnimationId, state: PlaybackState) {
        let Some(animation) = self.animations.remove(&id) else {
            return;
        };
        let key = (animation.node_key, animation.property);
        if self.node_property_index.get(&key) == Some(&id) {
            self.node_property_index.remove(&key);
        }

        animation.handle.settle(state);
        let event = match animation.handle.state() {
            PlaybackState::Finished => MotionEvent::Ended {
                animation_id: id,
                node_id: animation.node_id,
                property: animation.property,
            },
            _ => MotionEvent::Cancelled {
                animation_id: id,
                node_id: animation.node_id,
                property: animation.property,
            },
        };
        self.event_queue.push(event);
    }

    /// The value an animation would currently write, if one is running.
    pub fn get_animated_value(
        &self,
        node: NodeKey,
        property: AnimatableProperty,
    ) -> Option<AnimatableValue> {
        let id = self.node_property_index.get(&(node, property))?;
        self.animations
            .get(id)
            .filter(|animation| animation.is_live())
            .map(ActiveAnimation::current_value)
    }

    pub fn is_animating(&self, node: NodeKey, property: AnimatableProperty) -> bool {
        self.get_animated_value(node, property).is_some()
    }

    pub fn cancel(&mut self, id: AnimationId) {
        if let Some(animation) = self.animations.get(&id) {
            animation.handle.cancel();
        }
    }

    pub fn cancel_all_for_node(&mut self, node: NodeKey) {
        for id in self.ids_for_node(node) {
            self.cancel(id);
        }
    }

    pub fn pause_all_for_node(&mut self, node: NodeKey) {
        for id in self.ids_for_node(node) {
            if let Some(animation) = self.animations.get(&id) {
                animation.handle.pause();
            }
        }
    }

    pub fn resume_all_for_node(&mut self, node: NodeKey) {
        for id in self.ids_for_node(node) {
            if let Some(animation) = self.animations.get(&id) {
                animation.handle.resume();
            }
        }
    }

    fn ids_for_node(&self, node: NodeKey) -> Vec<AnimationId> {
        self.node_property_index
            .iter()
            .filter(|((key, _), _)| *key == node)
            .map(|(_, id)| *id)
            .collect()
    }

    pub fn has_active_animations(&self) -> bool {
        self.animations
            .values()
            .any(ActiveAnimation::is_live)
    }

    /// Animations that have not settled.
    pub fn active_count(&self) -> usize {
        self.animations
            .values()
            .filter(|animation| animation.is_live())
            .count()
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        for animation in self.animations.values() {
            animation.handle.cancel();
        }
        self.animations.clear();
        self.node_property_index.clear();
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = MotionEvent> + '_ {
        self.event_queue.drain()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.event_queue.is_empty()
    }

    pub fn events_for_node(&self, node_id: &str) -> Vec<&MotionEvent> {
        self.event_queue.events_for_node(node_id)
    }
}

impl AnimationDriver for AnimationManager {
    fn start(&mut self, request: StartRequest<'_>) -> Option<AnimationHandle> {
        self.start_animation(request)
    }
}

// Handles and node references are `Rc`-based; the manager lives on the UI thread.
static_assertions::assert_not_impl_any!(AnimationManager: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeHandle;
    use crate::transition::ResolvedTransition;
    use std::rc::Rc;

    fn tween(duration_ms: f64) -> ResolvedTransition {
        ResolvedTransition {
            kind: ResolvedKind::Tween {
                duration_ms,
                ease: EasingFunction::Linear,
            },
            ..ResolvedTransition::instant()
        }
    }

    fn start(
        manager: &mut AnimationManager,
        node: &NodeHandle,
        property: AnimatableProperty,
        target: AnimatableValue,
        transition: ResolvedTransition,
    ) -> Option<AnimationHandle> {
        let mut guard = node.borrow_mut();
        let node_id = guard.id().to_string();
        let node_key = guard.key();
        let value = guard.get_value(property, None);
        let handle = manager.start(StartRequest {
            node_id: &node_id,
            node_key,
            node: Rc::downgrade(node),
            property,
            value,
            target: &target,
            transition: &transition,
            is_handoff: false,
        });
        let replaced = guard.get_value(property, None).start(handle.clone());
        drop(guard);
        if let Some(replaced) = replaced {
            replaced.cancel();
        }
        handle
    }

    fn opacity(node: &NodeHandle) -> f64 {
        node.borrow()
            .latest(AnimatableProperty::Opacity)
            .and_then(AnimatableValue::as_f64)
            .unwrap()
    }

    fn node() -> NodeHandle {
        VisualNode::new("node1")
            .with_value(AnimatableProperty::Opacity, 0.0)
            .into_handle()
    }

    #[test]
    fn test_tween_writes_samples() {
        let mut manager = AnimationManager::new();
        let node = node();
        let handle = start(
            &mut manager,
            &node,
            AnimatableProperty::Opacity,
            AnimatableValue::F64(100.0),
            tween(100.0),
        )
        .unwrap();

        assert!(manager.has_active_animations());
        manager.update(50.0);
        assert!((opacity(&node) - 50.0).abs() < 1e-9);
        assert_eq!(handle.state(), PlaybackState::Running);

        manager.update(60.0);
        assert_eq!(opacity(&node), 100.0);
        assert_eq!(handle.state(), PlaybackState::Finished);
        assert!(!manager.has_active_animations());

        let events: Vec<_> = manager.drain_events().collect();
        assert!(matches!(events[0], MotionEvent::Started { .. }));
        assert!(events[1].is_ended());
    }

    #[test]
    fn test_instant_assigns_directly() {
        let mut manager = AnimationManager::new();
        let node = node();
        let handle = start(
            &mut manager,
            &node,
            AnimatableProperty::Opacity,
            AnimatableValue::F64(0.7),
            ResolvedTransition::instant(),
        );

        assert!(handle.is_none());
        assert_eq!(opacity(&node), 0.7);
        assert_eq!(manager.active_count(), 0);
    }

    #[test]
    fn test_delay_holds_value() {
        let mut manager = AnimationManager::new();
        let node = node();
        let transition = ResolvedTransition {
            delay_ms: 100.0,
            ..tween(100.0)
        };
        let handle = start(
            &mut manager,
            &node,
            AnimatableProperty::Opacity,
            AnimatableValue::F64(1.0),
            transition,
        )
        .unwrap();

        manager.update(80.0);
        assert_eq!(opacity(&node), 0.0);
        assert_eq!(handle.state(), PlaybackState::Pending);

        manager.update(70.0);
        assert!((opacity(&node) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_explicit_from() {
        let mut manager = AnimationManager::new();
        let node = node();
        let transition = ResolvedTransition {
            from: Some(AnimatableValue::F64(10.0)),
            ..tween(100.0)
        };
        start(
            &mut manager,
            &node,
            AnimatableProperty::Opacity,
            AnimatableValue::F64(20.0),
            transition,
        );

        manager.update(50.0);
        assert!((opacity(&node) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_handoff_elapsed_skips_ahead() {
        let mut manager = AnimationManager::new();
        let node = node();
        let transition = ResolvedTransition {
            elapsed_ms: 75.0,
            ..tween(100.0)
        };
        start(
            &mut manager,
            &node,
            AnimatableProperty::Opacity,
            AnimatableValue::F64(100.0),
            transition,
        );

        manager.update(0.0);
        assert!((opacity(&node) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_newer_animation_cancels_older() {
        let mut manager = AnimationManager::new();
        let node = node();
        let first = start(
            &mut manager,
            &node,
            AnimatableProperty::Opacity,
            AnimatableValue::F64(1.0),
            tween(100.0),
        )
        .unwrap();
        manager.update(50.0);

        let second = start(
            &mut manager,
            &node,
            AnimatableProperty::Opacity,
            AnimatableValue::F64(0.0),
            tween(100.0),
        )
        .unwrap();
        assert_eq!(first.state(), PlaybackState::Cancelled);

        manager.update(50.0);
        assert_eq!(manager.active_count(), 1);
        assert!((opacity(&node) - 0.25).abs() < 1e-9);

        let cancelled = manager.drain_events().filter(MotionEvent::is_cancelled).count();
        assert_eq!(cancelled, 1);
        assert!(!second.is_settled());
    }

    #[test]
    fn test_spring_settles_on_target() {
        let mut manager = AnimationManager::new();
        let node = node();
        let spring = ResolvedTransition {
            kind: ResolvedKind::Spring {
                stiffness: 500.0,
                damping: 25.0,
                mass: 1.0,
            },
            ..ResolvedTransition::instant()
        };
        let handle = start(
            &mut manager,
            &node,
            AnimatableProperty::Opacity,
            AnimatableValue::F64(1.0),
            spring,
        )
        .unwrap();

        let mut overshot = false;
        for _ in 0..120 {
            manager.update(16.0);
            overshot |= opacity(&node) > 1.0;
        }
        assert!(overshot);
        assert_eq!(handle.state(), PlaybackState::Finished);
        assert_eq!(opacity(&node), 1.0);
    }

    #[test]
    fn test_repeat_runs_extra_iterations() {
        let mut manager = AnimationManager::new();
        let node = node();
        let transition = ResolvedTransition {
            repeat: 1,
            ..tween(100.0)
        };
        let handle = start(
            &mut manager,
            &node,
            AnimatableProperty::Opacity,
            AnimatableValue::F64(1.0),
            transition,
        )
        .unwrap();

        manager.update(150.0);
        assert!(!handle.is_settled());
        assert!((opacity(&node) - 0.5).abs() < 1e-9);

        manager.update(60.0);
        assert_eq!(handle.state(), PlaybackState::Finished);
    }

    #[test]
    fn test_pause_and_resume_node() {
        let mut manager = AnimationManager::new();
        let node = node();
        start(
            &mut manager,
            &node,
            AnimatableProperty::Opacity,
            AnimatableValue::F64(1.0),
            tween(100.0),
        );

        let key = node.borrow().key();
        manager.update(20.0);
        manager.pause_all_for_node(key);
        manager.update(50.0);
        assert!((opacity(&node) - 0.2).abs() < 1e-9);

        manager.resume_all_for_node(key);
        manager.update(30.0);
        assert!((opacity(&node) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_dropped_node_cancels() {
        let mut manager = AnimationManager::new();
        let node = node();
        let handle = start(
            &mut manager,
            &node,
            AnimatableProperty::Opacity,
            AnimatableValue::F64(1.0),
            tween(100.0),
        )
        .unwrap();

        drop(node);
        manager.update(16.0);
        assert_eq!(handle.state(), PlaybackState::Cancelled);
        assert_eq!(manager.active_count(), 0);
    }

    #[test]
    fn test_cancel_all_for_node() {
        let mut manager = AnimationManager::new();
        let node = node();
        let handle = start(
            &mut manager,
            &node,
            AnimatableProperty::Opacity,
            AnimatableValue::F64(1.0),
            tween(100.0),
        )
        .unwrap();

        let key = node.borrow().key();
        manager.cancel_all_for_node(key);
        assert_eq!(handle.state(), PlaybackState::Cancelled);
        assert!(!manager.is_animating(key, AnimatableProperty::Opacity));
        manager.update(16.0);
        assert_eq!(manager.events_for_node("node1").len(), 2);
    }

    #[test]
    fn test_superseded_animation_settles_on_next_update() {
        let mut manager = AnimationManager::new();
        let node = node();
        let first = start(
            &mut manager,
            &node,
            AnimatableProperty::Opacity,
            AnimatableValue::F64(1.0),
            tween(100.0),
        )
        .unwrap();
        manager.update(50.0);

        let seen = Rc::new(std::cell::Cell::new(None));
        {
            let node = Rc::downgrade(&node);
            let seen = seen.clone();
            first.on_settle(move |_| {
                let node = node.upgrade().unwrap();
                let opacity = node
                    .borrow()
                    .latest(AnimatableProperty::Opacity)
                    .and_then(AnimatableValue::as_f64);
                seen.set(opacity);
            });
        }

        // Start the replacement without the helper, keeping the node borrowed
        // and leaving the old handle bound to the value.
        let second = {
            let mut guard = node.borrow_mut();
            let node_key = guard.key();
            let target = AnimatableValue::F64(0.0);
            let transition = tween(100.0);
            manager
                .start(StartRequest {
                    node_id: "node1",
                    node_key,
                    node: Rc::downgrade(&node),
                    property: AnimatableProperty::Opacity,
                    value: guard.get_value(AnimatableProperty::Opacity, None),
                    target: &target,
                    transition: &transition,
                    is_handoff: false,
                })
                .unwrap()
        };
        assert!(!first.is_settled());
        let key = node.borrow().key();
        assert_eq!(
            manager.get_animated_value(key, AnimatableProperty::Opacity),
            Some(AnimatableValue::F64(0.5))
        );
        assert_eq!(manager.active_count(), 1);

        manager.update(0.0);
        assert_eq!(first.state(), PlaybackState::Cancelled);
        assert_eq!(seen.get(), Some(0.5));
        assert!(!second.is_settled());
    }

    #[test]
    fn test_nodes_sharing_an_id_animate_independently() {
        let mut manager = AnimationManager::new();
        let a = node();
        let b = node();
        let first = start(
            &mut manager,
            &a,
            AnimatableProperty::Opacity,
            AnimatableValue::F64(1.0),
            tween(100.0),
        )
        .unwrap();
        let second = start(
            &mut manager,
            &b,
            AnimatableProperty::Opacity,
            AnimatableValue::F64(1.0),
            tween(200.0),
        )
        .unwrap();

        manager.update(50.0);
        assert_eq!(first.state(), PlaybackState::Running);
        assert_eq!(manager.active_count(), 2);
        assert!((opacity(&a) - 0.5).abs() < 1e-9);
        assert!((opacity(&b) - 0.25).abs() < 1e-9);

        manager.cancel_all_for_node(b.borrow().key());
        assert_eq!(second.state(), PlaybackState::Cancelled);
        assert!(!first.is_settled());
        assert!(manager.is_animating(a.borrow().key(), AnimatableProperty::Opacity));
    }

    #[test]
    fn test_huge_delta_settles_spring_at_once() {
        let mut manager = AnimationManager::new();
        let node = node();
        let spring = ResolvedTransition {
            kind: ResolvedKind::Spring {
                stiffness: 100.0,
                damping: 10.0,
                mass: 1.0,
            },
            ..ResolvedTransition::instant()
        };
        let handle = start(
            &mut manager,
            &node,
            AnimatableProperty::Opacity,
            AnimatableValue::F64(1.0),
            spring,
        )
        .unwrap();

        manager.update(1e12);
        assert_eq!(handle.state(), PlaybackState::Finished);
        assert_eq!(opacity(&node), 1.0);
    }
}
