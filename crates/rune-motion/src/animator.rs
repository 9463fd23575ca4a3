//! Target animation.
//!
//! [`TargetAnimator::animate_target`] takes a node and a requested target
//! state and starts one value animation per key that is allowed to move:
//!
//! 1. keys with an undefined target, or blocked by the node's animation
//!    state, are skipped
//! 2. the transition is picked (`transition_from`, override, request,
//!    node default) and resolved per key
//! 3. appear animations already running elsewhere are handed off
//! 4. reduced motion snaps transform keys
//! 5. the driver starts the animation; will-change hints follow its handle
//!
//! Once every started animation settles, `transition_end` is assigned
//! directly at the next frame flush.

use std::rc::Rc;

use rune_config::MotionConfig;

use crate::arbiter::should_block;
use crate::driver::{AnimationDriver, HandoffRegistry, NoHandoff, StartRequest};
use crate::frame::FrameScheduler;
use crate::handle::{AnimationHandle, CompletionJoin};
use crate::node::{MotionProps, NodeHandle};
use crate::resolver::{MotionDefaults, TransitionResolver};
use crate::target::{Target, TargetAndTransition};
use crate::transition::{ResolvedTransition, Transition};
use crate::types::AnimationType;

/// Per-call options for [`TargetAnimator::animate_target`].
#[derive(Debug, Clone, Default)]
pub struct AnimateOptions {
    /// Applied to every key whose transition sets no delay of its own.
    pub delay_ms: f64,
    /// Replaces the request's transition.
    pub transition_override: Option<Transition>,
    /// The animation type driving this call. `None` means `Animate` and skips
    /// arbitration.
    pub animation_type: Option<AnimationType>,
}

impl AnimateOptions {
    pub fn of_type(animation_type: AnimationType) -> Self {
        Self {
            animation_type: Some(animation_type),
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_override(mut self, transition: Transition) -> Self {
        self.transition_override = Some(transition);
        self
    }
}

/// Starts value animations for target states.
#[derive(Debug)]
pub struct TargetAnimator<D, S, H = NoHandoff> {
    driver: D,
    scheduler: S,
    handoff: H,
    resolver: TransitionResolver,
    /// Reduced motion for every node, on top of each node's own flag.
    reduce_motion: bool,
}

impl<D, S> TargetAnimator<D, S>
where
    D: AnimationDriver,
    S: FrameScheduler + Clone + 'static,
{
    pub fn new(driver: D, scheduler: S) -> Self {
        Self {
            driver,
            scheduler,
            handoff: NoHandoff,
            resolver: TransitionResolver::default(),
            reduce_motion: false,
        }
    }
}

impl<D, S, H> TargetAnimator<D, S, H>
where
    D: AnimationDriver,
    S: FrameScheduler + Clone + 'static,
    H: HandoffRegistry,
{
    /// Hand off from appear animations listed in `handoff`.
    pub fn with_handoff<R: HandoffRegistry>(self, handoff: R) -> TargetAnimator<D, S, R> {
        TargetAnimator {
            driver: self.driver,
            scheduler: self.scheduler,
            handoff,
            resolver: self.resolver,
            reduce_motion: self.reduce_motion,
        }
    }

    pub fn with_defaults(mut self, defaults: MotionDefaults) -> Self {
        self.resolver = TransitionResolver::new(defaults);
        self
    }

    /// Take transition defaults and the reduced-motion preference from config.
    pub fn with_config(mut self, config: &MotionConfig) -> Self {
        self.resolver = TransitionResolver::new(MotionDefaults::from(config));
        self.reduce_motion = config.reduced_motion;
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn resolver(&self) -> &TransitionResolver {
        &self.resolver
    }

    /// Animate `node` towards `request`.
    ///
    /// Returns the handles of the animations actually started, in target key
    /// order. Skipped keys and instant assignments contribute none.
    ///
    /// The node stays borrowed while the driver starts each value, so drivers
    /// must neither borrow it nor settle handles from `start`. Animations
    /// replaced by this call are cancelled once the borrow is released.
    pub fn animate_target(
        &mut self,
        node: &NodeHandle,
        request: &TargetAndTransition,
        options: AnimateOptions,
    ) -> Vec<AnimationHandle> {
        let AnimateOptions {
            delay_ms,
            transition_override,
            animation_type,
        } = options;

        let mut handles = Vec::new();
        let mut started_keys = Vec::new();
        let mut superseded = Vec::new();
        let will_change;
        {
            let mut guard = node.borrow_mut();
            let node_ref = &mut *guard;
            let node_id = node_ref.id().to_string();
            let node_key = node_ref.key();
            will_change = node_ref.will_change().cloned();
            let reduce_motion = self.reduce_motion || node_ref.should_reduce_motion();

            for (key, target) in request.target.iter() {
                node_ref.get_value(key, None);

                let Some(target) = target else {
                    tracing::trace!(node_id = %node_id, property = %key, "undefined target, skipped");
                    continue;
                };
                let blocked = match (animation_type, node_ref.animation_state_mut()) {
                    (Some(ty), Some(state)) => state
                        .type_state_mut(ty)
                        .is_some_and(|type_state| should_block(type_state, key)),
                    _ => false,
                };
                if blocked {
                    tracing::trace!(
                        node_id = %node_id,
                        property = %key,
                        ?animation_type,
                        "blocked by higher priority animation"
                    );
                    continue;
                }

                let previous_type = node_ref
                    .value(key)
                    .and_then(|value| value.current_animation_state());
                let from_transition = request.transition_from.as_ref().and_then(|from| {
                    let label =
                        from_label(previous_type, node_ref.props(), animation_type);
                    from.get(&label)
                });
                let transition = from_transition
                    .or(transition_override.as_ref())
                    .or(request.transition.as_ref());

                let mut resolved = self.resolver.resolve(
                    transition,
                    node_ref.default_transition(),
                    key,
                    target,
                    delay_ms,
                );

                let mut is_handoff = false;
                if previous_type.is_none() {
                    let elapsed = node_ref
                        .props()
                        .appear_id
                        .as_deref()
                        .and_then(|appear_id| self.handoff.elapsed_ms(appear_id, key));
                    if let Some(elapsed) = elapsed {
                        resolved.elapsed_ms = elapsed;
                        is_handoff = true;
                    }
                }

                if reduce_motion && key.is_transform() {
                    resolved = ResolvedTransition::instant();
                }

                let value = node_ref.get_value(key, None);
                superseded.extend(value.take_animation());
                let handle = self.driver.start(StartRequest {
                    node_id: &node_id,
                    node_key,
                    node: Rc::downgrade(node),
                    property: key,
                    value: &mut *value,
                    target,
                    transition: &resolved,
                    is_handoff,
                });
                superseded.extend(value.start(handle.clone()));
                value.set_current_animation_state(animation_type.unwrap_or(AnimationType::Animate));

                let Some(handle) = handle else {
                    tracing::trace!(node_id = %node_id, property = %key, "assigned instantly");
                    continue;
                };
                tracing::debug!(
                    node_id = %node_id,
                    property = %key,
                    id = ?handle.id(),
                    delay_ms = resolved.delay_ms,
                    is_handoff,
                    "value animation started"
                );

                started_keys.push(key);
                handles.push(handle);
            }
        }

        for replaced in superseded {
            if !handles.iter().any(|handle: &AnimationHandle| handle.ptr_eq(&replaced)) {
                replaced.cancel();
            }
        }

        // After the cancels above, whose settle callbacks drop the same keys.
        if let Some(will_change) = will_change {
            for (&key, handle) in started_keys.iter().zip(&handles) {
                will_change.add(key);
                let will_change = will_change.clone();
                handle.on_settle(move |_| will_change.remove(key));
            }
        }

        if let Some(end) = request.transition_end.clone() {
            let scheduler = self.scheduler.clone();
            let node = Rc::downgrade(node);
            CompletionJoin::watch(&handles, move || {
                scheduler.schedule_update(Box::new(move || {
                    if let Some(node) = node.upgrade() {
                        set_target(&node, &end);
                    }
                }));
            });
        }

        handles
    }

    /// Assign `target` to `node` without animating.
    pub fn set_target(&self, node: &NodeHandle, target: &Target) {
        set_target(node, target);
    }
}

/// Assign every defined entry of `target` directly, without animating.
pub fn set_target(node: &NodeHandle, target: &Target) {
    match node.try_borrow_mut() {
        Ok(mut node) => {
            node.set_target(target);
            tracing::debug!(node_id = node.id(), keys = target.len(), "target assigned");
        }
        Err(_) => {
            tracing::warn!(keys = target.len(), "node borrowed, target not assigned");
        }
    }
}

/// The animation type a value counts as coming from when looking up
/// `transition_from`.
fn from_label(
    previous: Option<AnimationType>,
    props: &MotionProps,
    animation_type: Option<AnimationType>,
) -> AnimationType {
    match previous {
        Some(previous) => previous,
        None if props.declares_initial() || animation_type == Some(AnimationType::Animate) => {
            AnimationType::Initial
        }
        None => AnimationType::Animate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Initial;
    use crate::types::AnimatableProperty;

    #[test]
    fn test_from_label_prefers_previous_type() {
        let props = MotionProps::default();
        assert_eq!(
            from_label(Some(AnimationType::Hover), &props, Some(AnimationType::Animate)),
            AnimationType::Hover
        );
    }

    #[test]
    fn test_from_label_for_first_animation() {
        let plain = MotionProps::default();
        assert_eq!(from_label(None, &plain, None), AnimationType::Animate);
        assert_eq!(
            from_label(None, &plain, Some(AnimationType::Hover)),
            AnimationType::Animate
        );
        assert_eq!(
            from_label(None, &plain, Some(AnimationType::Animate)),
            AnimationType::Initial
        );

        let with_initial = MotionProps {
            initial: Some(Initial::Target(
                Target::new().with(AnimatableProperty::Opacity, 0.0),
            )),
            ..Default::default()
        };
        assert_eq!(
            from_label(None, &with_initial, Some(AnimationType::Hover)),
            AnimationType::Initial
        );

        let disabled = MotionProps {
            initial: Some(Initial::Disabled),
            ..Default::default()
        };
        assert_eq!(from_label(None, &disabled, None), AnimationType::Animate);
    }

    #[test]
    fn test_options_builders() {
        let options = AnimateOptions::of_type(AnimationType::Hover)
            .with_delay(40.0)
            .with_override(Transition::instant());
        assert_eq!(options.animation_type, Some(AnimationType::Hover));
        assert_eq!(options.delay_ms, 40.0);
        assert!(options.transition_override.is_some());
    }
}
