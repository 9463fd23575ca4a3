//! Motion values.

use crate::handle::AnimationHandle;
use crate::types::{AnimatableValue, AnimationType};

/// The live value of one property on a node.
///
/// At most one animation drives a value at a time; starting another cancels
/// the previous one.
#[derive(Debug, Clone)]
pub struct MotionValue {
    current: AnimatableValue,
    animation: Option<AnimationHandle>,
    current_animation_state: Option<AnimationType>,
}

impl MotionValue {
    pub fn new(initial: AnimatableValue) -> Self {
        Self {
            current: initial,
            animation: None,
            current_animation_state: None,
        }
    }

    pub fn get(&self) -> &AnimatableValue {
        &self.current
    }

    /// Assign without touching a running animation. Drivers write samples
    /// through this.
    pub fn set(&mut self, value: AnimatableValue) {
        self.current = value;
    }

    /// Stop any running animation, then assign.
    pub fn jump(&mut self, value: AnimatableValue) {
        self.stop();
        self.current = value;
    }

    /// Bind a newly started animation.
    ///
    /// Returns the unsettled animation it replaces. The caller cancels it
    /// once the owning node is no longer borrowed, since settle callbacks may
    /// read the node.
    #[must_use = "the replaced animation must be cancelled"]
    pub fn start(&mut self, animation: Option<AnimationHandle>) -> Option<AnimationHandle> {
        let previous = self.take_animation();
        self.animation = animation;
        previous.filter(|previous| {
            !self
                .animation
                .as_ref()
                .is_some_and(|next| next.ptr_eq(previous))
        })
    }

    /// Unbind the running animation without settling it.
    pub fn take_animation(&mut self) -> Option<AnimationHandle> {
        self.animation.take().filter(|handle| !handle.is_settled())
    }

    /// The running animation, if it has not settled.
    pub fn animation(&self) -> Option<&AnimationHandle> {
        self.animation.as_ref().filter(|handle| !handle.is_settled())
    }

    pub fn is_animating(&self) -> bool {
        self.animation().is_some()
    }

    /// Cancel the running animation, keeping the current value.
    pub fn stop(&mut self) {
        if let Some(animation) = self.animation.take() {
            animation.cancel();
        }
    }

    /// The animation type that last drove this value, `None` if it never
    /// animated.
    pub fn current_animation_state(&self) -> Option<AnimationType> {
        self.current_animation_state
    }

    pub fn set_current_animation_state(&mut self, state: AnimationType) {
        self.current_animation_state = Some(state);
    }
}
