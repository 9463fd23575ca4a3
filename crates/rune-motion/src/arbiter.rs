//! Arbitration between animation types.
//!
//! Each animation type (hover, in-view, ...) has a [`TypeState`]. A key is
//! *protected* for a type while an active type of higher priority declares
//! it; requests from the lower type for that key are blocked until the
//! protection lifts.
//!
//! [`AnimationState`] owns the type states and recomputes protection when a
//! type toggles. [`should_block`] is the read side used while animating.

use std::collections::{HashMap, HashSet};

use crate::types::{AnimatableProperty, AnimationType};

/// Arbitration state for one animation type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeState {
    pub is_active: bool,
    /// Keys claimed by an active type of higher priority.
    pub protected_keys: HashSet<AnimatableProperty>,
    /// One-shot flags: the key lost protection and must animate back.
    pub needs_animating: HashMap<AnimatableProperty, bool>,
    /// Keys this type's target drives.
    pub declared_keys: HashSet<AnimatableProperty>,
}

impl TypeState {
    pub fn new(is_active: bool) -> Self {
        Self {
            is_active,
            ..Default::default()
        }
    }
}

/// Whether a request of this type for `key` must be suppressed.
///
/// Blocked iff the key is protected and not flagged as needing animation.
/// The flag is consumed either way: a second query in the same pass never
/// sees it.
pub fn should_block(state: &mut TypeState, key: AnimatableProperty) -> bool {
    let blocked =
        state.protected_keys.contains(&key) && state.needs_animating.get(&key) != Some(&true);
    state.needs_animating.insert(key, false);
    blocked
}

/// Per-node arbitration across all animation types.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    /// Lowest priority first.
    states: Vec<(AnimationType, TypeState)>,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationState {
    /// `Animate` starts active, every other type inactive.
    pub fn new() -> Self {
        let states = AnimationType::PRIORITY
            .iter()
            .map(|ty| (*ty, TypeState::new(*ty == AnimationType::Animate)))
            .collect();
        Self { states }
    }

    /// All type states, lowest priority first.
    pub fn get_state(&self) -> &[(AnimationType, TypeState)] {
        &self.states
    }

    pub fn type_state(&self, ty: AnimationType) -> Option<&TypeState> {
        self.states.iter().find(|(t, _)| *t == ty).map(|(_, s)| s)
    }

    pub fn type_state_mut(&mut self, ty: AnimationType) -> Option<&mut TypeState> {
        self.states.iter_mut().find(|(t, _)| *t == ty).map(|(_, s)| s)
    }

    pub fn is_active(&self, ty: AnimationType) -> bool {
        self.type_state(ty).is_some_and(|state| state.is_active)
    }

    /// Record the keys `ty` drives, replacing any previous declaration.
    pub fn declare_keys(
        &mut self,
        ty: AnimationType,
        keys: impl IntoIterator<Item = AnimatableProperty>,
    ) {
        let Some(state) = self.type_state_mut(ty) else {
            return;
        };
        state.declared_keys = keys.into_iter().collect();
        self.refresh_protection();
    }

    /// Activate or deactivate `ty`. Returns whether its status changed.
    pub fn set_active(&mut self, ty: AnimationType, active: bool) -> bool {
        let Some(state) = self.type_state_mut(ty) else {
            return false;
        };
        if state.is_active == active {
            return false;
        }
        state.is_active = active;
        tracing::trace!(?ty, active, "animation type toggled");
        self.refresh_protection();
        true
    }

    /// Recompute every type's protected keys, highest priority first.
    fn refresh_protection(&mut self) {
        let mut claimed: HashSet<AnimatableProperty> = HashSet::new();

        for (_, state) in self.states.iter_mut().rev() {
            let released: Vec<AnimatableProperty> = state
                .protected_keys
                .difference(&claimed)
                .filter(|key| state.declared_keys.contains(*key))
                .copied()
                .collect();
            for key in released {
                state.needs_animating.insert(key, true);
            }

            state.protected_keys = claimed.clone();
            if state.is_active {
                claimed.extend(state.declared_keys.iter().copied());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnimatableProperty::{Opacity, Scale, X};

    #[test]
    fn test_should_block_protected_key() {
        let mut state = TypeState::default();
        state.protected_keys.insert(X);
        state.needs_animating.insert(X, false);

        assert!(should_block(&mut state, X));
        assert!(!should_block(&mut state, Opacity));
    }

    #[test]
    fn test_should_block_consumes_flag() {
        let mut state = TypeState::default();
        state.protected_keys.insert(X);
        state.needs_animating.insert(X, true);

        assert!(!should_block(&mut state, X));
        assert_eq!(state.needs_animating.get(&X), Some(&false));
        assert!(should_block(&mut state, X));
        assert!(state.protected_keys.contains(&X));
    }

    #[test]
    fn test_should_block_unprotected_still_consumes() {
        let mut state = TypeState::default();
        state.needs_animating.insert(Opacity, true);
        assert!(!should_block(&mut state, Opacity));
        assert_eq!(state.needs_animating.get(&Opacity), Some(&false));
    }

    #[test]
    fn test_initial_activity() {
        let state = AnimationState::new();
        assert!(state.is_active(AnimationType::Animate));
        assert!(!state.is_active(AnimationType::Hover));
        assert!(state.type_state(AnimationType::Initial).is_none());
        assert_eq!(state.get_state().len(), AnimationType::PRIORITY.len());
    }

    #[test]
    fn test_set_active_reports_change() {
        let mut state = AnimationState::new();
        assert!(state.set_active(AnimationType::Hover, true));
        assert!(!state.set_active(AnimationType::Hover, true));
        assert!(!state.set_active(AnimationType::Initial, true));
    }

    #[test]
    fn test_higher_type_protects_lower() {
        let mut state = AnimationState::new();
        state.declare_keys(AnimationType::Animate, [X, Opacity]);
        state.declare_keys(AnimationType::Hover, [X, Scale]);

        state.set_active(AnimationType::Hover, true);

        let animate = state.type_state(AnimationType::Animate).unwrap();
        assert!(animate.protected_keys.contains(&X));
        assert!(animate.protected_keys.contains(&Scale));
        assert!(!animate.protected_keys.contains(&Opacity));
        assert!(state
            .type_state(AnimationType::Hover)
            .unwrap()
            .protected_keys
            .is_empty());
    }

    #[test]
    fn test_deactivating_flags_released_keys() {
        let mut state = AnimationState::new();
        state.declare_keys(AnimationType::Animate, [X, Opacity]);
        state.declare_keys(AnimationType::Hover, [X, Scale]);
        state.set_active(AnimationType::Hover, true);
        state.set_active(AnimationType::Hover, false);

        let animate = state.type_state_mut(AnimationType::Animate).unwrap();
        assert!(animate.protected_keys.is_empty());
        assert_eq!(animate.needs_animating.get(&X), Some(&true));
        // Scale was protected but Animate never declared it.
        assert_eq!(animate.needs_animating.get(&Scale), None);

        assert!(!should_block(animate, X));
    }

    #[test]
    fn test_flag_survives_reprotection() {
        let mut state = AnimationState::new();
        state.declare_keys(AnimationType::Animate, [X]);
        state.declare_keys(AnimationType::Hover, [X]);
        state.set_active(AnimationType::Hover, true);
        state.set_active(AnimationType::Hover, false);
        state.set_active(AnimationType::Hover, true);

        let animate = state.type_state_mut(AnimationType::Animate).unwrap();
        assert!(animate.protected_keys.contains(&X));
        assert!(!should_block(animate, X));
        assert!(should_block(animate, X));
    }

    #[test]
    fn test_inactive_types_claim_nothing() {
        let mut state = AnimationState::new();
        state.declare_keys(AnimationType::Animate, [X]);
        state.declare_keys(AnimationType::Press, [X]);

        let animate = state.type_state(AnimationType::Animate).unwrap();
        assert!(animate.protected_keys.is_empty());
    }
}
