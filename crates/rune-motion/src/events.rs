//! Lifecycle events emitted by the [`AnimationManager`](crate::manager::AnimationManager).
//!
//! Events are queued during `start` and `update` and can be drained once per
//! frame:
//!
//! ```ignore
//! manager.update(16.0);
//! for event in manager.drain_events() {
//!     if let MotionEvent::Ended { node_id, property, .. } = event {
//!         println!("{node_id}.{property} settled");
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::types::{AnimatableProperty, AnimationId};

/// A change in the lifecycle of one value animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MotionEvent {
    /// The driver accepted the animation.
    Started {
        animation_id: AnimationId,
        node_id: String,
        property: AnimatableProperty,
        /// The animation continues one that was already running elsewhere.
        is_handoff: bool,
    },
    /// The animation reached its target.
    Ended {
        animation_id: AnimationId,
        node_id: String,
        property: AnimatableProperty,
    },
    /// The animation was stopped early, usually by a newer one.
    Cancelled {
        animation_id: AnimationId,
        node_id: String,
        property: AnimatableProperty,
    },
}

impl MotionEvent {
    pub fn node_id(&self) -> &str {
        match self {
            Self::Started { node_id, .. }
            | Self::Ended { node_id, .. }
            | Self::Cancelled { node_id, .. } => node_id,
        }
    }

    pub fn animation_id(&self) -> AnimationId {
        match self {
            Self::Started { animation_id, .. }
            | Self::Ended { animation_id, .. }
            | Self::Cancelled { animation_id, .. } => *animation_id,
        }
    }

    pub fn property(&self) -> AnimatableProperty {
        match self {
            Self::Started { property, .. }
            | Self::Ended { property, .. }
            | Self::Cancelled { property, .. } => *property,
        }
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, Self::Ended { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// FIFO of pending events.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<MotionEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: MotionEvent) {
        self.events.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn pop(&mut self) -> Option<MotionEvent> {
        self.events.pop_front()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = MotionEvent> + '_ {
        self.events.drain(..)
    }

    /// Pending events for one node, oldest first.
    pub fn events_for_node(&self, node_id: &str) -> Vec<&MotionEvent> {
        self.events
            .iter()
            .filter(|e| e.node_id() == node_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ended(node_id: &str, id: u64) -> MotionEvent {
        MotionEvent::Ended {
            animation_id: AnimationId(id),
            node_id: node_id.to_string(),
            property: AnimatableProperty::Opacity,
        }
    }

    #[test]
    fn test_event_accessors() {
        let event = MotionEvent::Started {
            animation_id: AnimationId(2),
            node_id: "card".to_string(),
            property: AnimatableProperty::X,
            is_handoff: false,
        };

        assert_eq!(event.node_id(), "card");
        assert_eq!(event.animation_id(), AnimationId(2));
        assert_eq!(event.property(), AnimatableProperty::X);
        assert!(!event.is_ended());
        assert!(ended("card", 3).is_ended());
    }

    #[test]
    fn test_queue_order_and_filter() {
        let mut queue = EventQueue::new();
        queue.push(ended("a", 1));
        queue.push(ended("b", 2));
        queue.push(ended("a", 3));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.events_for_node("a").len(), 2);
        assert_eq!(queue.pop().map(|e| e.animation_id()), Some(AnimationId(1)));

        let rest: Vec<_> = queue.drain().collect();
        assert_eq!(rest.len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_value(ended("a", 7)).unwrap();
        assert_eq!(json["type"], "ended");
        assert_eq!(json["property"], "opacity");
    }
}
