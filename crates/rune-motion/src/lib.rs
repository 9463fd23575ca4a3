//! Animation resolution and scheduling for rune scene nodes.
//!
//! Given a node, a requested target state and a transition description, the
//! [`TargetAnimator`] decides which values animate, arbitrates between
//! competing animation types (hover over animate, and so on), resolves a
//! concrete transition per value and starts them through an
//! [`AnimationDriver`]. [`AnimationManager`] is the bundled driver.
//!
//! Everything here is single-threaded: nodes are `Rc<RefCell<_>>` and
//! deferred work runs from a [`FrameBatch`] flushed by the host each frame.

pub mod animator;
pub mod arbiter;
pub mod driver;
pub mod easing;
pub mod error;
pub mod events;
pub mod features;
pub mod frame;
pub mod handle;
pub mod interpolate;
pub mod manager;
pub mod node;
pub mod resolver;
pub mod target;
pub mod transition;
pub mod types;
pub mod value;

pub use animator::{AnimateOptions, TargetAnimator, set_target};
pub use arbiter::{AnimationState, TypeState, should_block};
pub use driver::{AnimationDriver, HandoffMap, HandoffRegistry, NoHandoff, StartRequest};
pub use easing::EasingFunction;
pub use error::{MotionError, Result};
pub use events::{EventQueue, MotionEvent};
pub use frame::{FrameBatch, FrameCallback, FrameScheduler};
pub use handle::{AnimationHandle, CompletionJoin};
pub use interpolate::Interpolate;
pub use manager::AnimationManager;
pub use node::{Initial, MotionProps, NodeHandle, NodeKey, VisualNode, WillChange};
pub use resolver::{MotionDefaults, TransitionResolver, value_transition};
pub use target::{Target, TargetAndTransition};
pub use transition::{ResolvedKind, ResolvedTransition, Transition, TransitionType, ValueTransition};
pub use types::{AnimatableProperty, AnimatableValue, AnimationId, AnimationType, PlaybackState};
