//! Animation handles and completion joins.
//!
//! An [`AnimationHandle`] is shared between the driver that runs an animation
//! and everyone waiting on it. The driver settles it exactly once, as
//! `Finished` or `Cancelled`; settle callbacks run at that moment.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::types::{AnimationId, PlaybackState};

type SettleCallback = Box<dyn FnOnce(PlaybackState)>;

struct HandleInner {
    id: AnimationId,
    state: Cell<PlaybackState>,
    callbacks: RefCell<Vec<SettleCallback>>,
}

/// Cancelable, awaitable reference to one running animation.
///
/// Cloning yields another reference to the same animation.
#[derive(Clone)]
pub struct AnimationHandle(Rc<HandleInner>);

impl AnimationHandle {
    pub fn new(id: AnimationId) -> Self {
        Self(Rc::new(HandleInner {
            id,
            state: Cell::new(PlaybackState::Pending),
            callbacks: RefCell::new(Vec::new()),
        }))
    }

    pub fn id(&self) -> AnimationId {
        self.0.id
    }

    pub fn state(&self) -> PlaybackState {
        self.0.state.get()
    }

    pub fn is_settled(&self) -> bool {
        self.state().is_settled()
    }

    /// Run `callback` once this animation settles.
    ///
    /// Runs immediately if it already has.
    pub fn on_settle(&self, callback: impl FnOnce(PlaybackState) + 'static) {
        let state = self.state();
        if state.is_settled() {
            callback(state);
        } else {
            self.0.callbacks.borrow_mut().push(Box::new(callback));
        }
    }

    /// Move to `state`. Settling runs the pending callbacks.
    ///
    /// Returns false if the animation had already settled.
    pub fn settle(&self, state: PlaybackState) -> bool {
        if self.is_settled() {
            return false;
        }
        self.0.state.set(state);
        if !state.is_settled() {
            return true;
        }

        // Callbacks may register further callbacks on this handle.
        let callbacks = std::mem::take(&mut *self.0.callbacks.borrow_mut());
        for callback in callbacks {
            callback(state);
        }
        true
    }

    /// Stop the animation where it is.
    pub fn cancel(&self) {
        self.settle(PlaybackState::Cancelled);
    }

    pub fn pause(&self) {
        if matches!(self.state(), PlaybackState::Pending | PlaybackState::Running) {
            self.0.state.set(PlaybackState::Paused);
        }
    }

    pub fn resume(&self) {
        if self.state() == PlaybackState::Paused {
            self.0.state.set(PlaybackState::Running);
        }
    }

    /// True if both handles refer to the same animation.
    pub fn ptr_eq(&self, other: &AnimationHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for AnimationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationHandle")
            .field("id", &self.0.id)
            .field("state", &self.state())
            .field("callbacks", &self.0.callbacks.borrow().len())
            .finish()
    }
}

/// Counts down settles across a set of handles and fires once when the last
/// one settles. Cancellation counts as settling.
pub struct CompletionJoin {
    remaining: Rc<Cell<usize>>,
}

impl CompletionJoin {
    /// Watch `handles`, running `on_complete` when all have settled.
    ///
    /// With no handles, `on_complete` runs before this returns.
    pub fn watch(handles: &[AnimationHandle], on_complete: impl FnOnce() + 'static) -> Self {
        let remaining = Rc::new(Cell::new(handles.len()));
        if handles.is_empty() {
            on_complete();
            return Self { remaining };
        }

        let on_complete: Rc<RefCell<Option<Box<dyn FnOnce()>>>> =
            Rc::new(RefCell::new(Some(Box::new(on_complete))));

        for handle in handles {
            let remaining = Rc::clone(&remaining);
            let on_complete = Rc::clone(&on_complete);
            handle.on_settle(move |_| {
                let left = remaining.get().saturating_sub(1);
                remaining.set(left);
                if left == 0 {
                    let callback = on_complete.borrow_mut().take();
                    if let Some(callback) = callback {
                        callback();
                    }
                }
            });
        }

        Self { remaining }
    }

    /// Handles that have not settled yet.
    pub fn remaining(&self) -> usize {
        self.remaining.get()
    }

    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }
}

static_assertions::assert_not_impl_any!(AnimationHandle: Send, Sync);
