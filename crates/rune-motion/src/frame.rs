//! Frame-batched side effects.
//!
//! Work scheduled here runs at the next flush, never inside the call stack
//! that scheduled it. The host flushes once per frame, after ticking its
//! animation driver.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A deferred unit of work.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Schedules callbacks for the next update point.
pub trait FrameScheduler {
    fn schedule_update(&self, callback: FrameCallback);
}

/// A FIFO queue of frame callbacks.
///
/// Clones share the same queue, so the animator and the host loop can each
/// hold one.
#[derive(Clone, Default)]
pub struct FrameBatch {
    queue: Rc<RefCell<VecDeque<FrameCallback>>>,
}

impl FrameBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run everything queued so far, in scheduling order.
    ///
    /// Callbacks scheduled while flushing wait for the next flush.
    pub fn flush(&self) -> usize {
        let batch = std::mem::take(&mut *self.queue.borrow_mut());
        let count = batch.len();
        for callback in batch {
            callback();
        }
        if count > 0 {
            tracing::trace!(count, "flushed frame batch");
        }
        count
    }
}

impl FrameScheduler for FrameBatch {
    fn schedule_update(&self, callback: FrameCallback) {
        self.queue.borrow_mut().push_back(callback);
    }
}

impl std::fmt::Debug for FrameBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBatch")
            .field("pending", &self.pending())
            .finish()
    }
}
