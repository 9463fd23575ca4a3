//! Pointer hover.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::{
    ActiveChangeCallback, Disposer, DragLock, EventInfo, Feature, PointerEvent, PointerKind,
    PointerPhase, PointerSource,
};
use crate::node::{NodeHandle, VisualNode};
use crate::types::AnimationType;

/// Toggles [`AnimationType::Hover`] on pointer enter and leave.
///
/// Touch pointers never hover, and nothing is reported while a drag holds
/// the [`DragLock`].
pub struct HoverGesture<P: PointerSource> {
    node: NodeHandle,
    source: P,
    drag_lock: DragLock,
    on_change: Option<ActiveChangeCallback>,
    disposers: Vec<Disposer>,
}

impl<P: PointerSource> HoverGesture<P> {
    pub fn new(node: NodeHandle, source: P, drag_lock: DragLock) -> Self {
        Self {
            node,
            source,
            drag_lock,
            on_change: None,
            disposers: Vec::new(),
        }
    }

    /// Called with `(Hover, active)` whenever hover really toggles.
    pub fn with_on_change(mut self, on_change: ActiveChangeCallback) -> Self {
        self.on_change = Some(on_change);
        self
    }

    pub fn is_mounted(&self) -> bool {
        !self.disposers.is_empty()
    }

    fn listen(&self, phase: PointerPhase) -> Disposer {
        let node = Rc::downgrade(&self.node);
        let drag_lock = self.drag_lock.clone();
        let on_change = self.on_change.clone();
        let node_id = self.node.borrow().id().to_string();

        self.source.add_listener(
            &node_id,
            phase,
            Rc::new(move |event: &PointerEvent, info: &EventInfo| {
                let is_active = phase == PointerPhase::Enter;
                handle_hover(&node, &drag_lock, on_change.as_ref(), is_active, event, info)
            }),
        )
    }
}

fn handle_hover(
    node: &Weak<RefCell<VisualNode>>,
    drag_lock: &DragLock,
    on_change: Option<&ActiveChangeCallback>,
    is_active: bool,
    event: &PointerEvent,
    info: &EventInfo,
) {
    if event.kind == PointerKind::Touch || drag_lock.is_active() {
        return;
    }
    let Some(node) = node.upgrade() else {
        return;
    };

    let (changed, callback) = {
        let mut node = node.borrow_mut();
        let changed = node.props().while_hover.is_some()
            && node
                .animation_state_mut()
                .is_some_and(|state| state.set_active(AnimationType::Hover, is_active));
        let props = node.props();
        let callback = if is_active {
            props.on_hover_start.clone()
        } else {
            props.on_hover_end.clone()
        };
        (changed, callback)
    };

    // Both may borrow the node themselves.
    if changed {
        if let Some(on_change) = on_change {
            on_change(AnimationType::Hover, is_active);
        }
    }
    if let Some(callback) = callback {
        callback(event, info);
    }
}

impl<P: PointerSource> Feature for HoverGesture<P> {
    fn mount(&mut self) {
        self.unmount();
        self.disposers = vec![
            self.listen(PointerPhase::Enter),
            self.listen(PointerPhase::Leave),
        ];
    }

    fn unmount(&mut self) {
        for dispose in self.disposers.drain(..) {
            dispose();
        }
    }
}
