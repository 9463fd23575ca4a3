//! Viewport intersection.

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use rune_config::ViewportConfig;

use super::{
    ActiveChangeCallback, Disposer, Feature, IntersectionEntry, IntersectionOptions,
    IntersectionSource,
};
use crate::node::{NodeHandle, VisualNode};
use crate::types::AnimationType;

/// How much of a node must be visible to count as in view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportAmount {
    /// Any visible part.
    #[default]
    Some,
    /// The whole node.
    All,
    #[serde(untagged)]
    Fraction(f64),
}

impl ViewportAmount {
    pub fn threshold(self) -> f64 {
        match self {
            Self::Some => 0.0,
            Self::All => 1.0,
            Self::Fraction(fraction) => fraction,
        }
    }
}

/// The `viewport` prop.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportOptions {
    pub margin: Option<String>,
    pub amount: ViewportAmount,
    /// Stop reporting exits after the first entry.
    pub once: bool,
}

impl From<&ViewportConfig> for ViewportOptions {
    fn from(config: &ViewportConfig) -> Self {
        let amount = if config.amount <= 0.0 {
            ViewportAmount::Some
        } else if config.amount >= 1.0 {
            ViewportAmount::All
        } else {
            ViewportAmount::Fraction(config.amount)
        };
        Self {
            margin: None,
            amount,
            once: config.once,
        }
    }
}

#[derive(Debug, Default)]
struct ViewState {
    has_entered_view: Cell<bool>,
    is_in_view: Cell<bool>,
}

/// Toggles [`AnimationType::InView`] as the node enters and leaves the
/// viewport.
pub struct InViewFeature<S: IntersectionSource> {
    node: NodeHandle,
    source: S,
    state: Rc<ViewState>,
    on_change: Option<ActiveChangeCallback>,
    remove_observer: Option<Disposer>,
}

impl<S: IntersectionSource> InViewFeature<S> {
    pub fn new(node: NodeHandle, source: S) -> Self {
        Self {
            node,
            source,
            state: Rc::new(ViewState::default()),
            on_change: None,
            remove_observer: None,
        }
    }

    /// Called with `(InView, active)` whenever in-view really toggles.
    pub fn with_on_change(mut self, on_change: ActiveChangeCallback) -> Self {
        self.on_change = Some(on_change);
        self
    }

    pub fn is_in_view(&self) -> bool {
        self.state.is_in_view.get()
    }

    pub fn has_entered_view(&self) -> bool {
        self.state.has_entered_view.get()
    }

    fn stop_observer(&mut self) {
        if let Some(remove) = self.remove_observer.take() {
            remove();
        }
    }

    fn start_observer(&mut self) {
        self.stop_observer();

        let (node_id, viewport) = {
            let node = self.node.borrow();
            (node.id().to_string(), node.props().viewport.clone())
        };
        let options = IntersectionOptions {
            margin: viewport.margin,
            threshold: viewport.amount.threshold(),
        };
        let once = viewport.once;

        let node = Rc::downgrade(&self.node);
        let state = Rc::clone(&self.state);
        let on_change = self.on_change.clone();
        self.remove_observer = Some(self.source.observe(
            &node_id,
            options,
            Rc::new(move |entry: &IntersectionEntry| {
                on_intersection_update(&node, &state, on_change.as_ref(), once, entry)
            }),
        ));
    }
}

fn on_intersection_update(
    node: &Weak<RefCell<VisualNode>>,
    state: &ViewState,
    on_change: Option<&ActiveChangeCallback>,
    once: bool,
    entry: &IntersectionEntry,
) {
    let is_intersecting = entry.is_intersecting;
    if state.is_in_view.get() == is_intersecting {
        return;
    }
    state.is_in_view.set(is_intersecting);

    if once && !is_intersecting && state.has_entered_view.get() {
        return;
    } else if is_intersecting {
        state.has_entered_view.set(true);
    }

    let Some(node) = node.upgrade() else {
        return;
    };

    let (changed, callback) = {
        let mut node = node.borrow_mut();
        let changed = node
            .animation_state_mut()
            .is_some_and(|state| state.set_active(AnimationType::InView, is_intersecting));
        // Latest props, not the ones captured when observing started.
        let props = node.props();
        let callback = if is_intersecting {
            props.on_viewport_enter.clone()
        } else {
            props.on_viewport_leave.clone()
        };
        (changed, callback)
    };

    if changed {
        if let Some(on_change) = on_change {
            on_change(AnimationType::InView, is_intersecting);
        }
    }
    if let Some(callback) = callback {
        callback(entry);
    }
}

impl<S: IntersectionSource> Feature for InViewFeature<S> {
    fn mount(&mut self) {
        self.start_observer();
    }

    fn update(&mut self) {
        self.start_observer();
    }

    fn unmount(&mut self) {
        self.stop_observer();
    }
}
