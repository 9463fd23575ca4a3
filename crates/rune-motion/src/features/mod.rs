//! Gesture and observer features.
//!
//! A feature binds one node to a host event source. On a qualifying event it
//! toggles the node's animation type and calls the user callback from the
//! node's props. Sources are traits so hosts can plug in their own event
//! loop; [`PointerRegistry`] and [`IntersectionRegistry`] are in-process
//! implementations driven by explicit dispatch calls.

pub mod hover;
pub mod in_view;

pub use hover::HoverGesture;
pub use in_view::{InViewFeature, ViewportAmount, ViewportOptions};

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::types::AnimationType;

/// Removes a listener when called.
pub type Disposer = Box<dyn FnOnce()>;

/// A unit of behavior mounted on one node.
pub trait Feature {
    /// Attach listeners.
    fn mount(&mut self);

    /// Props changed while mounted.
    fn update(&mut self) {}

    /// Detach listeners.
    fn unmount(&mut self);
}

/// Shared flag held while a drag gesture is in progress.
#[derive(Debug, Clone, Default)]
pub struct DragLock(Rc<Cell<bool>>);

impl DragLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the lock. Returns false if it is already held.
    pub fn acquire(&self) -> bool {
        !self.0.replace(true)
    }

    pub fn release(&self) {
        self.0.set(false);
    }

    pub fn is_active(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Enter,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub phase: PointerPhase,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Extra information passed to pointer callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventInfo {
    pub point: Point,
}

impl From<&PointerEvent> for EventInfo {
    fn from(event: &PointerEvent) -> Self {
        Self {
            point: Point {
                x: event.x,
                y: event.y,
            },
        }
    }
}

pub type PointerCallback = Rc<dyn Fn(&PointerEvent, &EventInfo)>;

/// Host binding for pointer enter/leave events.
pub trait PointerSource {
    fn add_listener(&self, node_id: &str, phase: PointerPhase, listener: PointerCallback)
    -> Disposer;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub is_intersecting: bool,
    /// Visible fraction of the node.
    pub ratio: f64,
}

/// Options passed to an intersection source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntersectionOptions {
    /// Grows or shrinks the viewport, CSS margin syntax.
    pub margin: Option<String>,
    /// Visible fraction at which the node counts as intersecting.
    pub threshold: f64,
}

pub type IntersectionCallback = Rc<dyn Fn(&IntersectionEntry)>;

/// Told when a feature actually flips an animation type on the node, so the
/// host can re-run target animation for it.
pub type ActiveChangeCallback = Rc<dyn Fn(AnimationType, bool)>;

/// Host binding for viewport intersection changes.
pub trait IntersectionSource {
    fn observe(
        &self,
        node_id: &str,
        options: IntersectionOptions,
        listener: IntersectionCallback,
    ) -> Disposer;
}

struct Registration<K, L> {
    id: u64,
    node_id: String,
    key: K,
    listener: L,
}

struct Registry<K, L> {
    next_id: u64,
    entries: Vec<Registration<K, L>>,
}

impl<K, L> Default for Registry<K, L> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

fn register<K: 'static, L: 'static>(
    registry: &Rc<RefCell<Registry<K, L>>>,
    node_id: &str,
    key: K,
    listener: L,
) -> Disposer {
    let id = {
        let mut inner = registry.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push(Registration {
            id,
            node_id: node_id.to_string(),
            key,
            listener,
        });
        id
    };

    let weak: Weak<RefCell<Registry<K, L>>> = Rc::downgrade(registry);
    Box::new(move || {
        if let Some(registry) = weak.upgrade() {
            registry.borrow_mut().entries.retain(|entry| entry.id != id);
        }
    })
}

/// In-process [`PointerSource`].
#[derive(Clone, Default)]
pub struct PointerRegistry {
    inner: Rc<RefCell<Registry<PointerPhase, PointerCallback>>>,
}

impl PointerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to the node's listeners for its phase. Returns how
    /// many listeners ran.
    pub fn dispatch(&self, node_id: &str, event: &PointerEvent) -> usize {
        let listeners: Vec<PointerCallback> = self
            .inner
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.node_id == node_id && entry.key == event.phase)
            .map(|entry| Rc::clone(&entry.listener))
            .collect();

        let info = EventInfo::from(event);
        for listener in &listeners {
            listener(event, &info);
        }
        listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

impl PointerSource for PointerRegistry {
    fn add_listener(
        &self,
        node_id: &str,
        phase: PointerPhase,
        listener: PointerCallback,
    ) -> Disposer {
        register(&self.inner, node_id, phase, listener)
    }
}

/// In-process [`IntersectionSource`].
#[derive(Clone, Default)]
pub struct IntersectionRegistry {
    inner: Rc<RefCell<Registry<IntersectionOptions, IntersectionCallback>>>,
}

impl IntersectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report that `ratio` of the node is visible. Each observer decides
    /// intersection against its own threshold. Returns how many observers ran.
    pub fn notify(&self, node_id: &str, ratio: f64) -> usize {
        let observers: Vec<(f64, IntersectionCallback)> = self
            .inner
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.node_id == node_id)
            .map(|entry| (entry.key.threshold, Rc::clone(&entry.listener)))
            .collect();

        for (threshold, listener) in &observers {
            let entry = IntersectionEntry {
                is_intersecting: ratio > 0.0 && ratio >= *threshold,
                ratio,
            };
            listener(&entry);
        }
        observers.len()
    }

    /// Options of the observers attached to a node.
    pub fn options_for(&self, node_id: &str) -> Vec<IntersectionOptions> {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.node_id == node_id)
            .map(|entry| entry.key.clone())
            .collect()
    }

    pub fn observer_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

impl IntersectionSource for IntersectionRegistry {
    fn observe(
        &self,
        node_id: &str,
        options: IntersectionOptions,
        listener: IntersectionCallback,
    ) -> Disposer {
        register(&self.inner, node_id, options, listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enter(kind: PointerKind) -> PointerEvent {
        PointerEvent {
            kind,
            phase: PointerPhase::Enter,
            x: 3.0,
            y: 4.0,
        }
    }

    #[test]
    fn test_drag_lock() {
        let lock = DragLock::new();
        let shared = lock.clone();
        assert!(lock.acquire());
        assert!(!shared.acquire());
        assert!(shared.is_active());
        lock.release();
        assert!(!shared.is_active());
    }

    #[test]
    fn test_pointer_registry_dispatch_and_dispose() {
        let registry = PointerRegistry::new();
        let hits = Rc::new(Cell::new(0));

        let seen = hits.clone();
        let dispose = registry.add_listener(
            "card",
            PointerPhase::Enter,
            Rc::new(move |_, info| {
                assert_eq!(info.point, Point { x: 3.0, y: 4.0 });
                seen.set(seen.get() + 1);
            }),
        );

        assert_eq!(registry.dispatch("card", &enter(PointerKind::Mouse)), 1);
        assert_eq!(registry.dispatch("other", &enter(PointerKind::Mouse)), 0);
        let leave = PointerEvent {
            phase: PointerPhase::Leave,
            ..enter(PointerKind::Mouse)
        };
        assert_eq!(registry.dispatch("card", &leave), 0);
        assert_eq!(hits.get(), 1);

        dispose();
        assert_eq!(registry.listener_count(), 0);
        assert_eq!(registry.dispatch("card", &enter(PointerKind::Mouse)), 0);
    }

    #[test]
    fn test_intersection_registry_thresholds() {
        let registry = IntersectionRegistry::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log = seen.clone();
        let _dispose = registry.observe(
            "hero",
            IntersectionOptions {
                margin: None,
                threshold: 0.5,
            },
            Rc::new(move |entry| log.borrow_mut().push(entry.is_intersecting)),
        );

        registry.notify("hero", 0.25);
        registry.notify("hero", 0.75);
        registry.notify("hero", 0.0);
        assert_eq!(*seen.borrow(), vec![false, true, false]);
        assert_eq!(registry.options_for("hero")[0].threshold, 0.5);
    }

    #[test]
    fn test_disposer_outliving_registry_is_harmless() {
        let registry = IntersectionRegistry::new();
        let dispose = registry.observe("a", IntersectionOptions::default(), Rc::new(|_| {}));
        drop(registry);
        dispose();
    }
}
