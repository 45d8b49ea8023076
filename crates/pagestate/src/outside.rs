//! Detects activation outside a region, for closing popovers and menus.
//!
//! `Document` is the global click dispatcher the host feeds events into.
//! `Region` is the capability the watcher needs: decide whether a click landed
//! inside. A `NodeId` region checks the event's propagation path; a `Rect`
//! region checks the click position.
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::listeners::{ListenerId, Listeners};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    /// Propagation path from the target up to the document root.
    pub path: Vec<NodeId>,
    pub position: Option<(f64, f64)>,
}

impl ClickEvent {
    pub fn on_path(path: impl Into<Vec<NodeId>>) -> Self {
        Self {
            path: path.into(),
            position: None,
        }
    }

    pub fn at(x: f64, y: f64) -> Self {
        Self {
            path: Vec::new(),
            position: Some((x, y)),
        }
    }
}

pub trait Region {
    fn contains(&self, event: &ClickEvent) -> bool;
}

impl Region for NodeId {
    fn contains(&self, event: &ClickEvent) -> bool {
        event.path.contains(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region for Rect {
    fn contains(&self, event: &ClickEvent) -> bool {
        match event.position {
            Some((x, y)) => {
                x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
            }
            None => false,
        }
    }
}

#[derive(Clone, Default)]
pub struct Document {
    click_listeners: Rc<RefCell<Listeners<ClickEvent>>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_click_listener(&self, listener: impl Fn(&ClickEvent) + 'static) -> ListenerId {
        self.click_listeners.borrow_mut().add(Rc::new(listener))
    }

    pub fn remove_click_listener(&self, id: ListenerId) -> bool {
        self.click_listeners.borrow_mut().remove(id)
    }

    pub fn click_listener_count(&self) -> usize {
        self.click_listeners.borrow().len()
    }

    pub fn dispatch_click(&self, event: &ClickEvent) {
        let listeners = self.click_listeners.borrow().snapshot();
        for listener in listeners {
            listener(event);
        }
    }
}

/// One document-level click listener guarding one region. Each attachment
/// installs its own listener; `detach` removes it.
pub struct OutsideActivationWatcher {
    document: Weak<RefCell<Listeners<ClickEvent>>>,
    id: ListenerId,
}

impl OutsideActivationWatcher {
    pub fn attach<R, F>(document: &Document, region: R, on_outside: F) -> Self
    where
        R: Region + 'static,
        F: Fn() + 'static,
    {
        let id = document.add_click_listener(move |event| {
            if !region.contains(event) {
                on_outside();
            }
        });
        Self {
            document: Rc::downgrade(&document.click_listeners),
            id,
        }
    }

    pub fn detach(self) {
        if let Some(listeners) = self.document.upgrade() {
            listeners.borrow_mut().remove(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
        let hits = Rc::new(Cell::new(0));
        let handle = Rc::clone(&hits);
        (hits, move || handle.set(handle.get() + 1))
    }

    #[test]
    fn clicks_inside_the_region_are_ignored() {
        let document = Document::new();
        let menu = NodeId(7);
        let (hits, on_outside) = counter();
        let _watcher = OutsideActivationWatcher::attach(&document, menu, on_outside);

        document.dispatch_click(&ClickEvent::on_path([NodeId(9), NodeId(7), NodeId(1)]));
        assert_eq!(hits.get(), 0);

        document.dispatch_click(&ClickEvent::on_path([NodeId(3), NodeId(1)]));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn detach_removes_the_listener() {
        let document = Document::new();
        let (hits, on_outside) = counter();
        let watcher = OutsideActivationWatcher::attach(&document, NodeId(1), on_outside);
        assert_eq!(document.click_listener_count(), 1);
        watcher.detach();
        assert_eq!(document.click_listener_count(), 0);
        document.dispatch_click(&ClickEvent::on_path([NodeId(2)]));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn attachments_are_independent() {
        let document = Document::new();
        let (first_hits, first) = counter();
        let (second_hits, second) = counter();
        let first = OutsideActivationWatcher::attach(&document, NodeId(1), first);
        let _second = OutsideActivationWatcher::attach(&document, NodeId(1), second);
        assert_eq!(document.click_listener_count(), 2);

        document.dispatch_click(&ClickEvent::on_path([NodeId(5)]));
        first.detach();
        document.dispatch_click(&ClickEvent::on_path([NodeId(5)]));
        assert_eq!(first_hits.get(), 1);
        assert_eq!(second_hits.get(), 2);
    }

    #[test]
    fn rect_regions_use_click_position() {
        let document = Document::new();
        let popover = Rect {
            x: 10.0,
            y: 10.0,
            width: 100.0,
            height: 50.0,
        };
        let (hits, on_outside) = counter();
        let _watcher = OutsideActivationWatcher::attach(&document, popover, on_outside);

        document.dispatch_click(&ClickEvent::at(50.0, 30.0));
        assert_eq!(hits.get(), 0);
        document.dispatch_click(&ClickEvent::at(200.0, 30.0));
        assert_eq!(hits.get(), 1);
    }
}
