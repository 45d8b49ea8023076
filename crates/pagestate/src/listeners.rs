use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered callback registry. Callbacks run in registration order.
pub(crate) struct Listeners<T: ?Sized> {
    next_id: u64,
    entries: Vec<(ListenerId, Rc<dyn Fn(&T)>)>,
}

impl<T: ?Sized> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T: ?Sized> Listeners<T> {
    pub(crate) fn add(&mut self, listener: Rc<dyn Fn(&T)>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(candidate, _)| *candidate != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Clones the current callbacks so they can run without holding a borrow
    /// of the registry; callbacks may then add or remove listeners.
    pub(crate) fn snapshot(&self) -> Vec<Rc<dyn Fn(&T)>> {
        self.entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }
}
