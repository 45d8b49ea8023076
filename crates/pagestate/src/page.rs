//! The host page as seen by query-bound state: a fixed path, the current query,
//! a history backend, and the navigation notification that query listeners
//! subscribe to.
//!
//! Types:
//!
//! - `HistoryBackend` is the seam to the host's history API; `MemoryHistory`
//!   records entries in memory for headless hosts and tests.
//! - `Page` is a cheap, clonable handle; every clone observes the same state.
//! - `Subscription` removes its listener when `unsubscribe` is called.
//!
//! Functions:
//!
//! - `Page::navigate` applies a host-driven navigation (link, back/forward) and
//!   broadcasts the new query.
//! - `Page::push_query` records a new history entry for a query rewritten in
//!   place, without reloading, and broadcasts it.
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use thiserror::Error;
use tracing::debug;

use crate::listeners::{ListenerId, Listeners};
use crate::query::QueryMap;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("location '{0}' must start with '/'")]
    RelativeLocation(String),
}

pub trait HistoryBackend {
    /// Adds a history entry for `location` (path plus query) without reloading.
    fn push_entry(&mut self, location: &str);
}

/// In-memory history; clones share the same entry list.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Rc<RefCell<Vec<String>>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}

impl HistoryBackend for MemoryHistory {
    fn push_entry(&mut self, location: &str) {
        self.entries.borrow_mut().push(location.to_string());
    }
}

struct PageInner {
    path: String,
    query: RefCell<QueryMap>,
    history: RefCell<Box<dyn HistoryBackend>>,
    listeners: RefCell<Listeners<QueryMap>>,
}

#[derive(Clone)]
pub struct Page {
    inner: Rc<PageInner>,
}

impl Page {
    pub fn new(path: impl Into<String>, query: QueryMap, history: impl HistoryBackend + 'static) -> Self {
        Self {
            inner: Rc::new(PageInner {
                path: path.into(),
                query: RefCell::new(query),
                history: RefCell::new(Box::new(history)),
                listeners: RefCell::new(Listeners::default()),
            }),
        }
    }

    /// Builds a page from a `/path?query` location string.
    pub fn from_location(
        location: &str,
        history: impl HistoryBackend + 'static,
    ) -> Result<Self, QueryError> {
        if !location.starts_with('/') {
            return Err(QueryError::RelativeLocation(location.to_string()));
        }
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, QueryMap::parse(query)),
            None => (location, QueryMap::new()),
        };
        Ok(Self::new(path, query, history))
    }

    pub fn path(&self) -> &str {
        &self.inner.path
    }

    pub fn query(&self) -> QueryMap {
        self.inner.query.borrow().clone()
    }

    pub fn location(&self) -> String {
        let query = self.inner.query.borrow();
        if query.is_empty() {
            self.inner.path.clone()
        } else {
            format!("{}?{}", self.inner.path, query.to_query_string())
        }
    }

    /// Registers `listener` and immediately invokes it with the current query.
    pub fn subscribe(&self, listener: impl Fn(&QueryMap) + 'static) -> Subscription {
        let listener: Rc<dyn Fn(&QueryMap)> = Rc::new(listener);
        let id = self.inner.listeners.borrow_mut().add(Rc::clone(&listener));
        let current = self.query();
        listener(&current);
        Subscription {
            page: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn navigate(&self, query: &str) {
        *self.inner.query.borrow_mut() = QueryMap::parse(query);
        debug!(location = %self.location(), "page navigated");
        self.broadcast();
    }

    pub fn push_query(&self, query: QueryMap) {
        *self.inner.query.borrow_mut() = query;
        let location = self.location();
        self.inner.history.borrow_mut().push_entry(&location);
        debug!(%location, "pushed history entry");
        self.broadcast();
    }

    fn broadcast(&self) {
        let query = self.query();
        let listeners = self.inner.listeners.borrow().snapshot();
        for listener in listeners {
            listener(&query);
        }
    }
}

#[must_use = "dropping a Subscription keeps the listener registered; call unsubscribe"]
pub struct Subscription {
    page: Weak<PageInner>,
    id: ListenerId,
}

impl Subscription {
    pub fn unsubscribe(self) {
        if let Some(page) = self.page.upgrade() {
            page.listeners.borrow_mut().remove(self.id);
        }
    }
}
