//! Query-string backed fields.
//!
//! `QueryState` is the one shared object behind every field of a page: it
//! keeps an in-memory copy of the parsed query and subscribes to the page's
//! navigation notification the first time a field is bound. That subscription
//! is never torn down while the state lives.
//!
//! A field's `get` returns only the first value of a multi-valued key, and
//! `get_all` on an absent key yields `[None]` rather than an empty list.
use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::page::{Page, Subscription};
use crate::query::{QueryMap, QueryValue};

struct StateInner {
    page: Page,
    query: RefCell<QueryMap>,
    navigation: RefCell<Option<Subscription>>,
}

#[derive(Clone)]
pub struct QueryState {
    inner: Rc<StateInner>,
}

impl QueryState {
    pub fn new(page: Page) -> Self {
        Self {
            inner: Rc::new(StateInner {
                page,
                query: RefCell::new(QueryMap::new()),
                navigation: RefCell::new(None),
            }),
        }
    }

    pub fn page(&self) -> &Page {
        &self.inner.page
    }

    /// Whether the shared navigation subscription has been installed.
    pub fn is_attached(&self) -> bool {
        self.inner.navigation.borrow().is_some()
    }

    pub fn snapshot(&self) -> QueryMap {
        self.inner.query.borrow().clone()
    }

    pub fn field(&self, key: impl Into<String>) -> QueryBoundField {
        self.ensure_attached();
        QueryBoundField {
            key: key.into(),
            state: self.clone(),
        }
    }

    fn ensure_attached(&self) {
        if self.is_attached() {
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let subscription = self.inner.page.subscribe(move |query| {
            if let Some(inner) = weak.upgrade() {
                *inner.query.borrow_mut() = query.clone();
            }
        });
        *self.inner.navigation.borrow_mut() = Some(subscription);
        debug!(path = self.inner.page.path(), "query state attached to page");
    }
}

/// One named value in the page query.
#[derive(Clone)]
pub struct QueryBoundField {
    key: String,
    state: QueryState,
}

impl QueryBoundField {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Invokes `callback` with the field's current value right away and again
    /// after every navigation or `set`. `None` means the key is absent.
    pub fn subscribe(&self, callback: impl Fn(Option<&QueryValue>) + 'static) -> Subscription {
        let key = self.key.clone();
        self.state
            .inner
            .page
            .subscribe(move |query| callback(query.get(&key)))
    }

    /// Overwrites this key with a single value and pushes the rewritten query
    /// as a new history entry. Other keys, known or not, are preserved.
    pub fn set(&self, value: impl Into<String>) {
        let next = {
            let mut query = self.state.inner.query.borrow_mut();
            query.set(self.key.clone(), value);
            query.clone()
        };
        self.state.inner.page.push_query(next);
    }

    pub fn get(&self) -> Option<String> {
        self.state
            .inner
            .query
            .borrow()
            .get(&self.key)
            .and_then(QueryValue::first)
            .map(str::to_string)
    }

    pub fn get_all(&self) -> Vec<Option<String>> {
        match self.state.inner.query.borrow().get(&self.key) {
            Some(value) => value.to_vec().into_iter().map(Some).collect(),
            None => vec![None],
        }
    }
}
