mod listeners;
mod outside;
mod page;
mod query;
mod store;

pub use listeners::ListenerId;
pub use outside::{ClickEvent, Document, NodeId, OutsideActivationWatcher, Rect, Region};
pub use page::{HistoryBackend, MemoryHistory, Page, QueryError, Subscription};
pub use query::{QueryMap, QueryValue};
pub use store::{QueryBoundField, QueryState};
