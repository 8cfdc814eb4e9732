pub mod list_store;
pub mod radix;
pub mod stream_id;
pub mod stream_store;
pub mod string_store;

use std::sync::Arc;

pub use list_store::{ListStore, PushSide};
pub use stream_store::StreamStore;
pub use string_store::StringStore;

/// The three independently-locked stores shared across connections. Each
/// command handler borrows from here; no command holds more than one
/// store's lock at a time, except [`type_of`], which acquires them one
/// at a time in a fixed order.
#[derive(Clone)]
pub struct Stores {
    pub strings: Arc<StringStore>,
    pub lists: Arc<ListStore>,
    pub streams: Arc<StreamStore>,
}

impl Stores {
    pub fn new() -> Self {
        Stores {
            strings: Arc::new(StringStore::new()),
            lists: Arc::new(ListStore::new()),
            streams: Arc::new(StreamStore::new()),
        }
    }
}

impl Default for Stores {
    fn default() -> Self {
        Self::new()
    }
}

/// Probes string, then list, then stream — in that order, releasing each
/// store's lock before acquiring the next. Not atomic across stores.
pub fn type_of(stores: &Stores, key: &str) -> &'static str {
    if stores.strings.has(key) {
        return "string";
    }
    if stores.lists.has(key) {
        return "list";
    }
    if stores.streams.has(key) {
        return "stream";
    }
    "none"
}
