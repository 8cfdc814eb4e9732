use std::collections::HashMap;
use std::sync::Mutex;

use crate::store::stream_id::now_ms;

struct StringEntry {
    value: String,
    /// Absolute deadline in ms since epoch; 0 means "no expiry".
    expiry_ms: i64,
}

impl StringEntry {
    fn is_live(&self) -> bool {
        self.expiry_ms == 0 || now_ms() as i64 <= self.expiry_ms
    }
}

/// Mapping from key to (value, expiry-deadline), guarded by one lock.
pub struct StringStore {
    inner: Mutex<HashMap<String, StringEntry>>,
}

impl StringStore {
    pub fn new() -> Self {
        StringStore {
            inner: Mutex::new(HashMap::new()),
        }
    }

    pub fn set(&self, key: String, value: String, expiry_ms: i64) {
        let mut inner = self.inner.lock().unwrap();
        inner.insert(key, StringEntry { value, expiry_ms });
    }

    /// Lazily reaps an expired entry on read; the null reply is
    /// indistinguishable from a missing key either way.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut inner = self.inner.lock().unwrap();
        match inner.get(key) {
            Some(entry) if entry.is_live() => Some(entry.value.clone()),
            Some(_) => {
                inner.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn has(&self, key: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        match inner.get(key) {
            Some(entry) if entry.is_live() => true,
            Some(_) => {
                inner.remove(key);
                false
            }
            None => false,
        }
    }
}

impl Default for StringStore {
    fn default() -> Self {
        Self::new()
    }
}
