use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

struct Waiter {
    id: u64,
    keys: Vec<String>,
    tx: mpsc::Sender<(String, String)>,
}

struct ListInner {
    lists: HashMap<String, VecDeque<String>>,
    waiters: HashMap<String, VecDeque<Waiter>>,
}

impl ListInner {
    fn remove_waiter(&mut self, keys: &[String], id: u64) {
        for key in keys {
            if let Some(queue) = self.waiters.get_mut(key) {
                queue.retain(|w| w.id != id);
                if queue.is_empty() {
                    self.waiters.remove(key);
                }
            }
        }
    }

    /// Hands elements off the head of `key`'s list to FIFO-queued waiters,
    /// one element per waiter, until either runs dry. Must run under the
    /// store lock, immediately after a push to `key`.
    fn deliver(&mut self, key: &str) {
        loop {
            let has_value = self.lists.get(key).is_some_and(|l| !l.is_empty());
            if !has_value {
                break;
            }
            let Some(waiter) = self.waiters.get_mut(key).and_then(|q| q.pop_front()) else {
                break;
            };
            let list = self.lists.get_mut(key).expect("checked non-empty above");
            let value = list.pop_front().expect("checked non-empty above");
            if list.is_empty() {
                self.lists.remove(key);
            }

            if waiter.tx.try_send((key.to_string(), value)).is_err() {
                warn!(key, "blpop waiter channel unavailable at delivery time");
            }
            // The waiter may be registered on other keys too; it has now
            // resolved (or, on the send error above, is unreachable) and
            // must not remain a head-of-line blocker anywhere else.
            self.remove_waiter(&waiter.keys, waiter.id);
        }
    }
}

/// RAII guard that removes a BLPOP waiter's registration from every key
/// it was enqueued on. Runs on normal return, timeout, *and* task
/// cancellation (the await being dropped), which a plain post-await
/// cleanup call would miss. Idempotent with [`ListInner::deliver`]'s own
/// removal, which may have already run this waiter off every queue.
struct WaiterGuard<'a> {
    store: &'a ListStore,
    id: u64,
    keys: Vec<String>,
}

impl Drop for WaiterGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.store.inner.lock().unwrap();
        inner.remove_waiter(&self.keys, self.id);
    }
}

/// Ordered sequences of elements per key plus the FIFO waiter registry
/// for BLPOP, both behind one mutex covering the whole store's state.
pub struct ListStore {
    inner: Mutex<ListInner>,
    next_waiter_id: AtomicU64,
}

pub enum PushSide {
    Head,
    Tail,
}

impl ListStore {
    pub fn new() -> Self {
        ListStore {
            inner: Mutex::new(ListInner {
                lists: HashMap::new(),
                waiters: HashMap::new(),
            }),
            next_waiter_id: AtomicU64::new(0),
        }
    }

    /// Pushes `values` onto `key` and returns the length *after* the
    /// insert but *before* any handover to waiting BLPOP clients. Only
    /// `RPUSH` (`PushSide::Tail`) triggers handover — `LPUSH` never wakes
    /// a BLPOP waiter, matching the source.
    pub fn push(&self, key: &str, values: Vec<String>, side: PushSide) -> usize {
        let mut inner = self.inner.lock().unwrap();
        let list = inner.lists.entry(key.to_string()).or_default();
        match side {
            // LPUSH k a b c -> head order c, b, a: each value is pushed
            // to the front in the order given.
            PushSide::Head => {
                for v in values {
                    list.push_front(v);
                }
            }
            PushSide::Tail => {
                for v in values {
                    list.push_back(v);
                }
            }
        }
        let post_push_len = list.len();
        if matches!(side, PushSide::Tail) {
            inner.deliver(key);
        }
        post_push_len
    }

    pub fn pop_front(&self, key: &str) -> Option<String> {
        let mut inner = self.inner.lock().unwrap();
        let list = inner.lists.get_mut(key)?;
        let value = list.pop_front();
        if list.is_empty() {
            inner.lists.remove(key);
        }
        value
    }

    pub fn pop_front_many(&self, key: &str, count: usize) -> Vec<String> {
        let mut inner = self.inner.lock().unwrap();
        let Some(list) = inner.lists.get_mut(key) else {
            return Vec::new();
        };
        let take = count.min(list.len());
        let popped: Vec<String> = list.drain(..take).collect();
        if list.is_empty() {
            inner.lists.remove(key);
        }
        popped
    }

    pub fn range(&self, key: &str, start: i64, stop: i64) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        let Some(list) = inner.lists.get(key) else {
            return Vec::new();
        };
        let len = list.len() as i64;
        let normalize = |i: i64| if i < 0 { (len + i).max(0) } else { i };
        let start = normalize(start);
        let stop = normalize(stop).min(len - 1);
        if len == 0 || start >= len || start > stop {
            return Vec::new();
        }
        list.iter()
            .skip(start as usize)
            .take((stop - start + 1) as usize)
            .cloned()
            .collect()
    }

    pub fn len(&self, key: &str) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.lists.get(key).map_or(0, |l| l.len())
    }

    pub fn has(&self, key: &str) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.lists.contains_key(key)
    }

    /// Blocks until one of `keys` yields an element, or `timeout`
    /// elapses (`timeout == 0` blocks indefinitely). Returns the key the
    /// value came from alongside the value itself.
    pub async fn blpop(&self, keys: &[String], timeout: Duration) -> Option<(String, String)> {
        {
            let mut inner = self.inner.lock().unwrap();
            for key in keys {
                if let Some(list) = inner.lists.get_mut(key) {
                    if let Some(value) = list.pop_front() {
                        if list.is_empty() {
                            inner.lists.remove(key);
                        }
                        return Some((key.clone(), value));
                    }
                }
            }
        }

        let id = self.next_waiter_id.fetch_add(1, Ordering::Relaxed);
        let (tx, mut rx) = mpsc::channel(1);
        {
            let mut inner = self.inner.lock().unwrap();
            for key in keys {
                inner.waiters.entry(key.clone()).or_default().push_back(Waiter {
                    id,
                    keys: keys.to_vec(),
                    tx: tx.clone(),
                });
            }
        }
        // Constructed *before* the await so it still fires if this future
        // is dropped mid-suspend (connection closed, task cancelled).
        let _guard = WaiterGuard {
            store: self,
            id,
            keys: keys.to_vec(),
        };

        debug!(?keys, ?timeout, "blpop suspending");
        if timeout.is_zero() {
            rx.recv().await
        } else {
            tokio::time::timeout(timeout, rx.recv()).await.ok().flatten()
        }
    }
}

impl Default for ListStore {
    fn default() -> Self {
        Self::new()
    }
}
