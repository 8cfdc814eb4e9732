use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::CommandError;
use crate::store::radix::RadixTree;
use crate::store::stream_id::{self, PACKED_ID_LEN};

/// One stream entry. Fields are stored in insertion order — a `HashMap`
/// here would silently scramble them on readback, which is a bug, not
/// an acceptable simplification.
pub struct StreamEntry {
    pub id: String,
    pub fields: Vec<(String, String)>,
}

struct Stream {
    tree: RadixTree<StreamEntry>,
    last_id: Option<(u64, u64)>,
}

impl Stream {
    fn new() -> Self {
        Stream {
            tree: RadixTree::new(),
            last_id: None,
        }
    }
}

/// Mapping from key to stream, each stream backed by a radix tree keyed
/// on the entry's packed 16-byte id.
pub struct StreamStore {
    streams: Mutex<HashMap<String, Stream>>,
}

impl StreamStore {
    pub fn new() -> Self {
        StreamStore {
            streams: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves `id_token` against the stream's current tail, validates
    /// monotonicity, inserts the entry, and returns the resolved id.
    pub fn add(
        &self,
        key: &str,
        id_token: &str,
        fields: Vec<(String, String)>,
    ) -> Result<String, CommandError> {
        let mut streams = self.streams.lock().unwrap();
        let stream = streams.entry(key.to_string()).or_insert_with(Stream::new);

        let (ms, seq) = stream_id::resolve(id_token, stream.last_id)?;
        stream_id::validate((ms, seq), stream.last_id)?;

        let packed = stream_id::pack(ms, seq);
        let formatted = stream_id::format_id(ms, seq);
        stream.tree.insert(
            &packed,
            StreamEntry {
                id: formatted.clone(),
                fields,
            },
        );
        stream.last_id = Some((ms, seq));
        Ok(formatted)
    }

    /// Entries with packed id in `[start, end]`, ascending.
    pub fn range(&self, key: &str, start: [u8; PACKED_ID_LEN], end: [u8; PACKED_ID_LEN]) -> Vec<RangedEntry> {
        let streams = self.streams.lock().unwrap();
        let Some(stream) = streams.get(key) else {
            return Vec::new();
        };
        stream
            .tree
            .range(&start, &end)
            .into_iter()
            .map(|e| RangedEntry {
                id: e.id.clone(),
                fields: e.fields.clone(),
            })
            .collect()
    }

    pub fn has(&self, key: &str) -> bool {
        let streams = self.streams.lock().unwrap();
        streams.contains_key(key)
    }
}

/// Owned copy of a stream entry, detached from the store lock, safe to
/// hand back to the connection layer for encoding.
pub struct RangedEntry {
    pub id: String,
    pub fields: Vec<(String, String)>,
}

impl Default for StreamStore {
    fn default() -> Self {
        Self::new()
    }
}
