//! Last-observed property values.

use dashmap::DashMap;

/// Process-lifetime cache of the last-observed value for each watched
/// configuration key.
///
/// Lets the dispatcher tell a genuine value change apart from something
/// else that triggered a notification, like an identical property file
/// being reinstalled. Entries are created lazily on first observation,
/// overwritten on every subsequent one, and never deleted.
///
/// The map shards per key: the dispatcher's two-phase handling of a
/// single key is serialized, while notifications for different keys
/// proceed independently.
#[derive(Debug, Default)]
pub struct PropertyValueCache {
    values: DashMap<String, String>,
}

impl PropertyValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value snapshotted for `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|entry| entry.value().clone())
    }

    /// Record the current value of `key`, overwriting any prior entry.
    pub fn put(&self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Number of keys observed so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
