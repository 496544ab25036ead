//! Ephemeral record of when content last entered the draft stage.
//!
//! Feeds the time-to-publish metric. Process-wide and best-effort: a lost
//! entry (restart, poisoned lock) only means one unrecorded measurement,
//! never an incorrect state transition.

use std::collections::HashMap;
use std::sync::Mutex;

use copydesk_core::types::Timestamp;
use uuid::Uuid;

#[derive(Default)]
pub struct DraftEntryCache {
    inner: Mutex<HashMap<Uuid, Timestamp>>,
}

impl DraftEntryCache {
    /// Record that `content_id` entered draft at `at`, replacing any
    /// earlier stamp.
    pub fn stamp(&self, content_id: Uuid, at: Timestamp) {
        if let Ok(mut map) = self.inner.lock() {
            map.insert(content_id, at);
        }
    }

    /// Consume the stamp for `content_id`, if one survives.
    pub fn take(&self, content_id: Uuid) -> Option<Timestamp> {
        self.inner.lock().ok().and_then(|mut map| map.remove(&content_id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn take_consumes_the_stamp() {
        let cache = DraftEntryCache::default();
        let id = Uuid::new_v4();
        let at = Utc::now();

        cache.stamp(id, at);
        assert_eq!(cache.take(id), Some(at));
        assert_eq!(cache.take(id), None);
    }

    #[test]
    fn restamping_replaces_the_earlier_entry() {
        let cache = DraftEntryCache::default();
        let id = Uuid::new_v4();
        let first = Utc::now();
        let second = first + chrono::Duration::seconds(5);

        cache.stamp(id, first);
        cache.stamp(id, second);
        assert_eq!(cache.take(id), Some(second));
    }
}
