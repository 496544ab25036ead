//! Per-content serialization.
//!
//! Two concurrent transition attempts against the same content item must
//! not both commit from the same stale state; different content items are
//! fully independent. Each content id gets its own async mutex, handed out
//! as an owned guard so it can be held across awaits.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

#[derive(Default)]
pub(crate) struct ContentLocks {
    inner: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl ContentLocks {
    /// Acquire the lock for one content item, creating it on first use.
    /// Entries with no outstanding guard are pruned on the way through.
    pub(crate) async fn acquire(&self, content_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            let lock = map
                .entry(content_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone();
            map.retain(|_, l| Arc::strong_count(l) > 1);
            lock
        };
        lock.lock_owned().await
    }
}
