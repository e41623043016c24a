//! TTL cache for the aggregated user-data snapshot.

use std::{sync::Arc, time::Duration};

use moka::future::Cache as MokaCache;

use crate::types::UserDataSnapshot;

/// Fixed key: the cache holds one snapshot per process, scoped to the
/// current session.
const SNAPSHOT_KEY: &str = "user_data";

/// Single-entry snapshot cache with time-based expiry.
///
/// After `invalidate` (or TTL expiry) the next `get` misses and the caller
/// re-runs the aggregation. Simultaneous misses may each rebuild
/// independently; no in-flight de-duplication is attempted.
#[derive(Clone)]
pub struct SnapshotCache {
    inner: Arc<MokaCache<&'static str, UserDataSnapshot>>,
}

impl SnapshotCache {
    /// Creates a cache whose entry expires `ttl` after it was stored.
    pub fn new(ttl: Duration) -> Self {
        SnapshotCache {
            inner: Arc::new(MokaCache::builder().max_capacity(1).time_to_live(ttl).build()),
        }
    }

    /// Stores the snapshot, replacing any previous entry.
    pub async fn store(&self, snapshot: UserDataSnapshot) {
        self.inner.insert(SNAPSHOT_KEY, snapshot).await;
    }

    /// Returns the cached snapshot if present and not expired.
    pub async fn get(&self) -> Option<UserDataSnapshot> {
        self.inner.get(SNAPSHOT_KEY).await
    }

    /// Drops the cached snapshot, forcing re-aggregation on the next access.
    pub async fn invalidate(&self) {
        self.inner.invalidate(SNAPSHOT_KEY).await;
    }
}
