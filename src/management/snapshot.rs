use std::{collections::HashMap, sync::Arc};

use crate::{
    cache::SnapshotCache,
    error::ApiError,
    spotify::client::SpotifyClient,
    types::{Artist, ItemKind, TimeRange, Track, UserDataSnapshot},
    warning,
};

/// Page size used for every top-items fetch during aggregation.
const TOP_ITEMS_LIMIT: u32 = 50;

/// Builds the aggregated user-data snapshot from the remote API.
///
/// One profile fetch, then per time range one tracks and one artists fetch
/// with limit 50 and offset 0, issued sequentially. A per-range non-200
/// response stores `None` for that slot instead of aborting the whole
/// aggregation; consumers tolerate partial snapshots. Transport errors and
/// a failed profile fetch still abort, since nothing useful can be rendered
/// without them.
pub async fn build_snapshot(
    client: &SpotifyClient,
    token: &str,
) -> Result<UserDataSnapshot, ApiError> {
    let profile = client.get_profile(token).await?;

    let mut tracks = HashMap::new();
    let mut artists = HashMap::new();

    for range in TimeRange::ALL {
        let (status, items) = client
            .get_top_items::<Track>(token, ItemKind::Tracks, TOP_ITEMS_LIMIT, range, 0)
            .await?;
        if items.is_none() {
            warning!("Top tracks fetch for {} returned {}", range, status);
        }
        tracks.insert(range, items);

        let (status, items) = client
            .get_top_items::<Artist>(token, ItemKind::Artists, TOP_ITEMS_LIMIT, range, 0)
            .await?;
        if items.is_none() {
            warning!("Top artists fetch for {} returned {}", range, status);
        }
        artists.insert(range, items);
    }

    Ok(UserDataSnapshot {
        profile,
        tracks,
        artists,
    })
}

/// Pairs the API client with the snapshot cache.
///
/// Cache misses rebuild the snapshot and store it; simultaneous misses may
/// each rebuild independently, which is acceptable for this workload.
pub struct SnapshotManager {
    client: Arc<SpotifyClient>,
    cache: SnapshotCache,
}

impl SnapshotManager {
    pub fn new(client: Arc<SpotifyClient>, cache: SnapshotCache) -> Self {
        SnapshotManager { client, cache }
    }

    /// Returns the cached snapshot or rebuilds and stores it.
    pub async fn get_or_build(&self, token: &str) -> Result<UserDataSnapshot, ApiError> {
        if let Some(snapshot) = self.cache.get().await {
            return Ok(snapshot);
        }

        let snapshot = build_snapshot(&self.client, token).await?;
        self.cache.store(snapshot.clone()).await;
        Ok(snapshot)
    }
}
