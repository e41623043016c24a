use axum::{
    Extension, Router,
    routing::get,
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{
    Res, api, cache::SnapshotCache, config, error,
    management::{SnapshotManager, TokenManager},
    spotify::client::SpotifyClient,
};

/// Shared state injected into every route handler.
///
/// The collaborators are constructed once at startup and passed in
/// explicitly: the per-session token manager, the API client with its base
/// URL, the snapshot manager and the TTL cache.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenManager>,
    pub client: Arc<SpotifyClient>,
    pub snapshots: Arc<SnapshotManager>,
    pub cache: SnapshotCache,
}

impl AppState {
    /// Builds the state from the validated environment configuration.
    pub fn from_config() -> Res<Self> {
        let cache = SnapshotCache::new(config::snapshot_cache_ttl());
        let client = Arc::new(SpotifyClient::new(config::spotify_apiurl())?);
        let tokens = Arc::new(TokenManager::new(
            config::spotify_apitoken_url(),
            config::spotify_redirect_uri(),
            &config::spotify_client_id(),
            &config::spotify_client_secret(),
            cache.clone(),
        )?);
        let snapshots = Arc::new(SnapshotManager::new(Arc::clone(&client), cache.clone()));

        Ok(AppState {
            tokens,
            client,
            snapshots,
            cache,
        })
    }
}

pub async fn start_server(state: AppState) {
    let app = Router::new()
        .route("/", get(api::login))
        .route("/login", get(api::login))
        .route("/logout", get(api::logout))
        .route("/callback", get(api::callback))
        .route("/dashboard", get(api::dashboard))
        .route("/stats/{kind}/{range}", get(api::stats))
        .route("/playlists", get(api::playlists).post(api::create_playlist))
        .route("/health", get(api::health))
        .layer(Extension(state));

    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
