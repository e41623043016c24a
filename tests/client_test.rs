use std::time::Duration;

use chrono::Utc;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use spotidash::cache::SnapshotCache;
use spotidash::error::{ApiError, AuthError};
use spotidash::management::{TokenManager, build_snapshot};
use spotidash::spotify::client::SpotifyClient;
use spotidash::types::{ItemKind, Profile, TimeRange, Token, Track, UserDataSnapshot};

fn token_manager(server: &ServerGuard, cache: SnapshotCache) -> TokenManager {
    TokenManager::new(
        format!("{}/api/token", server.url()),
        "http://127.0.0.1:5000/callback".to_string(),
        "client-id",
        "client-secret",
        cache,
    )
    .unwrap()
}

fn stored_token(access: &str, refresh: &str, expires_at: i64) -> Token {
    Token {
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
        expires_at,
    }
}

fn test_snapshot() -> UserDataSnapshot {
    UserDataSnapshot {
        profile: Profile {
            id: "user123".to_string(),
            display_name: None,
            email: None,
            country: None,
        },
        tracks: Default::default(),
        artists: Default::default(),
    }
}

fn track_item(id: &str, name: &str) -> serde_json::Value {
    json!({ "id": id, "name": name, "artists": [{ "id": "a1", "name": "Artist" }] })
}

fn artist_items() -> serde_json::Value {
    json!({ "items": [{ "id": "a1", "name": "Artist", "genres": ["rock"] }] })
}

#[tokio::test]
async fn test_exchange_code_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/token")
        .match_header("authorization", Matcher::Regex("^Basic ".to_string()))
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
            Matcher::UrlEncoded("code".into(), "abc".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "access_token": "T1", "refresh_token": "R1", "expires_in": 3600 }).to_string(),
        )
        .create_async()
        .await;

    let manager = token_manager(&server, SnapshotCache::new(Duration::from_secs(60)));
    let before = Utc::now().timestamp();
    let token = manager.exchange_code(Some("abc")).await.unwrap();
    let after = Utc::now().timestamp();

    mock.assert_async().await;
    assert_eq!(token.access_token, "T1");
    assert_eq!(token.refresh_token, "R1");
    assert!(token.expires_at >= before + 3600 && token.expires_at <= after + 3600);

    // Fresh token: no refresh needed to hand it out
    let access = manager.get_valid_access_token().await.unwrap();
    assert_eq!(access, "T1");
}

#[tokio::test]
async fn test_exchange_code_requires_code() {
    let server = Server::new_async().await;
    let manager = token_manager(&server, SnapshotCache::new(Duration::from_secs(60)));

    assert!(matches!(
        manager.exchange_code(None).await,
        Err(AuthError::MissingCode)
    ));
    assert!(matches!(
        manager.exchange_code(Some("")).await,
        Err(AuthError::MissingCode)
    ));
}

#[tokio::test]
async fn test_exchange_code_non_success_status() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/token")
        .with_status(400)
        .with_body(json!({ "error": "invalid_grant" }).to_string())
        .create_async()
        .await;

    let manager = token_manager(&server, SnapshotCache::new(Duration::from_secs(60)));
    assert!(matches!(
        manager.exchange_code(Some("bad")).await,
        Err(AuthError::ExchangeFailed(_))
    ));
}

#[tokio::test]
async fn test_get_valid_access_token_unauthenticated() {
    let server = Server::new_async().await;
    let manager = token_manager(&server, SnapshotCache::new(Duration::from_secs(60)));

    assert!(matches!(
        manager.get_valid_access_token().await,
        Err(AuthError::Unauthenticated)
    ));
}

#[tokio::test]
async fn test_refresh_inside_safety_window() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            Matcher::UrlEncoded("refresh_token".into(), "R-old".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        // Spotify omits refresh_token on some refreshes
        .with_body(json!({ "access_token": "T2", "expires_in": 3600 }).to_string())
        .create_async()
        .await;

    let cache = SnapshotCache::new(Duration::from_secs(60));
    cache.store(test_snapshot()).await;

    let manager = token_manager(&server, cache.clone());
    manager
        .set_token(stored_token("T-old", "R-old", Utc::now().timestamp() + 60))
        .await;

    let access = manager.get_valid_access_token().await.unwrap();
    mock.assert_async().await;
    assert_eq!(access, "T2");

    // The previous refresh token is preserved when the response omits it
    let stored = manager.current_token().await.unwrap();
    assert_eq!(stored.refresh_token, "R-old");
    assert!(stored.expires_at > Utc::now().timestamp() + 3000);

    // Refresh invalidates the cached snapshot
    assert!(cache.get().await.is_none());
}

#[tokio::test]
async fn test_refresh_at_exact_window_boundary() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "access_token": "T2", "refresh_token": "R2", "expires_in": 3600 }).to_string(),
        )
        .create_async()
        .await;

    let manager = token_manager(&server, SnapshotCache::new(Duration::from_secs(60)));
    manager
        .set_token(stored_token("T-old", "R-old", Utc::now().timestamp() + 120))
        .await;

    // Exactly 120 seconds of validity left: the pre-check must refresh
    let access = manager.get_valid_access_token().await.unwrap();
    mock.assert_async().await;
    assert_eq!(access, "T2");
}

#[tokio::test]
async fn test_no_refresh_for_fresh_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/token")
        .expect(0)
        .create_async()
        .await;

    let manager = token_manager(&server, SnapshotCache::new(Duration::from_secs(60)));
    manager
        .set_token(stored_token("T1", "R1", Utc::now().timestamp() + 3600))
        .await;

    let access = manager.get_valid_access_token().await.unwrap();
    assert_eq!(access, "T1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_top_items_limit_clamped_to_50() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/me/top/tracks")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "50".into()),
            Matcher::UrlEncoded("time_range".into(), "long_term".into()),
            Matcher::UrlEncoded("offset".into(), "0".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "items": [track_item("t1", "Song")] }).to_string())
        .create_async()
        .await;

    let client = SpotifyClient::new(server.url()).unwrap();
    let (status, items) = client
        .get_top_items::<Track>("tok", ItemKind::Tracks, 100, TimeRange::LongTerm, 0)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(status, 200);
    assert_eq!(items.unwrap().len(), 1);
}

#[tokio::test]
async fn test_top_items_non_200_yields_no_items() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/me/top/artists")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = SpotifyClient::new(server.url()).unwrap();
    let (status, items) = client
        .get_top_items::<Track>("tok", ItemKind::Artists, 10, TimeRange::ShortTerm, 0)
        .await
        .unwrap();

    assert_eq!(status, 503);
    assert!(items.is_none());
}

#[tokio::test]
async fn test_saved_tracks_status_contract() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/me/tracks")
        .match_query(Matcher::UrlEncoded("limit".into(), "50".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "items": [{ "track": track_item("t1", "Saved") }] }).to_string())
        .create_async()
        .await;

    let client = SpotifyClient::new(server.url()).unwrap();
    let (status, items) = client.get_saved_tracks("tok", 80, 0).await.unwrap();

    assert_eq!(status, 200);
    let items = items.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].track.name, "Saved");
}

#[tokio::test]
async fn test_profile_non_success_is_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/me")
        .with_status(401)
        .create_async()
        .await;

    let client = SpotifyClient::new(server.url()).unwrap();
    assert!(matches!(
        client.get_profile("tok").await,
        Err(ApiError::NonSuccessStatus(401))
    ));
}

#[tokio::test]
async fn test_build_snapshot_tolerates_failed_range() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/me")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "user123", "display_name": "Test" }).to_string())
        .create_async()
        .await;

    for range in ["short_term", "medium_term", "long_term"] {
        server
            .mock("GET", "/me/top/tracks")
            .match_query(Matcher::UrlEncoded("time_range".into(), range.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "items": [track_item("t1", "Song")] }).to_string())
            .create_async()
            .await;
    }

    for range in ["short_term", "medium_term"] {
        server
            .mock("GET", "/me/top/artists")
            .match_query(Matcher::UrlEncoded("time_range".into(), range.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(artist_items().to_string())
            .create_async()
            .await;
    }

    // The long_term artists fetch fails server-side
    server
        .mock("GET", "/me/top/artists")
        .match_query(Matcher::UrlEncoded("time_range".into(), "long_term".into()))
        .with_status(500)
        .create_async()
        .await;

    let client = SpotifyClient::new(server.url()).unwrap();
    let snapshot = build_snapshot(&client, "tok").await.unwrap();

    assert_eq!(snapshot.profile.id, "user123");
    assert!(snapshot.artists[&TimeRange::LongTerm].is_none());
    assert!(snapshot.artists[&TimeRange::ShortTerm].is_some());
    assert!(snapshot.artists[&TimeRange::MediumTerm].is_some());
    for range in TimeRange::ALL {
        assert!(snapshot.tracks[&range].is_some());
    }
}

#[tokio::test]
async fn test_create_playlist_returns_id_on_201() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/me/playlists")
        .match_body(Matcher::PartialJson(json!({ "name": "My Mix", "public": false })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "pl1" }).to_string())
        .create_async()
        .await;

    let client = SpotifyClient::new(server.url()).unwrap();
    let id = client
        .create_playlist("tok", "My Mix", "Generated from top tracks", false)
        .await
        .unwrap();

    assert_eq!(id.as_deref(), Some("pl1"));
}

#[tokio::test]
async fn test_create_playlist_non_201_yields_none() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/me/playlists")
        .with_status(403)
        .create_async()
        .await;

    let client = SpotifyClient::new(server.url()).unwrap();
    let id = client
        .create_playlist("tok", "My Mix", "", true)
        .await
        .unwrap();

    assert!(id.is_none());
}

#[tokio::test]
async fn test_add_tracks_sends_first_n_uris_in_order() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/playlists/pl1/items")
        .match_body(Matcher::Json(json!({
            "uris": ["spotify:track:t1", "spotify:track:t2", "spotify:track:t3"]
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json!({ "snapshot_id": "snap1" }).to_string())
        .create_async()
        .await;

    let tracks: Vec<Track> = (1..=5)
        .map(|i| Track {
            id: format!("t{}", i),
            name: format!("Song {}", i),
            artists: Vec::new(),
        })
        .collect();

    let client = SpotifyClient::new(server.url()).unwrap();
    let status = client.add_tracks("tok", "pl1", &tracks, 3).await.unwrap();

    mock.assert_async().await;
    assert_eq!(status, 201);
}
