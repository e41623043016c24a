use std::str::FromStr;

use axum::{
    Extension,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
};
use serde_json::{Map, Value, json};

use crate::{error::AuthError, server::AppState, types::TimeRange, utils, warning};

/// Resolves a valid access token, or the response to send instead.
///
/// Anything that prevents producing a usable token sends the user back
/// through the login flow.
pub(super) async fn require_token(state: &AppState) -> Result<String, Response> {
    match state.tokens.get_valid_access_token().await {
        Ok(token) => Ok(token),
        Err(AuthError::Unauthenticated) => Err(Redirect::to("/login").into_response()),
        Err(e) => {
            warning!("Could not obtain a valid access token: {}", e);
            Err(Redirect::to("/login").into_response())
        }
    }
}

/// Main dashboard page: the profile plus flattened top-track and top-artist
/// views for every time range, rendered from the cached snapshot.
///
/// Ranges whose fetch failed during aggregation appear as `null` slots;
/// the page renders whatever data is available.
pub async fn dashboard(Extension(state): Extension<AppState>) -> Response {
    let token = match require_token(&state).await {
        Ok(token) => token,
        Err(response) => return response,
    };

    let snapshot = match state.snapshots.get_or_build(&token).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warning!("Snapshot aggregation failed: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let mut top_tracks = Map::new();
    let mut top_artists = Map::new();
    for range in TimeRange::ALL {
        let tracks_view = snapshot
            .tracks
            .get(&range)
            .and_then(|slot| slot.as_deref())
            .map(utils::extract_top_tracks);
        top_tracks.insert(range.to_string(), json!(tracks_view));

        let artists_view = snapshot
            .artists
            .get(&range)
            .and_then(|slot| slot.as_deref())
            .map(utils::extract_top_artists);
        top_artists.insert(range.to_string(), json!(artists_view));
    }

    Json(json!({
        "profile": snapshot.profile,
        "top_tracks": top_tracks,
        "top_artists": top_artists,
    }))
    .into_response()
}

/// Single derived view for one time range.
///
/// `kind` selects the view: `tracks` (artist/track name pairs), `artists`
/// (names) or `genres` (counts, descending). A missing slot renders as
/// `null` items rather than a failed page.
pub async fn stats(
    Path((kind, range)): Path<(String, String)>,
    Extension(state): Extension<AppState>,
) -> Response {
    let range = match TimeRange::from_str(&range) {
        Ok(range) => range,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": e }))).into_response();
        }
    };

    let token = match require_token(&state).await {
        Ok(token) => token,
        Err(response) => return response,
    };

    let snapshot = match state.snapshots.get_or_build(&token).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warning!("Snapshot aggregation failed: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let tracks_slot = snapshot.tracks.get(&range).and_then(|slot| slot.as_deref());
    let artists_slot = snapshot.artists.get(&range).and_then(|slot| slot.as_deref());

    let items: Value = match kind.as_str() {
        "tracks" => json!(tracks_slot.map(utils::extract_top_tracks)),
        "artists" => json!(artists_slot.map(utils::extract_top_artists)),
        "genres" => json!(artists_slot.map(utils::extract_genre_counts)),
        other => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("unknown stats kind '{}'", other) })),
            )
                .into_response();
        }
    };

    Json(json!({ "time_range": range, "items": items })).into_response()
}
