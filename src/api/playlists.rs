use axum::{
    Extension, Form,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::{server::AppState, success, types::PlaylistRequest, warning};

use super::dashboard::require_token;

/// Lists the user's current playlists, passing the upstream status through.
pub async fn playlists(Extension(state): Extension<AppState>) -> Response {
    let token = match require_token(&state).await {
        Ok(token) => token,
        Err(response) => return response,
    };

    match state.client.get_current_playlists(&token, 50, 0).await {
        Ok((status, payload)) => {
            Json(json!({ "status": status, "playlists": payload })).into_response()
        }
        Err(e) => {
            warning!("Playlist listing failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// Creates a playlist from the snapshot's top tracks for the requested
/// time range and populates it with at most `size` tracks.
///
/// The response always states what actually happened: whether the playlist
/// was created, its id, the track-add status and how many tracks were
/// submitted. Failures are reported, never swallowed.
pub async fn create_playlist(
    Extension(state): Extension<AppState>,
    Form(request): Form<PlaylistRequest>,
) -> Response {
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
                Json(json!({ "created": false, "reason": e.to_string() })),
            )
                .into_response();
        }
    };

    let Some(tracks) = snapshot
        .tracks
        .get(&request.time_range)
        .and_then(|slot| slot.as_deref())
    else {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "created": false,
                "reason": format!("no top tracks available for {}", request.time_range),
            })),
        )
            .into_response();
    };

    let playlist_id = match state
        .client
        .create_playlist(&token, &request.name, &request.description, request.public)
        .await
    {
        Ok(Some(id)) => id,
        Ok(None) => {
            warning!("Playlist creation for '{}' was rejected", request.name);
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "created": false,
                    "reason": "playlist creation rejected by Spotify",
                })),
            )
                .into_response();
        }
        Err(e) => {
            warning!("Playlist creation failed: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "created": false, "reason": e.to_string() })),
            )
                .into_response();
        }
    };

    let add_status = match state
        .client
        .add_tracks(&token, &playlist_id, tracks, request.size)
        .await
    {
        Ok(status) => status,
        Err(e) => {
            warning!("Adding tracks to {} failed: {}", playlist_id, e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "created": true,
                    "playlist_id": playlist_id,
                    "tracks_added": 0,
                    "reason": e.to_string(),
                })),
            )
                .into_response();
        }
    };

    let submitted = request.size.min(tracks.len());
    let tracks_added = if add_status == 200 || add_status == 201 {
        submitted
    } else {
        0
    };

    if tracks_added == submitted {
        success!("Playlist {} created with {} tracks", playlist_id, tracks_added);
    } else {
        warning!("Playlist {} created but track add returned {}", playlist_id, add_status);
    }

    Json(json!({
        "created": true,
        "playlist_id": playlist_id,
        "add_status": add_status,
        "tracks_added": tracks_added,
    }))
    .into_response()
}
