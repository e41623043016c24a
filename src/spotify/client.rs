use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    error::ApiError,
    types::{
        AddTracksRequest, CreatePlaylistRequest, CreatePlaylistResponse, ItemKind, ItemsPage,
        PlaylistsPage, Profile, SavedTrackEntry, TimeRange, Track,
    },
};

/// Largest page size the top-items and library endpoints accept; larger
/// requested limits are clamped before the request is issued.
const MAX_PAGE_LIMIT: u32 = 50;

/// Timeout for read-only GET calls.
const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for write calls; playlist population can touch up to 50 tracks.
const WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Spotify Web API endpoints the dashboard consumes.
///
/// Constructed once at startup with the API base URL injected; every call
/// attaches the caller-supplied bearer token. Paginated fetches follow the
/// `(status, items)` contract: a non-200 response yields `(status, None)`
/// instead of an error so page handlers can decide between failing and
/// rendering partial data.
pub struct SpotifyClient {
    read: Client,
    write: Client,
    api_url: String,
}

impl SpotifyClient {
    /// Creates a client for the given API base URL, e.g.
    /// `https://api.spotify.com/v1`.
    pub fn new(api_url: String) -> Result<Self, reqwest::Error> {
        Ok(SpotifyClient {
            read: Client::builder().timeout(READ_TIMEOUT).build()?,
            write: Client::builder().timeout(WRITE_TIMEOUT).build()?,
            api_url,
        })
    }

    /// Fetches the current user's profile via `GET /me`.
    ///
    /// Unlike the paginated fetches this has no partial-data story; a
    /// non-success status is an [`ApiError::NonSuccessStatus`].
    pub async fn get_profile(&self, token: &str) -> Result<Profile, ApiError> {
        let api_url = format!("{}/me", self.api_url);
        let response = self.read.get(&api_url).bearer_auth(token).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::NonSuccessStatus(response.status().as_u16()));
        }

        Ok(response.json::<Profile>().await?)
    }

    /// Fetches the user's top tracks or artists for one time range.
    ///
    /// `limit` is clamped to 50 before the request. Returns the raw status
    /// code together with the decoded items on 200, or `(status, None)` on
    /// any other status. Callers must check the status explicitly.
    pub async fn get_top_items<T: DeserializeOwned>(
        &self,
        token: &str,
        kind: ItemKind,
        limit: u32,
        time_range: TimeRange,
        offset: u32,
    ) -> Result<(u16, Option<Vec<T>>), reqwest::Error> {
        let api_url = format!(
            "{uri}/me/top/{kind}?limit={limit}&time_range={time_range}&offset={offset}",
            uri = self.api_url,
            kind = kind,
            limit = limit.min(MAX_PAGE_LIMIT),
            time_range = time_range,
            offset = offset
        );

        let response = self.read.get(&api_url).bearer_auth(token).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Ok((status.as_u16(), None));
        }

        let page = response.json::<ItemsPage<T>>().await?;
        Ok((status.as_u16(), Some(page.items)))
    }

    /// Fetches the user's saved/liked tracks via `GET /me/tracks`.
    ///
    /// Same `(status, items)` contract as [`Self::get_top_items`].
    pub async fn get_saved_tracks(
        &self,
        token: &str,
        limit: u32,
        offset: u32,
    ) -> Result<(u16, Option<Vec<SavedTrackEntry>>), reqwest::Error> {
        let api_url = format!(
            "{uri}/me/tracks?limit={limit}&offset={offset}",
            uri = self.api_url,
            limit = limit.min(MAX_PAGE_LIMIT),
            offset = offset
        );

        let response = self.read.get(&api_url).bearer_auth(token).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Ok((status.as_u16(), None));
        }

        let page = response.json::<ItemsPage<SavedTrackEntry>>().await?;
        Ok((status.as_u16(), Some(page.items)))
    }

    /// Fetches the user's playlists via `GET /me/playlists`.
    ///
    /// Returns the whole page payload so callers can use paging metadata.
    pub async fn get_current_playlists(
        &self,
        token: &str,
        limit: u32,
        offset: u32,
    ) -> Result<(u16, Option<PlaylistsPage>), reqwest::Error> {
        let api_url = format!(
            "{uri}/me/playlists?limit={limit}&offset={offset}",
            uri = self.api_url,
            limit = limit.min(MAX_PAGE_LIMIT),
            offset = offset
        );

        let response = self.read.get(&api_url).bearer_auth(token).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Ok((status.as_u16(), None));
        }

        let page = response.json::<PlaylistsPage>().await?;
        Ok((status.as_u16(), Some(page)))
    }

    /// Creates a playlist for the current user via `POST /me/playlists`.
    ///
    /// Returns the new playlist id on 201 and `None` on any other status;
    /// the caller reports creation failures to the user.
    pub async fn create_playlist(
        &self,
        token: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<Option<String>, reqwest::Error> {
        let api_url = format!("{}/me/playlists", self.api_url);
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public,
        };

        let response = self
            .write
            .post(&api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        if response.status() != StatusCode::CREATED {
            return Ok(None);
        }

        let created = response.json::<CreatePlaylistResponse>().await?;
        Ok(Some(created.id))
    }

    /// Adds at most `size` tracks, in input order, to a playlist.
    ///
    /// Track ids are mapped to `spotify:track:{id}` URIs and POSTed to
    /// `/playlists/{id}/items`. The raw status code is returned so the
    /// caller can report partial or total failure accurately.
    pub async fn add_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        tracks: &[Track],
        size: usize,
    ) -> Result<u16, reqwest::Error> {
        let api_url = format!("{}/playlists/{}/items", self.api_url, playlist_id);
        let body = AddTracksRequest {
            uris: tracks
                .iter()
                .take(size)
                .map(|track| format!("spotify:track:{}", track.id))
                .collect(),
        };

        let response = self
            .write
            .post(&api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        Ok(response.status().as_u16())
    }
}
