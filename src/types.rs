use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// OAuth token pair with an absolute expiry.
///
/// `expires_at` is always a Unix timestamp in seconds. The `expires_in`
/// duration from token responses is converted at the parse boundary and
/// never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

/// Listening-history window the Spotify API aggregates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::ShortTerm, TimeRange::MediumTerm, TimeRange::LongTerm];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short_term" => Ok(TimeRange::ShortTerm),
            "medium_term" => Ok(TimeRange::MediumTerm),
            "long_term" => Ok(TimeRange::LongTerm),
            other => Err(format!(
                "invalid time range '{}' (expected short_term, medium_term or long_term)",
                other
            )),
        }
    }
}

/// Kind of top item the `/me/top/{item_type}` endpoint serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Tracks,
    Artists,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Tracks => f.write_str("tracks"),
            ItemKind::Artists => f.write_str("artists"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Generic `{"items": [...]}` page wrapper used by several endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsPage<T> {
    pub items: Vec<T>,
}

/// Entry in the saved-tracks listing; the track itself is nested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTrackEntry {
    pub track: Track,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistsPage {
    pub items: Vec<Playlist>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

/// User input for the create-playlist action. Transient, never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub public: bool,
    pub time_range: TimeRange,
    pub size: usize,
}

/// Aggregated per-session view of the user's listening data.
///
/// A `None` slot records a per-range fetch that came back non-200; consumers
/// render whatever is present instead of failing the whole page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDataSnapshot {
    pub profile: Profile,
    pub tracks: HashMap<TimeRange, Option<Vec<Track>>>,
    pub artists: HashMap<TimeRange, Option<Vec<Artist>>>,
}

/// Flattened top-tracks view: first artist name and track name per entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTracksView {
    pub artists: Vec<String>,
    pub tracks: Vec<String>,
}
