//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by the
//! dashboard: authorization-code OAuth plumbing and the REST calls for
//! profile, top items, saved tracks and playlist management. It abstracts
//! away the HTTP requests, token-response parsing and API quirks, providing
//! a clean Rust interface for the management layer and the route handlers.
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - OAuth 2.0 authorization-code flow helpers:
//! - **Credential Encoding**: Base64 Basic-auth credential from the client
//!   id/secret pair
//! - **Authorization URL**: The login redirect target with the configured
//!   scope
//! - **Token Parsing**: The single boundary where `expires_in` durations are
//!   normalized into absolute `expires_at` timestamps
//!
//! ### Client Module
//!
//! [`client`] - The [`client::SpotifyClient`] request layer:
//! - **User Data**: `GET /me`, `GET /me/top/{item_type}`, `GET /me/tracks`,
//!   `GET /me/playlists`
//! - **Playlist Operations**: `POST /me/playlists`,
//!   `POST /playlists/{id}/items`
//! - **Status Contract**: Paginated fetches return `(status, items)` pairs,
//!   with `None` items on non-200 so callers can render partial data
//! - **Timeouts**: 10 s for reads, 30 s for writes
//!
//! ## Error Types
//!
//! - **`reqwest::Error`** - transport errors, propagated with `?`
//! - **[`crate::error::AuthError`]** - token exchange and refresh failures
//! - **[`crate::error::ApiError`]** - non-success profile responses
//!
//! ## Dependencies
//!
//! - **reqwest** - HTTP client with JSON support and async capabilities
//! - **serde_json** - JSON serialization and deserialization
//! - **chrono** - Date and time handling for token expiration
//! - **base64** - Basic-auth credential encoding

pub mod auth;
pub mod client;
