//! # API Module
//!
//! This module provides the HTTP endpoints served by the dashboard. It
//! implements the OAuth entry points and the pages rendered from the cached
//! user-data snapshot.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Redirects the browser to Spotify's authorization page.
//! - [`callback`] - Handles the OAuth callback, exchanging the authorization
//!   code for a token pair and starting the session.
//! - [`logout`] - Clears the session token and the cached snapshot.
//!
//! ### Dashboard
//!
//! - [`dashboard`] - The aggregated snapshot plus flattened top-track and
//!   top-artist views as JSON.
//! - [`stats`] - A single derived view (tracks, artists or genres) for one
//!   time range.
//! - [`playlists`] - The user's current playlists, passed through with the
//!   upstream status.
//! - [`create_playlist`] - Form handler creating a playlist from the top
//!   tracks of a chosen time range.
//!
//! ### Monitoring
//!
//! - [`health`] - Status and version information for monitoring systems.
//!
//! ## Architecture
//!
//! Built on the [Axum](https://docs.rs/axum) web framework; shared state is
//! injected per route via `Extension`. Handlers stay thin: token handling
//! lives in [`crate::management`], API calls in [`crate::spotify`], and the
//! handlers only decide between redirecting to login, rendering partial
//! data, and reporting failures.
//!
//! ## Error Handling
//!
//! Unauthenticated page loads redirect to `/login`. Failed per-range
//! fetches surface as absent slots in the JSON rather than failed pages.
//! Playlist creation failures are reported in the response body, never
//! silently swallowed.

mod callback;
mod dashboard;
mod health;
mod playlists;
mod session;

pub use callback::callback;
pub use dashboard::dashboard;
pub use dashboard::stats;
pub use health::health;
pub use playlists::create_playlist;
pub use playlists::playlists;
pub use session::login;
pub use session::logout;
