//! Configuration management for the listening stats dashboard.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and a `.env` file. It provides a centralized way to
//! manage application configuration including Spotify API credentials, server
//! settings, and cache parameters.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. Application defaults (where applicable)
//!
//! All credential and endpoint values are required; [`ensure_required`] is
//! called once at startup and reports the first missing value so the process
//! can fail fast instead of panicking mid-request.

use std::{env, time::Duration};

use crate::error::ConfigError;

/// Environment variables that must be present and non-empty at startup.
const REQUIRED_VARS: [&str; 8] = [
    "SPOTIFY_API_AUTH_CLIENT_ID",
    "SPOTIFY_API_AUTH_CLIENT_SECRET",
    "SPOTIFY_API_REDIRECT_URI",
    "SPOTIFY_API_AUTH_URL",
    "SPOTIFY_API_TOKEN_URL",
    "SPOTIFY_API_URL",
    "SPOTIFY_API_AUTH_SCOPE",
    "SERVER_ADDRESS",
];

/// Default time-to-live for the cached user-data snapshot, in seconds.
const DEFAULT_SNAPSHOT_TTL_SECS: u64 = 1800;

/// Loads environment variables from a `.env` file in the working directory.
///
/// Values already present in the process environment take precedence over
/// values from the file. A missing `.env` file is not an error; deployments
/// may provide all configuration through the environment directly.
///
/// # Example
///
/// ```
/// use spotidash::config;
///
/// config::load_env();
/// ```
pub fn load_env() {
    let _ = dotenv::dotenv();
}

/// Verifies that every required configuration value is present and non-empty.
///
/// Returns the first missing or empty variable as a
/// [`ConfigError::MissingCredential`]. Called once at startup; after this
/// check succeeds the panicking accessors below are safe to use.
///
/// # Errors
///
/// Returns `ConfigError::MissingCredential` naming the offending variable.
///
/// # Example
///
/// ```
/// use spotidash::config;
///
/// if let Err(e) = config::ensure_required() {
///     eprintln!("Configuration error: {}", e);
/// }
/// ```
pub fn ensure_required() -> Result<(), ConfigError> {
    for var in REQUIRED_VARS {
        match env::var(var) {
            Ok(value) if !value.trim().is_empty() => {}
            _ => return Err(ConfigError::MissingCredential(var)),
        }
    }
    Ok(())
}

/// Returns the address and port the dashboard server binds to.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
///
/// # Example
///
/// ```
/// let addr = server_addr(); // e.g., "127.0.0.1:5000"
/// ```
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify API client ID for authentication.
///
/// Retrieves the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable which
/// contains the client ID obtained when registering the application with
/// Spotify's developer platform.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the Spotify API client secret for authentication.
///
/// Retrieves the `SPOTIFY_API_AUTH_CLIENT_SECRET` environment variable. The
/// secret is combined with the client ID into the Basic-auth credential sent
/// to the token endpoint.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_SECRET` environment variable is not set.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_SECRET").expect("SPOTIFY_API_AUTH_CLIENT_SECRET must be set")
}

/// Returns the Spotify OAuth redirect URI.
///
/// Retrieves the `SPOTIFY_API_REDIRECT_URI` environment variable which
/// specifies the callback URL that Spotify redirects to after user
/// authorization. This must match the redirect URI registered in the Spotify
/// application settings.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the Spotify API scope permissions.
///
/// Retrieves the `SPOTIFY_API_AUTH_SCOPE` environment variable which defines
/// the permissions requested during OAuth authentication, e.g. top-item
/// reads, library reads and playlist modification.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_SCOPE` environment variable is not set.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").expect("SPOTIFY_API_AUTH_SCOPE must be set")
}

/// Returns the Spotify OAuth authorization URL.
///
/// Retrieves the `SPOTIFY_API_AUTH_URL` environment variable which contains
/// the base URL for Spotify's OAuth authorization endpoint. This is where
/// users are redirected to grant permissions to the application.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_URL` environment variable is not set.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").expect("SPOTIFY_API_AUTH_URL must be set")
}

/// Returns the Spotify Web API base URL.
///
/// Retrieves the `SPOTIFY_API_URL` environment variable which contains the
/// base URL for Spotify's Web API endpoints. This is used for all API
/// operations after authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Retrieves the `SPOTIFY_API_TOKEN_URL` environment variable which contains
/// the URL for exchanging authorization codes for access tokens and for
/// refreshing expiring tokens.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_TOKEN_URL` environment variable is not set.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}

/// Returns the time-to-live for the cached user-data snapshot.
///
/// Reads the optional `SNAPSHOT_CACHE_TTL` environment variable (seconds)
/// and falls back to 1800 seconds when unset or unparsable.
///
/// # Example
///
/// ```
/// let ttl = snapshot_cache_ttl(); // e.g., Duration::from_secs(1800)
/// ```
pub fn snapshot_cache_ttl() -> Duration {
    let secs = env::var("SNAPSHOT_CACHE_TTL")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SNAPSHOT_TTL_SECS);
    Duration::from_secs(secs)
}
