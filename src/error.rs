//! Error taxonomy for authentication, API and configuration failures.

use thiserror::Error;

/// Errors produced by the OAuth token lifecycle.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The OAuth callback arrived without an authorization code.
    #[error("authorization code missing from callback")]
    MissingCode,

    /// The token endpoint rejected a code exchange or refresh request.
    #[error("token exchange failed: {0}")]
    ExchangeFailed(String),

    /// No token is present for the session.
    #[error("no authenticated session")]
    Unauthenticated,
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::ExchangeFailed(err.to_string())
    }
}

/// Errors produced by Spotify Web API calls.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The endpoint answered with a non-success status code.
    #[error("request failed with status {0}")]
    NonSuccessStatus(u16),

    /// Transport-level HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors detected while validating startup configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("missing required configuration value: {0}")]
    MissingCredential(&'static str),
}
