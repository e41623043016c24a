use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{cache::SnapshotCache, error::AuthError, spotify::auth, types::Token};

/// Safety window before true expiry inside which the access token is
/// refreshed proactively. A request issued exactly at the boundary succeeds
/// via this pre-check, never by retrying after a 401.
const REFRESH_WINDOW_SECS: i64 = 120;

/// Timeout for token-endpoint POSTs.
const TOKEN_TIMEOUT: Duration = Duration::from_secs(10);

/// Owns the session's OAuth token and its lifecycle.
///
/// The token sits behind a `tokio::sync::Mutex` that is held across the
/// whole refresh round-trip, so refresh is a critical section per session:
/// two concurrent requests cannot both refresh and silently overwrite each
/// other's rotated refresh token.
pub struct TokenManager {
    http: Client,
    token_url: String,
    redirect_uri: String,
    basic_credential: String,
    token: Mutex<Option<Token>>,
    cache: SnapshotCache,
}

impl TokenManager {
    /// Creates a manager for the given token endpoint and client credentials.
    ///
    /// The snapshot cache is handed in so token replacement can invalidate
    /// the cached aggregate, forcing re-aggregation on the next page load.
    pub fn new(
        token_url: String,
        redirect_uri: String,
        client_id: &str,
        client_secret: &str,
        cache: SnapshotCache,
    ) -> Result<Self, reqwest::Error> {
        Ok(TokenManager {
            http: Client::builder().timeout(TOKEN_TIMEOUT).build()?,
            token_url,
            redirect_uri,
            basic_credential: auth::encode_client_creds(client_id, client_secret),
            token: Mutex::new(None),
            cache,
        })
    }

    /// Exchanges an authorization code for a token pair and stores it.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingCode`] when the callback carried no code
    /// - [`AuthError::ExchangeFailed`] on a non-2xx token response or a
    ///   malformed body
    pub async fn exchange_code(&self, code: Option<&str>) -> Result<Token, AuthError> {
        let code = match code {
            Some(code) if !code.is_empty() => code,
            _ => return Err(AuthError::MissingCode),
        };

        let json = self
            .post_token_request(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .await?;

        let token = auth::parse_token_response(&json, None)?;
        *self.token.lock().await = Some(token.clone());
        self.cache.invalidate().await;

        Ok(token)
    }

    /// Returns an access token that is valid for at least the refresh window.
    ///
    /// Refreshes first whenever `now >= expires_at - 120s`; the lock is held
    /// until the refreshed token is stored. A successful refresh invalidates
    /// the cached snapshot.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Unauthenticated`] when no token is present at all
    /// - [`AuthError::ExchangeFailed`] when the refresh request fails
    pub async fn get_valid_access_token(&self) -> Result<String, AuthError> {
        let mut guard = self.token.lock().await;
        let current = guard.as_ref().ok_or(AuthError::Unauthenticated)?.clone();

        if Utc::now().timestamp() >= current.expires_at - REFRESH_WINDOW_SECS {
            let refreshed = self.refresh(&current).await?;
            let access_token = refreshed.access_token.clone();
            *guard = Some(refreshed);
            self.cache.invalidate().await;
            return Ok(access_token);
        }

        Ok(current.access_token.clone())
    }

    /// Replaces the stored token, e.g. when restoring a session.
    pub async fn set_token(&self, token: Token) {
        *self.token.lock().await = Some(token);
    }

    /// Drops the stored token; the session is unauthenticated afterwards.
    pub async fn clear(&self) {
        *self.token.lock().await = None;
    }

    /// Returns a copy of the stored token, if any.
    pub async fn current_token(&self) -> Option<Token> {
        self.token.lock().await.clone()
    }

    async fn refresh(&self, current: &Token) -> Result<Token, AuthError> {
        let json = self
            .post_token_request(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", current.refresh_token.as_str()),
            ])
            .await?;

        // Spotify omits refresh_token on some refreshes; keep the old one.
        auth::parse_token_response(&json, Some(&current.refresh_token))
    }

    async fn post_token_request(&self, form: &[(&str, &str)]) -> Result<Value, AuthError> {
        let response = self
            .http
            .post(&self.token_url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Basic {}", self.basic_credential),
            )
            .form(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::ExchangeFailed(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        Ok(response.json::<Value>().await?)
    }
}
