use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use serde_json::Value;

use crate::{config, error::AuthError, types::Token};

/// Encodes the client id/secret pair into a Basic-auth credential.
///
/// Produces the standard Base64 encoding of `"{id}:{secret}"` as required by
/// the token endpoint's `Authorization: Basic` header. Pure; missing
/// configuration is caught at startup, not here.
///
/// # Example
///
/// ```
/// let credential = encode_client_creds("my-id", "my-secret");
/// let header = format!("Basic {}", credential);
/// ```
pub fn encode_client_creds(client_id: &str, client_secret: &str) -> String {
    STANDARD.encode(format!("{}:{}", client_id, client_secret))
}

/// Builds the Spotify authorization URL the login route redirects to.
///
/// Uses the authorization-code response type with the configured client id,
/// redirect URI and scope. The user grants permissions on this page and is
/// sent back to the `/callback` route with an authorization code.
pub fn authorize_url() -> String {
    format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}",
        spotify_auth_url = &config::spotify_apiauth_url(),
        client_id = &config::spotify_client_id(),
        redirect_uri = &config::spotify_redirect_uri(),
        scope = &config::spotify_scope()
    )
}

/// Parses a token-endpoint response body into a [`Token`].
///
/// This is the single boundary where the relative `expires_in` duration is
/// converted into an absolute `expires_at` timestamp; no raw duration is
/// stored past this point. Refresh responses may omit `refresh_token`, in
/// which case `previous_refresh` is carried over.
///
/// # Errors
///
/// Returns [`AuthError::ExchangeFailed`] when the body carries no
/// `access_token`.
pub fn parse_token_response(json: &Value, previous_refresh: Option<&str>) -> Result<Token, AuthError> {
    let access_token = json["access_token"]
        .as_str()
        .ok_or_else(|| AuthError::ExchangeFailed("response carried no access_token".to_string()))?
        .to_string();

    let refresh_token = json["refresh_token"]
        .as_str()
        .map(str::to_string)
        .or_else(|| previous_refresh.map(str::to_string))
        .unwrap_or_default();

    let expires_in = json["expires_in"].as_i64().unwrap_or(3600);

    Ok(Token {
        access_token,
        refresh_token,
        expires_at: Utc::now().timestamp() + expires_in,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_normalizes_expiry_to_absolute() {
        let body = json!({
            "access_token": "T1",
            "refresh_token": "R1",
            "expires_in": 3600
        });

        let before = Utc::now().timestamp();
        let token = parse_token_response(&body, None).unwrap();
        let after = Utc::now().timestamp();

        assert_eq!(token.access_token, "T1");
        assert_eq!(token.refresh_token, "R1");
        assert!(token.expires_at >= before + 3600);
        assert!(token.expires_at <= after + 3600);
    }

    #[test]
    fn parse_preserves_previous_refresh_token() {
        let body = json!({
            "access_token": "T2",
            "expires_in": 3600
        });

        let token = parse_token_response(&body, Some("R-old")).unwrap();
        assert_eq!(token.refresh_token, "R-old");
    }

    #[test]
    fn parse_rejects_body_without_access_token() {
        let body = json!({ "error": "invalid_grant" });
        assert!(matches!(
            parse_token_response(&body, None),
            Err(AuthError::ExchangeFailed(_))
        ));
    }
}
