use std::collections::HashMap;

use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{error::AuthError, server::AppState, success, warning};

/// OAuth callback: exchanges the authorization code for a token pair and
/// redirects to the dashboard.
///
/// Any previous session state is cleared before the exchange. A callback
/// without a code (the user denied access, or Spotify reported an error)
/// restarts the flow at `/login`.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<AppState>,
) -> Response {
    state.tokens.clear().await;
    state.cache.invalidate().await;

    let code = params.get("code").map(String::as_str);

    match state.tokens.exchange_code(code).await {
        Ok(_) => {
            success!("Authentication successful");
            Redirect::to("/dashboard").into_response()
        }
        Err(AuthError::MissingCode) => Redirect::to("/login").into_response(),
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            (StatusCode::BAD_GATEWAY, Html("<h4>Login failed.</h4>")).into_response()
        }
    }
}
