use axum::{Extension, response::Redirect};

use crate::{info, server::AppState, spotify::auth};

/// Entry point of the OAuth flow: sends the browser to Spotify's
/// authorization page with the configured client id, redirect URI and scope.
pub async fn login() -> Redirect {
    Redirect::temporary(&auth::authorize_url())
}

/// Ends the session: drops the stored token and the cached snapshot.
pub async fn logout(Extension(state): Extension<AppState>) -> Redirect {
    state.tokens.clear().await;
    state.cache.invalidate().await;
    info!("Session cleared");
    Redirect::to("/login")
}
