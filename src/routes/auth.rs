use axum::Json;
use axum::extract::State;
use axum_macros::debug_handler;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::request::{AppJson, LoginData, LogoutData, RefreshData};
use crate::types::response::{Envelope, TokenPair};

#[debug_handler]
#[instrument(skip_all)]
pub(crate) async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginData>,
) -> Result<Json<Envelope<TokenPair>>, Error> {
    let tokens = state.auth.login(&payload.username, &payload.password).await?;

    Ok(Json(Envelope::success(tokens)))
}

/// The refresh token is long-lived and only ever exchanged, so the
/// response echoes it back beside the new access token.
#[instrument(skip_all)]
pub(crate) async fn refresh(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RefreshData>,
) -> Result<Json<Envelope<TokenPair>>, Error> {
    let access_token = state.auth.refresh(&payload.refresh_token).await?;

    let tokens = TokenPair {
        access_token,
        refresh_token: payload.refresh_token,
    };

    Ok(Json(Envelope::success_message(
        Some(tokens),
        "Token refreshed successfully",
    )))
}

#[instrument(skip_all)]
pub(crate) async fn logout(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LogoutData>,
) -> Result<Json<Envelope<()>>, Error> {
    state
        .auth
        .logout(&payload.username, &payload.refresh_token)
        .await?;

    Ok(Json(Envelope::success_message(
        None,
        "Logged out successfully",
    )))
}
