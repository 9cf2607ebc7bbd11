use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum_macros::debug_handler;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::request::{AppJson, ListParams, NewUserData, UpdatePasswordData};
use crate::types::response::{self, Envelope, Page};

#[debug_handler]
#[instrument(skip_all)]
pub(crate) async fn create(
    State(state): State<AppState>,
    AppJson(payload): AppJson<NewUserData>,
) -> Result<(StatusCode, Json<Envelope<response::User>>), Error> {
    let user = state
        .users
        .create(
            &payload.username,
            &payload.email,
            payload.full_name.as_deref(),
            &payload.password,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(Envelope::success(user.into()))))
}

#[instrument(skip(state))]
pub(crate) async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Envelope<Page<response::User>>>, Error> {
    let page = state
        .users
        .list(
            params.page,
            params.size,
            params.sort_by.as_deref(),
            params.order,
        )
        .await?;

    Ok(Json(Envelope::success(page)))
}

#[instrument(skip(state))]
pub(crate) async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Envelope<response::User>>, Error> {
    let user = state.users.get(id).await?;

    Ok(Json(Envelope::success(user.into())))
}

#[instrument(skip_all)]
pub(crate) async fn update_password(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdatePasswordData>,
) -> Result<Json<Envelope<()>>, Error> {
    state.users.update_password(id, &payload.new_password).await?;

    Ok(Json(Envelope::success_message(
        None,
        "Password updated successfully",
    )))
}

#[instrument(skip(state))]
pub(crate) async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Envelope<()>>, Error> {
    state.users.delete(id).await?;

    Ok(Json(Envelope::success_message(
        None,
        "User deleted successfully",
    )))
}

#[instrument(skip(state))]
pub(crate) async fn soft_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Envelope<()>>, Error> {
    state.users.soft_delete(id).await?;

    Ok(Json(Envelope::success_message(
        None,
        "User soft deleted successfully",
    )))
}
