use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::Deserialize;

use crate::core::error::Error;
use crate::store::SortOrder;

#[derive(Deserialize)]
pub(crate) struct LoginData {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(Deserialize)]
pub(crate) struct RefreshData {
    pub(crate) refresh_token: String,
}

#[derive(Deserialize)]
pub(crate) struct LogoutData {
    pub(crate) username: String,
    pub(crate) refresh_token: String,
}

#[derive(Deserialize)]
pub(crate) struct NewUserData {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) full_name: Option<String>,
    pub(crate) password: String,
}

#[derive(Deserialize)]
pub(crate) struct UpdatePasswordData {
    pub(crate) new_password: String,
}

fn default_page() -> u32 {
    1
}

fn default_size() -> u32 {
    10
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    #[serde(default = "default_page")]
    pub(crate) page: u32,
    #[serde(default = "default_size")]
    pub(crate) size: u32,
    #[serde(default)]
    pub(crate) sort_by: Option<String>,
    #[serde(default)]
    pub(crate) order: SortOrder,
}

/// `axum::Json` with the rejection routed through [`Error`], so
/// malformed bodies come back in the standard envelope.
pub(crate) struct AppJson<T>(pub(crate) T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        Ok(Self(value))
    }
}
