pub(crate) mod postgres;

#[cfg(test)]
pub(crate) mod memory;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::core::error::Error;

#[derive(Clone, Debug)]
pub(crate) struct User {
    pub(crate) id: i32,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) full_name: Option<String>,
    pub(crate) password_hash: String,
    pub(crate) current_refresh_token: Option<String>,
    pub(crate) user_type: String,
    pub(crate) status: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub(crate) fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Maps a caller-supplied sort key onto a known column name.
///
/// Listing queries interpolate the column into SQL, so only names from
/// this table ever reach the query text.
pub(crate) fn sort_column(name: &str) -> Result<&'static str, Error> {
    match name {
        "id" => Ok("id"),
        "username" => Ok("username"),
        "email" => Ok("email"),
        "type" => Ok("type"),
        "status" => Ok("status"),
        "created_at" => Ok("created_at"),
        "updated_at" => Ok("updated_at"),
        other => Err(Error::InvalidSortColumn(other.to_string())),
    }
}

pub(crate) trait UserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, Error>;

    async fn insert(
        &self,
        username: &str,
        email: &str,
        full_name: Option<&str>,
        password_hash: &str,
    ) -> Result<User, Error>;

    async fn list(
        &self,
        page: u32,
        size: u32,
        sort_by: Option<&str>,
        order: SortOrder,
    ) -> Result<Vec<User>, Error>;

    async fn count(&self) -> Result<i64, Error>;

    /// Stores `token` as the user's single live refresh token, or clears
    /// it when `None`. Returns false when no row matched.
    async fn set_refresh_token(&self, id: i32, token: Option<&str>) -> Result<bool, Error>;

    async fn update_password(&self, id: i32, password_hash: &str) -> Result<bool, Error>;

    async fn delete(&self, id: i32) -> Result<bool, Error>;

    async fn soft_delete(&self, id: i32) -> Result<bool, Error>;
}
