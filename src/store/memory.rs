use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::core::error::Error;
use crate::store::{SortOrder, User, UserStore, sort_column};

#[derive(Debug, Default)]
struct Inner {
    rows: HashMap<i32, User>,
    soft_deleted: HashSet<i32>,
    next_id: i32,
}

/// In-memory stand-in for the Postgres store, mirroring its observable
/// behavior row by row.
#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryUserStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryUserStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn is_soft_deleted(&self, id: i32) -> bool {
        self.inner.lock().await.soft_deleted.contains(&id)
    }
}

impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        let inner = self.inner.lock().await;

        Ok(inner
            .rows
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, Error> {
        let inner = self.inner.lock().await;

        Ok(inner.rows.get(&id).cloned())
    }

    async fn insert(
        &self,
        username: &str,
        email: &str,
        full_name: Option<&str>,
        password_hash: &str,
    ) -> Result<User, Error> {
        let mut inner = self.inner.lock().await;

        if inner
            .rows
            .values()
            .any(|user| user.username == username || user.email == email)
        {
            return Err(Error::UserAlreadyExists);
        }

        inner.next_id += 1;

        let now = Utc::now();
        let user = User {
            id: inner.next_id,
            username: username.to_string(),
            email: email.to_string(),
            full_name: full_name.map(ToString::to_string),
            password_hash: password_hash.to_string(),
            current_refresh_token: None,
            user_type: "100".to_string(),
            status: "100".to_string(),
            created_at: now,
            updated_at: now,
        };

        inner.rows.insert(user.id, user.clone());

        Ok(user)
    }

    async fn list(
        &self,
        page: u32,
        size: u32,
        sort_by: Option<&str>,
        order: SortOrder,
    ) -> Result<Vec<User>, Error> {
        let inner = self.inner.lock().await;

        let mut users: Vec<User> = inner.rows.values().cloned().collect();

        match sort_by {
            Some(name) => {
                let column = sort_column(name)?;

                users.sort_by(|a, b| match column {
                    "username" => a.username.cmp(&b.username),
                    "email" => a.email.cmp(&b.email),
                    "type" => a.user_type.cmp(&b.user_type),
                    "status" => a.status.cmp(&b.status),
                    "created_at" => a.created_at.cmp(&b.created_at),
                    "updated_at" => a.updated_at.cmp(&b.updated_at),
                    _ => a.id.cmp(&b.id),
                });
            }
            None => users.sort_by_key(|user| user.id),
        }

        if order == SortOrder::Desc {
            users.reverse();
        }

        Ok(users
            .into_iter()
            .skip(((page - 1) * size) as usize)
            .take(size as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, Error> {
        let inner = self.inner.lock().await;

        Ok(inner.rows.len() as i64)
    }

    async fn set_refresh_token(&self, id: i32, token: Option<&str>) -> Result<bool, Error> {
        let mut inner = self.inner.lock().await;

        match inner.rows.get_mut(&id) {
            Some(user) => {
                user.current_refresh_token = token.map(ToString::to_string);
                user.updated_at = Utc::now();

                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> Result<bool, Error> {
        let mut inner = self.inner.lock().await;

        match inner.rows.get_mut(&id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();

                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, Error> {
        let mut inner = self.inner.lock().await;

        inner.soft_deleted.remove(&id);

        Ok(inner.rows.remove(&id).is_some())
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, Error> {
        let mut inner = self.inner.lock().await;

        match inner.rows.get_mut(&id) {
            Some(user) => {
                user.updated_at = Utc::now();
            }
            None => return Ok(false),
        }

        inner.soft_deleted.insert(id);

        Ok(true)
    }
}
