use regex::Regex;

use crate::core::error::{self, Error};
use crate::store::{SortOrder, User, UserStore};
use crate::types::response;
use crate::utils::password;

#[derive(Clone, Debug)]
pub(crate) struct UserController<S: UserStore> {
    store: S,
    username_pattern: Regex,
}

impl<S: UserStore> UserController<S> {
    pub(crate) fn new(store: S) -> Result<Self, error::ConfigError> {
        Ok(Self {
            store,
            username_pattern: Regex::new(r"^[a-zA-Z0-9_-]{3,50}$")?,
        })
    }

    pub(crate) async fn create(
        &self,
        username: &str,
        email: &str,
        full_name: Option<&str>,
        password: &str,
    ) -> Result<User, Error> {
        if !self.username_pattern.is_match(username) {
            return Err(Error::InvalidUsername);
        }

        if password.len() < 6 {
            return Err(Error::InvalidPassword(
                "Password must be at least 6 characters".to_owned(),
            ));
        }

        let password_hash = password::hash(password)?;

        let user = self
            .store
            .insert(username, email, full_name, &password_hash)
            .await?;

        tracing::info!(username = %user.username, id = user.id, "user created");

        Ok(user)
    }

    pub(crate) async fn get(&self, id: i32) -> Result<User, Error> {
        self.store.find_by_id(id).await?.ok_or(Error::UserNotFound)
    }

    pub(crate) async fn list(
        &self,
        page: u32,
        size: u32,
        sort_by: Option<&str>,
        order: SortOrder,
    ) -> Result<response::Page<response::User>, Error> {
        let page = page.max(1);
        let size = size.max(1);

        let users = self.store.list(page, size, sort_by, order).await?;
        let total = self.store.count().await?;
        let total_pages = (total + i64::from(size) - 1) / i64::from(size);

        Ok(response::Page {
            items: users.into_iter().map(response::User::from).collect(),
            total,
            page,
            size,
            total_pages,
        })
    }

    pub(crate) async fn update_password(&self, id: i32, new_password: &str) -> Result<(), Error> {
        if new_password.len() < 6 {
            return Err(Error::InvalidPassword(
                "Password must be at least 6 characters".to_owned(),
            ));
        }

        let password_hash = password::hash(new_password)?;

        if !self.store.update_password(id, &password_hash).await? {
            return Err(Error::UserNotFound);
        }

        Ok(())
    }

    pub(crate) async fn delete(&self, id: i32) -> Result<(), Error> {
        if !self.store.delete(id).await? {
            return Err(Error::UserNotFound);
        }

        tracing::info!(id, "user deleted");

        Ok(())
    }

    pub(crate) async fn soft_delete(&self, id: i32) -> Result<(), Error> {
        if !self.store.soft_delete(id).await? {
            return Err(Error::UserNotFound);
        }

        Ok(())
    }
}
