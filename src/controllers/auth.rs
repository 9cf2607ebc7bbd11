use chrono::Duration;

use crate::core::error::Error;
use crate::store::{User, UserStore};
use crate::token::codec::{Scope, TokenCodec};
use crate::types::response::TokenPair;
use crate::utils::password;

/// Session lifecycle: credential login, access-token refresh, logout
/// and bearer authentication.
///
/// A user has at most one live refresh token, stored on their row. Each
/// login overwrites it, so the newest session wins and older refresh
/// tokens die even before they expire.
#[derive(Clone, Debug)]
pub(crate) struct AuthController<S: UserStore> {
    store: S,
    codec: TokenCodec,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl<S: UserStore> AuthController<S> {
    pub(crate) fn new(store: S, codec: TokenCodec, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            store,
            codec,
            access_ttl,
            refresh_ttl,
        }
    }

    pub(crate) async fn login(&self, username: &str, password: &str) -> Result<TokenPair, Error> {
        let user = self
            .store
            .find_by_username(username)
            .await?
            .ok_or(Error::UserNotFound)?;

        if !password::verify(password, &user.password_hash) {
            return Err(Error::InvalidCredentials);
        }

        let access_token = self.codec.issue(&user.username, Scope::Access, self.access_ttl)?;
        let refresh_token = self
            .codec
            .issue(&user.username, Scope::Refresh, self.refresh_ttl)?;

        if !self
            .store
            .set_refresh_token(user.id, Some(&refresh_token))
            .await?
        {
            return Err(Error::UserNotFound);
        }

        tracing::info!(username = %user.username, "user logged in");

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Exchanges a live refresh token for a fresh access token. The
    /// presented token must match the stored one byte for byte.
    pub(crate) async fn refresh(&self, refresh_token: &str) -> Result<String, Error> {
        let claims = self.codec.validate(refresh_token)?;

        if claims.sub.is_empty() {
            return Err(Error::MissingSubject);
        }

        let user = self
            .store
            .find_by_username(&claims.sub)
            .await?
            .ok_or(Error::UserNotFound)?;

        if user.current_refresh_token.as_deref() != Some(refresh_token) {
            return Err(Error::RefreshTokenInvalid);
        }

        tracing::info!(username = %user.username, "access token refreshed");

        self.codec.issue(&user.username, Scope::Access, self.access_ttl)
    }

    pub(crate) async fn logout(&self, username: &str, refresh_token: &str) -> Result<(), Error> {
        let user = self
            .store
            .find_by_username(username)
            .await?
            .ok_or(Error::UserNotFound)?;

        if user.current_refresh_token.as_deref() != Some(refresh_token) {
            return Err(Error::RefreshTokenMismatch);
        }

        if !self.store.set_refresh_token(user.id, None).await? {
            return Err(Error::UserNotFound);
        }

        tracing::info!(username = %user.username, "user logged out");

        Ok(())
    }

    /// Resolves a bearer access token to its user. Refresh tokens are
    /// not accepted here.
    pub(crate) async fn authenticate(&self, token: &str) -> Result<User, Error> {
        let claims = self.codec.validate(token)?;

        if claims.scope != Scope::Access {
            return Err(Error::InvalidScope);
        }

        if claims.sub.is_empty() {
            return Err(Error::MissingSubject);
        }

        self.store
            .find_by_username(&claims.sub)
            .await?
            .ok_or(Error::Unauthorized)
    }
}
