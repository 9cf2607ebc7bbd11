use chrono::Duration;
use sqlx::postgres::PgPool;

use crate::controllers::auth::AuthController;
use crate::controllers::user::UserController;
use crate::core::config::Args;
use crate::core::error::ConfigError;
use crate::store::postgres::PgUserStore;
use crate::token::codec::TokenCodec;

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    pub(crate) pool: PgPool,
    pub(crate) auth: AuthController<PgUserStore>,
    pub(crate) users: UserController<PgUserStore>,
}

impl AppState {
    pub(crate) fn new(pool: PgPool, config: &Args) -> Result<Self, ConfigError> {
        let codec = TokenCodec::new(&config.jwt_secret, &config.jwt_algorithm)?;
        let store = PgUserStore::new(pool.clone());

        Ok(AppState {
            pool,
            auth: AuthController::new(
                store.clone(),
                codec,
                Duration::minutes(config.jwt_expiration_minutes),
                Duration::minutes(config.jwt_refresh_expiration_minutes),
            ),
            users: UserController::new(store)?,
        })
    }
}
