use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::token::codec::TokenError;
use crate::types::response::Envelope;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database migration error: {0}")]
    DatabaseMigration(#[from] sqlx::migrate::MigrateError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Header decode error: {0}")]
    HeaderDecode(#[from] axum::http::header::ToStrError),
    #[error("User not found")]
    UserNotFound,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Token expired")]
    TokenExpired,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Invalid token: subject missing")]
    MissingSubject,
    #[error("Invalid token scope")]
    InvalidScope,
    #[error("Refresh token is invalid or has been logged out")]
    RefreshTokenInvalid,
    #[error("Refresh token mismatch")]
    RefreshTokenMismatch,
    #[error("No credentials provided")]
    NoCredentials,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid username")]
    InvalidUsername,
    #[error("{0}")]
    InvalidPassword(String),
    #[error("Invalid sort column: {0}")]
    InvalidSortColumn(String),
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl From<TokenError> for Error {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => Error::TokenExpired,
            TokenError::Invalid => Error::InvalidToken,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("{:?}", self);

        if let Error::InvalidBody(rejection) = self {
            let data = serde_json::json!({ "body": rejection.body_text() });

            return (StatusCode::UNPROCESSABLE_ENTITY, Json(Envelope::fail(data))).into_response();
        }

        let status = match &self {
            Error::UserNotFound => StatusCode::NOT_FOUND,
            Error::UserAlreadyExists
            | Error::InvalidUsername
            | Error::InvalidPassword(_)
            | Error::InvalidSortColumn(_) => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials
            | Error::TokenExpired
            | Error::InvalidToken
            | Error::MissingSubject
            | Error::InvalidScope
            | Error::RefreshTokenInvalid
            | Error::RefreshTokenMismatch
            | Error::NoCredentials
            | Error::Unauthorized => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(Envelope::<()>::error(&self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_errors_map_to_unauthorized() {
        for err in [
            Error::InvalidCredentials,
            Error::TokenExpired,
            Error::InvalidToken,
            Error::MissingSubject,
            Error::InvalidScope,
            Error::RefreshTokenInvalid,
            Error::RefreshTokenMismatch,
            Error::NoCredentials,
            Error::Unauthorized,
        ] {
            assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn missing_user_maps_to_not_found() {
        let response = Error::UserNotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_errors_map_to_bad_request() {
        for err in [
            Error::UserAlreadyExists,
            Error::InvalidUsername,
            Error::InvalidPassword("Password must be at least 6 characters".to_string()),
            Error::InvalidSortColumn("password_hash".to_string()),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn infrastructure_errors_map_to_internal_server_error() {
        let response = Error::Sql(sqlx::Error::RowNotFound).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn codec_errors_convert_to_their_own_variants() {
        assert!(matches!(
            Error::from(TokenError::Expired),
            Error::TokenExpired
        ));
        assert!(matches!(
            Error::from(TokenError::Invalid),
            Error::InvalidToken
        ));
    }
}
