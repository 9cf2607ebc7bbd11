use serde::Deserialize;

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_jwt_expiration_minutes() -> i64 {
    1
}

fn default_jwt_refresh_expiration_minutes() -> i64 {
    1440
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct Args {
    pub(crate) database_host: String,
    pub(crate) database_port: u16,
    pub(crate) database_name: String,
    pub(crate) database_user: String,
    pub(crate) database_password: String,
    pub(crate) log_level: String,
    pub(crate) port: u16,
    pub(crate) jwt_secret: String,
    #[serde(default = "default_jwt_algorithm")]
    pub(crate) jwt_algorithm: String,
    #[serde(default = "default_jwt_expiration_minutes")]
    pub(crate) jwt_expiration_minutes: i64,
    #[serde(default = "default_jwt_refresh_expiration_minutes")]
    pub(crate) jwt_refresh_expiration_minutes: i64,
}
