use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store;

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Status {
    Success,
    Fail,
    Error,
}

/// Uniform body shape for every response the service produces, success
/// and failure alike.
#[derive(Debug, Serialize)]
pub(crate) struct Envelope<T> {
    pub(crate) status: Status,
    pub(crate) data: Option<T>,
    pub(crate) message: Option<String>,
}

impl<T> Envelope<T> {
    pub(crate) fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            data: Some(data),
            message: None,
        }
    }

    pub(crate) fn success_message(data: Option<T>, message: &str) -> Self {
        Self {
            status: Status::Success,
            data,
            message: Some(message.to_string()),
        }
    }

    pub(crate) fn fail(data: T) -> Self {
        Self {
            status: Status::Fail,
            data: Some(data),
            message: None,
        }
    }

    pub(crate) fn error(message: &str) -> Self {
        Self {
            status: Status::Error,
            data: None,
            message: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TokenPair {
    pub(crate) access_token: String,
    pub(crate) refresh_token: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct User {
    pub(crate) id: i32,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) full_name: Option<String>,
    #[serde(rename = "type")]
    pub(crate) user_type: String,
    pub(crate) status: String,
    pub(crate) current_refresh_token: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl From<store::User> for User {
    fn from(user: store::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            user_type: user.user_type,
            status: user.status,
            current_refresh_token: user.current_refresh_token,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Page<T> {
    pub(crate) items: Vec<T>,
    pub(crate) total: i64,
    pub(crate) page: u32,
    pub(crate) size: u32,
    pub(crate) total_pages: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelopes_serialize_with_null_message() {
        let value =
            serde_json::to_value(Envelope::success(serde_json::json!({ "id": 1 }))).unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["id"], 1);
        assert_eq!(value["message"], serde_json::Value::Null);
    }

    #[test]
    fn error_envelopes_serialize_with_null_data() {
        let value = serde_json::to_value(Envelope::<()>::error("User not found")).unwrap();

        assert_eq!(value["status"], "error");
        assert_eq!(value["data"], serde_json::Value::Null);
        assert_eq!(value["message"], "User not found");
    }

    #[test]
    fn fail_envelopes_carry_their_data() {
        let value =
            serde_json::to_value(Envelope::fail(serde_json::json!({ "body": "oops" }))).unwrap();

        assert_eq!(value["status"], "fail");
        assert_eq!(value["data"]["body"], "oops");
    }

    #[test]
    fn user_payloads_never_contain_the_password_hash() {
        let user = User::from(store::User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            full_name: Some("Alice Example".to_string()),
            password_hash: "$2b$12$secret".to_string(),
            current_refresh_token: None,
            user_type: "100".to_string(),
            status: "100".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });

        let value = serde_json::to_value(&user).unwrap();

        assert!(value.get("password_hash").is_none());
        assert!(value.get("password").is_none());
        assert_eq!(value["type"], "100");
        assert_eq!(value["username"], "alice");
    }
}
