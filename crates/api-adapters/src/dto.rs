//! Request and response bodies.
//!
//! Request fields are optional so that a missing field reaches the validator
//! (and produces its message) instead of failing JSON extraction.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use domains::{PublicUser, UserId};
use services::RegisterInput;

/// Registration fields of the wrong JSON type count as missing, so the
/// caller sees the validator's message rather than a decoding error.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub password: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: PublicUser,
}

/// Body of reaction and delete requests: just the acting user.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRequest {
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub user_id: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// An id the caller cannot prove is a user is treated like no id at all.
pub fn parse_actor(raw: Option<&str>) -> Option<UserId> {
    raw.and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registration_fields_of_the_wrong_type_are_missing() {
        let req: RegisterRequest =
            serde_json::from_value(json!({ "name": 42, "email": ["a@b.co"], "password": "pw" }))
                .unwrap();
        assert_eq!(req.name, None);
        assert_eq!(req.email, None);
        assert_eq!(req.password.as_deref(), Some("pw"));

        let req: RegisterRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.name.is_none() && req.email.is_none() && req.password.is_none());
    }

    #[test]
    fn actor_ids_that_do_not_parse_are_dropped() {
        let id = UserId::new();
        assert_eq!(parse_actor(Some(&id.to_string())), Some(id));
        assert_eq!(parse_actor(Some("12345")), None);
        assert_eq!(parse_actor(None), None);
    }

    #[test]
    fn request_bodies_use_camel_case_user_id() {
        let req: CommentRequest =
            serde_json::from_str(r#"{"userId":"abc","text":"hi"}"#).unwrap();
        assert_eq!(req.user_id.as_deref(), Some("abc"));
        assert_eq!(req.text.as_deref(), Some("hi"));
    }
}
