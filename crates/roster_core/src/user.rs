use serde::{Deserialize, Serialize};

pub type UserId = u64;

/// A user record as exchanged with the directory service.
///
/// `id` is absent until the service assigns one on creation. Extra fields in
/// service payloads are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Creation payload: a user without an id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_payload_ignoring_extra_fields() {
        let raw = r#"{"id":1,"name":"Leanne Graham","username":"Bret","email":"Sincere@april.biz"}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user, User::new(1, "Leanne Graham", "Sincere@april.biz"));
    }

    #[test]
    fn missing_email_decodes_as_empty() {
        let user: User = serde_json::from_str(r#"{"id":2,"name":"Mark"}"#).unwrap();
        assert_eq!(user.email, "");
    }

    #[test]
    fn new_user_encodes_name_and_email_only() {
        let payload = NewUser {
            name: "New User".to_string(),
            email: "new@example.com".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"name": "New User", "email": "new@example.com"})
        );
    }

    #[test]
    fn absent_id_is_omitted_on_encode() {
        let user = User {
            id: None,
            name: "Draft".to_string(),
            email: "draft@example.com".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Draft", "email": "draft@example.com"})
        );
    }
}
