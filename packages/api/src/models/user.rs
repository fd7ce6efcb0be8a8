//! # User records
//!
//! [`User`] is the account as the backend reports it. [`UserForm`] is what
//! the admin dashboard submits when creating or editing an account; an empty
//! password on edit means "keep the current one" and is not sent at all.
//! [`RegisterForm`] is the public sign-up form.

use serde::{Deserialize, Serialize};
use store::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    /// First letter of the name, for avatar placeholders.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            password: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_from_backend_json() {
        let user: User = serde_json::from_value(json!({
            "id": 5,
            "name": "siti",
            "email": "siti@kursus.test",
            "role": "instruktur"
        }))
        .unwrap();
        assert_eq!(user.role, Role::Instruktur);
        assert_eq!(user.created_at, None);
        assert_eq!(user.initial(), "S");
    }

    #[test]
    fn test_user_form_omits_empty_password() {
        let form = UserForm {
            name: "Budi".into(),
            email: "budi@kursus.test".into(),
            role: Role::User,
            password: None,
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(
            value,
            json!({"name": "Budi", "email": "budi@kursus.test", "role": "user"})
        );
    }
}
