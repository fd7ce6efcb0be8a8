//! Login, registration and logout.

use serde::{Deserialize, Serialize};
use tracing::info;

use store::KeyValueStorage;

use crate::client::{decode_data, ApiClient};
use crate::error::ApiError;
use crate::models::{RegisterForm, User};
use crate::transport::{ApiRequest, HttpTransport, Method};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    #[serde(default, alias = "access_token")]
    token: Option<String>,
    user: User,
}

impl<T: HttpTransport, S: KeyValueStorage> ApiClient<T, S> {
    /// Exchange credentials for a session. On success the session is
    /// persisted and the returned user carries the role to route to.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let request = ApiRequest::new(Method::POST, self.url("/login")).json(&LoginRequest {
            email: email.trim(),
            password,
        })?;
        let response = self.send_public(request).await.map_err(|e| match e {
            ApiError::Unauthorized => ApiError::InvalidCredentials,
            other => other,
        })?;
        let auth: AuthResponse = decode_data(&response)?;
        let Some(token) = auth.token.filter(|t| !t.is_empty()) else {
            return Err(ApiError::Decode("login response without token".into()));
        };
        self.begin_session(&token, auth.user.id, auth.user.role);
        info!(user_id = auth.user.id, role = %auth.user.role, "logged in");
        Ok(auth.user)
    }

    /// Create an account. When the backend answers with a token the new user
    /// is logged in right away; otherwise the caller should send them to the
    /// login page.
    pub async fn register(&self, form: &RegisterForm) -> Result<User, ApiError> {
        let request = ApiRequest::new(Method::POST, self.url("/register")).json(form)?;
        let response = self.send_public(request).await?;
        let auth: AuthResponse = decode_data(&response)?;
        if let Some(token) = auth.token.filter(|t| !t.is_empty()) {
            self.begin_session(&token, auth.user.id, auth.user.role);
            info!(user_id = auth.user.id, "registered and logged in");
        }
        Ok(auth.user)
    }

    /// Revoke the token server-side (best effort) and forget the session.
    /// Never fails: the local session is gone either way.
    pub async fn logout(&self) {
        if let Ok((request, _)) = self.authorize(ApiRequest::new(Method::POST, self.url("/logout"))) {
            self.send_best_effort(request).await;
        }
        self.end_session();
        info!("logged out");
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use store::{ClientConfig, MemoryStorage, Role};

    use super::*;
    use crate::testing::MockTransport;
    use crate::transport::ApiResponse;

    const BASE: &str = "http://api.test/api";

    fn client() -> (ApiClient<MockTransport, MemoryStorage>, MockTransport, MemoryStorage) {
        let mock = MockTransport::new(BASE);
        let storage = MemoryStorage::new();
        let client = ApiClient::new(ClientConfig::new(BASE), mock.clone(), storage.clone());
        (client, mock, storage)
    }

    fn user_json(role: &str) -> serde_json::Value {
        json!({"id": 12, "name": "Rina", "email": "rina@kursus.test", "role": role})
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let (client, mock, storage) = client();
        mock.on(
            Method::POST,
            "/login",
            ApiResponse::json(200, json!({"token": "t-123", "user": user_json("instruktur")})),
        );

        let user = client.login(" rina@kursus.test ", "rahasia").await.unwrap();
        assert_eq!(user.role, Role::Instruktur);
        assert_eq!(storage.get("token").as_deref(), Some("t-123"));
        assert_eq!(storage.get("userId").as_deref(), Some("12"));
        assert_eq!(storage.get("role").as_deref(), Some("instruktur"));

        let sent = &mock.requests()[0];
        assert!(!sent.has_header("Authorization"));
        assert_eq!(
            sent.body,
            crate::RequestBody::Json(json!({"email": "rina@kursus.test", "password": "rahasia"}))
        );
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let (client, mock, _) = client();
        mock.on(Method::POST, "/login", ApiResponse::json(401, json!({"message": "Unauthorized"})));
        assert_eq!(
            client.login("x@kursus.test", "salah").await,
            Err(ApiError::InvalidCredentials)
        );
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_without_token_stays_logged_out() {
        let (client, mock, _) = client();
        mock.on(Method::POST, "/register", ApiResponse::json(201, json!({"user": user_json("user")})));
        let form = RegisterForm {
            name: "Rina".into(),
            email: "rina@kursus.test".into(),
            password: "rahasia123".into(),
            password_confirmation: "rahasia123".into(),
        };
        let user = client.register(&form).await.unwrap();
        assert_eq!(user.role, Role::User);
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_fails() {
        let (client, mock, storage) = client();
        mock.on(
            Method::POST,
            "/login",
            ApiResponse::json(200, json!({"data": {"token": "t", "user": user_json("admin")}})),
        );
        mock.fail(Method::POST, "/logout", ApiError::Transport("offline".into()));

        client.login("rina@kursus.test", "pw").await.unwrap();
        client.logout().await;

        assert!(!client.is_authenticated());
        assert!(storage.is_empty());
        assert_eq!(mock.requests_to(Method::POST, "/logout").len(), 1);
    }
}
