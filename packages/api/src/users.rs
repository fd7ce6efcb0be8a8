//! User management (admin only on the backend).

use store::KeyValueStorage;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{User, UserForm};
use crate::transport::{HttpTransport, Method};

impl<T: HttpTransport, S: KeyValueStorage> ApiClient<T, S> {
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_data("/users").await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, ApiError> {
        self.get_data(&format!("/users/{id}")).await
    }

    pub async fn create_user(&self, form: &UserForm) -> Result<User, ApiError> {
        self.send_data(Method::POST, "/users", form).await
    }

    pub async fn update_user(&self, id: i64, form: &UserForm) -> Result<User, ApiError> {
        self.send_data(Method::PUT, &format!("/users/{id}"), form).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/users/{id}")).await
    }
}
