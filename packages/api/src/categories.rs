use store::KeyValueStorage;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Category, CategoryForm};
use crate::transport::{HttpTransport, Method};

impl<T: HttpTransport, S: KeyValueStorage> ApiClient<T, S> {
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_data("/categories").await
    }

    pub async fn create_category(&self, form: &CategoryForm) -> Result<Category, ApiError> {
        self.send_data(Method::POST, "/categories", form).await
    }

    pub async fn update_category(&self, id: i64, form: &CategoryForm) -> Result<Category, ApiError> {
        self.send_data(Method::PUT, &format!("/categories/{id}"), form).await
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/categories/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use store::{ClientConfig, MemoryStorage, Role};

    use super::*;
    use crate::testing::MockTransport;
    use crate::transport::ApiResponse;

    #[tokio::test]
    async fn test_create_category_sends_json() {
        let mock = MockTransport::new("http://api.test/api");
        let client = ApiClient::new(
            ClientConfig::new("http://api.test/api"),
            mock.clone(),
            MemoryStorage::new(),
        );
        client.begin_session("t", 1, Role::Admin);
        mock.on(
            Method::POST,
            "/categories",
            ApiResponse::json(201, json!({"data": {"id": 4, "name": "Bisnis"}})),
        );

        let created = client
            .create_category(&CategoryForm {
                name: "Bisnis".into(),
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(created.id, 4);
        assert_eq!(
            mock.requests()[0].body,
            crate::RequestBody::Json(json!({"name": "Bisnis", "description": null}))
        );
    }

    #[tokio::test]
    async fn test_delete_missing_category_is_not_found() {
        let mock = MockTransport::new("http://api.test/api");
        let client = ApiClient::new(
            ClientConfig::new("http://api.test/api"),
            mock.clone(),
            MemoryStorage::new(),
        );
        client.begin_session("t", 1, Role::Admin);
        mock.on(
            Method::DELETE,
            "/categories/99",
            ApiResponse::json(404, json!({"message": "Category not found"})),
        );

        let err = client.delete_category(99).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert!(client.is_authenticated());
    }
}
