//! Course catalogue.
//!
//! Plain edits go out as JSON. When a thumbnail file is attached the same
//! fields are sent as multipart form data; updates then use `POST` with a
//! `_method=PUT` override, since the backend only parses multipart bodies on
//! `POST`.

use store::KeyValueStorage;

use crate::client::{decode_data, ApiClient};
use crate::error::ApiError;
use crate::models::{Course, CourseForm, FileUpload};
use crate::transport::{ApiRequest, FormField, HttpTransport, Method};

/// Multipart has no `null`: a cleared field is sent as an empty string,
/// which the backend stores as null.
fn course_fields(form: &CourseForm, thumbnail: FileUpload) -> Vec<FormField> {
    let id_text = |id: Option<i64>| id.map(|id| id.to_string()).unwrap_or_default();
    let mut fields = vec![
        FormField::text("title", form.title.clone()),
        FormField::text("description", form.description.clone().unwrap_or_default()),
        FormField::text("category_id", id_text(form.category_id)),
        FormField::text("instructor_id", id_text(form.instructor_id)),
    ];
    fields.push(FormField::File {
        name: "thumbnail".into(),
        file_name: thumbnail.file_name,
        mime: thumbnail.mime,
        bytes: thumbnail.bytes,
    });
    fields
}

impl<T: HttpTransport, S: KeyValueStorage> ApiClient<T, S> {
    pub async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.get_data("/courses").await
    }

    /// Courses owned by the logged-in instructor.
    pub async fn list_instructor_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.get_data("/instruktur/courses").await
    }

    /// Catalogue shown on the landing page; needs no session.
    pub async fn list_public_courses(&self) -> Result<Vec<Course>, ApiError> {
        let response = self
            .send_public(ApiRequest::new(Method::GET, self.url("/public/courses")))
            .await?;
        decode_data(&response)
    }

    pub async fn get_course(&self, id: i64) -> Result<Course, ApiError> {
        self.get_data(&format!("/courses/{id}")).await
    }

    pub async fn create_course(
        &self,
        form: &CourseForm,
        thumbnail: Option<FileUpload>,
    ) -> Result<Course, ApiError> {
        match thumbnail {
            None => self.send_data(Method::POST, "/courses", form).await,
            Some(file) => {
                let request = ApiRequest::new(Method::POST, self.url("/courses"))
                    .multipart(course_fields(form, file));
                decode_data(&self.send_authenticated(request).await?)
            }
        }
    }

    pub async fn update_course(
        &self,
        id: i64,
        form: &CourseForm,
        thumbnail: Option<FileUpload>,
    ) -> Result<Course, ApiError> {
        let path = format!("/courses/{id}");
        match thumbnail {
            None => self.send_data(Method::PUT, &path, form).await,
            Some(file) => {
                let mut fields = course_fields(form, file);
                fields.push(FormField::text("_method", "PUT"));
                let request = ApiRequest::new(Method::POST, self.url(&path)).multipart(fields);
                decode_data(&self.send_authenticated(request).await?)
            }
        }
    }

    pub async fn delete_course(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/courses/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use store::{ClientConfig, MemoryStorage, Role};

    use super::*;
    use crate::testing::MockTransport;
    use crate::transport::ApiResponse;
    use crate::RequestBody;

    fn client() -> (ApiClient<MockTransport, MemoryStorage>, MockTransport) {
        let mock = MockTransport::new("http://api.test/api");
        let client = ApiClient::new(
            ClientConfig::new("http://api.test/api"),
            mock.clone(),
            MemoryStorage::new(),
        );
        (client, mock)
    }

    #[tokio::test]
    async fn test_public_catalogue_needs_no_session() {
        let (client, mock) = client();
        mock.on(
            Method::GET,
            "/public/courses",
            ApiResponse::json(200, json!({"data": [{"id": 1, "title": "Dasar Rust"}]})),
        );
        let courses = client.list_public_courses().await.unwrap();
        assert_eq!(courses.len(), 1);
        assert!(!mock.requests()[0].has_header("Authorization"));
    }

    #[tokio::test]
    async fn test_update_with_thumbnail_uses_method_override() {
        let (client, mock) = client();
        client.begin_session("t", 1, Role::Admin);
        mock.on(
            Method::POST,
            "/courses/8",
            ApiResponse::json(200, json!({"data": {"id": 8, "title": "Baru"}})),
        );

        let form = CourseForm {
            title: "Baru".into(),
            category_id: Some(2),
            ..CourseForm::default()
        };
        let thumb = FileUpload {
            file_name: "t.png".into(),
            mime: "image/png".into(),
            bytes: vec![1, 2, 3],
        };
        let course = client.update_course(8, &form, Some(thumb)).await.unwrap();
        assert_eq!(course.title, "Baru");

        let RequestBody::Multipart(fields) = &mock.requests()[0].body else {
            panic!("expected multipart body");
        };
        let names: Vec<&str> = fields.iter().map(FormField::name).collect();
        assert_eq!(
            names,
            ["title", "description", "category_id", "instructor_id", "thumbnail", "_method"]
        );
        assert!(fields.contains(&FormField::text("category_id", "2")));
        assert!(fields.contains(&FormField::text("description", "")));
    }

    #[tokio::test]
    async fn test_update_without_thumbnail_is_json_put_with_cleared_fields() {
        let (client, mock) = client();
        client.begin_session("t", 1, Role::Admin);
        mock.on(
            Method::PUT,
            "/courses/8",
            ApiResponse::json(200, json!({"id": 8, "title": "Lama"})),
        );
        client
            .update_course(8, &CourseForm { title: "Lama".into(), ..CourseForm::default() }, None)
            .await
            .unwrap();
        assert_eq!(
            mock.requests()[0].body,
            RequestBody::Json(json!({
                "title": "Lama",
                "description": null,
                "category_id": null,
                "instructor_id": null
            }))
        );
    }
}
