//! PDF course materials: listing, upload, replace, delete and byte retrieval.

use store::KeyValueStorage;

use crate::client::{decode_data, ApiClient};
use crate::error::ApiError;
use crate::models::{CoursePdf, FileUpload, PdfPayload, PdfSource};
use crate::transport::{ApiRequest, FormField, HttpTransport, Method};

fn file_field(file: FileUpload) -> FormField {
    FormField::File {
        name: "file".into(),
        file_name: file.file_name,
        mime: file.mime,
        bytes: file.bytes,
    }
}

impl<T: HttpTransport, S: KeyValueStorage> ApiClient<T, S> {
    pub async fn list_pdfs(&self, course_id: i64) -> Result<Vec<CoursePdf>, ApiError> {
        self.get_data(&format!("/courses/{course_id}/pdfs")).await
    }

    pub async fn upload_pdf(
        &self,
        course_id: i64,
        title: &str,
        file: FileUpload,
    ) -> Result<CoursePdf, ApiError> {
        let request = ApiRequest::new(Method::POST, self.url(&format!("/courses/{course_id}/pdfs")))
            .multipart(vec![FormField::text("title", title), file_field(file)]);
        let response = self.send_authenticated(request).await?;
        decode_data(&response)
    }

    /// Rename a material and optionally replace its file.
    pub async fn update_pdf(
        &self,
        pdf_id: i64,
        title: &str,
        file: Option<FileUpload>,
    ) -> Result<CoursePdf, ApiError> {
        let mut fields = vec![FormField::text("_method", "PUT"), FormField::text("title", title)];
        if let Some(file) = file {
            fields.push(file_field(file));
        }
        let request =
            ApiRequest::new(Method::POST, self.url(&format!("/pdfs/{pdf_id}"))).multipart(fields);
        let response = self.send_authenticated(request).await?;
        decode_data(&response)
    }

    pub async fn delete_pdf(&self, pdf_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/pdfs/{pdf_id}")).await
    }

    /// Fetch the raw document bytes. The authenticated endpoint goes through
    /// the 401 policy; static paths are fetched without credentials.
    pub async fn fetch_pdf(&self, source: &PdfSource) -> Result<PdfPayload, ApiError> {
        let response = match source {
            PdfSource::Api { pdf_id } => {
                let request =
                    ApiRequest::new(Method::GET, self.url(&format!("/pdfs/{pdf_id}/download")))
                        .header("Accept", "application/pdf");
                self.send_authenticated(request).await?
            }
            PdfSource::Static { path } => {
                let request = ApiRequest::new(Method::GET, self.config().storage_url(path))
                    .header("Accept", "application/pdf");
                self.send_public(request).await?
            }
        };
        Ok(PdfPayload {
            mime: response.mime(),
            bytes: response.body,
        })
    }
}
