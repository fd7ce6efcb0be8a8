use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;

use store::ClientConfig;

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, FormField, HttpTransport, RequestBody};

/// [`HttpTransport`] backed by `reqwest` (the browser `fetch` API on WASM).
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(config.request.timeout_secs));
        #[cfg(target_arch = "wasm32")]
        let _ = config;

        Ok(Self {
            http: builder.build()?,
        })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

fn build_form(fields: Vec<FormField>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File {
                name,
                file_name,
                mime,
                bytes,
            } => {
                let part = Part::bytes(bytes).file_name(file_name).mime_str(&mime)?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = self.http.request(request.method.clone(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(fields) => builder.multipart(build_form(fields)?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        debug!(
            method = %request.method,
            url = %request.url,
            status,
            bytes = body.len(),
            "http response"
        );

        Ok(ApiResponse {
            status,
            content_type,
            body,
        })
    }
}
