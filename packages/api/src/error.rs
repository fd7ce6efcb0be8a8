use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::transport::ApiResponse;

/// Every way a call against the REST API can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No session at call time. Raised before any network traffic.
    #[error("no active session")]
    NotAuthenticated,

    /// The backend rejected the bearer token (HTTP 401).
    #[error("session rejected by server")]
    Unauthorized,

    /// Login refused the supplied email/password.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// HTTP 422 with per-field messages.
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        errors: BTreeMap<String, Vec<String>>,
    },

    #[error("http {status}: {message}")]
    Status { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid payload: {0}")]
    Decode(String),

    #[error("expected a PDF document, got {mime}")]
    NotPdf { mime: String },

    #[error("request cancelled")]
    Cancelled,
}

/// Error body shape used by the backend for non-2xx answers.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: BTreeMap<String, Vec<String>>,
}

impl ApiError {
    /// Classify a non-2xx response.
    pub fn from_response(response: &ApiResponse) -> Self {
        let body: ErrorBody = serde_json::from_slice(&response.body).unwrap_or_default();
        let message = body
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("status {}", response.status));

        match response.status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            422 => ApiError::Validation {
                message,
                errors: body.errors,
            },
            status => ApiError::Status { status, message },
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    /// Whether the error means the user must log in again.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::NotAuthenticated | ApiError::Unauthorized)
    }

    /// Short Indonesian description of the cause, suitable for a toast body.
    pub fn summary(&self) -> String {
        match self {
            ApiError::NotAuthenticated => "Anda belum login, silakan login terlebih dahulu".into(),
            ApiError::Unauthorized => "Sesi Anda telah berakhir, silakan login kembali".into(),
            ApiError::InvalidCredentials => "Email atau kata sandi salah".into(),
            ApiError::Forbidden(_) => "Anda tidak memiliki akses untuk tindakan ini".into(),
            ApiError::NotFound(_) => "Data tidak ditemukan".into(),
            ApiError::Validation { message, errors } => {
                let fields: Vec<&str> = errors
                    .values()
                    .filter_map(|msgs| msgs.first().map(String::as_str))
                    .collect();
                if fields.is_empty() {
                    message.clone()
                } else {
                    fields.join("; ")
                }
            }
            ApiError::Status { status, .. } if *status >= 500 => {
                "Terjadi kesalahan pada server".into()
            }
            ApiError::Status { status, .. } => format!("Permintaan ditolak server ({status})"),
            ApiError::Transport(_) => "Tidak dapat terhubung ke server".into(),
            ApiError::Decode(_) => "Respons server tidak valid".into(),
            ApiError::NotPdf { .. } => "Berkas yang diterima bukan dokumen PDF".into(),
            ApiError::Cancelled => "Permintaan dibatalkan".into(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_body_is_parsed() {
        let response = ApiResponse::json(
            422,
            json!({
                "message": "The given data was invalid.",
                "errors": {
                    "email": ["Email sudah digunakan."],
                    "name": ["Nama wajib diisi.", "Nama terlalu pendek."]
                }
            }),
        );
        let err = ApiError::from_response(&response);
        let ApiError::Validation { errors, .. } = &err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(err.summary(), "Email sudah digunakan.; Nama wajib diisi.");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from_response(&ApiResponse::empty(401)),
            ApiError::Unauthorized
        );
        assert!(matches!(
            ApiError::from_response(&ApiResponse::json(404, json!({"message": "Kategori tidak ada"}))),
            ApiError::NotFound(m) if m == "Kategori tidak ada"
        ));
        assert!(matches!(
            ApiError::from_response(&ApiResponse::empty(500)),
            ApiError::Status { status: 500, .. }
        ));
    }

    #[test]
    fn test_non_json_error_body() {
        let response = ApiResponse::bytes(502, "text/html", b"<html>Bad gateway</html>".to_vec());
        let err = ApiError::from_response(&response);
        assert_eq!(
            err,
            ApiError::Status {
                status: 502,
                message: "status 502".into()
            }
        );
        assert_eq!(err.summary(), "Terjadi kesalahan pada server");
    }
}
