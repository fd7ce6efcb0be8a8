//! # API crate: REST client for the course platform
//!
//! Every data operation the dashboards perform is a call made through
//! [`ApiClient`]. The client owns the persisted session, attaches the bearer
//! token, applies the 401 policy in one place, and decodes the backend's JSON.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`client`] | none | [`ApiClient`]: authenticated/public send, session epochs, unauthorized hook |
//! | [`transport`] | none | [`HttpTransport`] seam, owned request/response types |
//! | [`scope`] | none | [`RequestScope`]: cancellation of requests tied to a view |
//! | [`models`] | none | Users, categories, courses, PDF materials and their forms |
//! | [`error`] | none | [`ApiError`] taxonomy with Indonesian summaries |
//! | [`testing`] | `testing` | [`testing::MockTransport`] for scripted responses |
//!
//! ## Endpoints
//!
//! - **Auth**: `login`, `register`, `logout`
//! - **Users**: `list_users`, `get_user`, `create_user`, `update_user`, `delete_user`
//! - **Categories**: `list_categories`, `create_category`, `update_category`, `delete_category`
//! - **Courses**: `list_courses`, `list_instructor_courses`, `list_public_courses`,
//!   `get_course`, `create_course`, `update_course`, `delete_course`
//! - **PDFs**: `list_pdfs`, `upload_pdf`, `update_pdf`, `delete_pdf`, `fetch_pdf`

pub mod auth;
mod categories;
pub mod client;
mod courses;
pub mod error;
mod http;
pub mod models;
mod pdfs;
pub mod scope;
pub mod transport;
mod users;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::{decode_data, ApiClient};
pub use error::ApiError;
pub use http::ReqwestTransport;
pub use models::{
    Category, CategoryForm, Course, CourseForm, CoursePdf, FileUpload, PdfPayload, PdfSource,
    RegisterForm, Role, User, UserForm,
};
pub use scope::RequestScope;
pub use transport::{ApiRequest, ApiResponse, FormField, HttpTransport, Method, RequestBody};
