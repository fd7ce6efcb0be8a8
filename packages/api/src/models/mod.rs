//! Records exchanged with the REST API.

mod course;
mod user;

pub use course::{
    Category, CategoryForm, Course, CourseForm, CoursePdf, FileUpload, PdfPayload, PdfSource,
};
pub use store::Role;
pub use user::{RegisterForm, User, UserForm};
