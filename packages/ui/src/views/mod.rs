//! Page-level views. Routing lives in the platform crate; these components
//! only know their own URLs by string.

mod modal_overlay;
pub use modal_overlay::{ConfirmDialog, ModalOverlay};

mod auth;
pub use auth::{validate_login, validate_registration, LoginView, RegisterView};

mod landing;
pub use landing::LandingView;

pub mod admin;
pub mod instructor;

/// What a create/edit dialog is working on.
#[derive(Clone, Debug, PartialEq)]
pub enum Editing<T> {
    New,
    Existing(T),
}

impl<T> Editing<T> {
    pub fn existing(&self) -> Option<&T> {
        match self {
            Editing::New => None,
            Editing::Existing(item) => Some(item),
        }
    }
}
