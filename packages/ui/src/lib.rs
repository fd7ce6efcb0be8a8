//! This crate contains all shared UI for the course platform.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

pub(crate) async fn sleep(duration: std::time::Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

pub mod forms;
pub mod guard;
pub mod lists;
pub mod notify;
pub mod pdf_viewer;
pub mod views;

mod session;
#[cfg(test)]
mod testing;

pub use guard::{authorize, AccessDecision, RequireRole, LOGIN_ROUTE};
pub use notify::{use_notifier, Notice, NoticeKind, NotificationHost, Notifier, Operation};
pub use pdf_viewer::PdfViewer;
pub use session::{
    use_api, use_request_scope, use_session, AppClient, AppStorage, LogoutButton, SessionProvider,
};
