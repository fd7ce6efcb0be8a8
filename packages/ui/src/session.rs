//! Session context and hooks for the UI.
//!
//! [`SessionProvider`] builds the single [`AppClient`] for the application
//! and exposes it, together with a reactive copy of the [`Session`], through
//! context. Views never read browser storage directly.

use api::{ApiClient, RequestScope};
use dioxus::prelude::*;
use store::{ClientConfig, Session};

use crate::notify::{use_notifier, Notice};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type AppStorage = store::LocalStorage;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type AppStorage = store::MemoryStorage;

#[cfg(not(test))]
pub type AppTransport = api::ReqwestTransport;
#[cfg(test)]
pub type AppTransport = api::testing::MockTransport;

pub type AppClient = ApiClient<AppTransport, AppStorage>;

#[cfg(not(test))]
fn make_transport(config: &ClientConfig) -> AppTransport {
    match api::ReqwestTransport::new(config) {
        Ok(transport) => transport,
        Err(e) => {
            tracing::error!("Failed to configure HTTP client: {}", e);
            api::ReqwestTransport::default()
        }
    }
}

#[cfg(test)]
fn make_transport(config: &ClientConfig) -> AppTransport {
    api::testing::MockTransport::new(&config.api.base_url)
}

fn make_client(config: ClientConfig) -> AppClient {
    let transport = make_transport(&config);
    ApiClient::new(config, transport, AppStorage::default())
}

/// The shared API client.
pub fn use_api() -> AppClient {
    use_context::<AppClient>()
}

/// The current session. Updates on login, logout and on any 401.
pub fn use_session() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

/// A [`RequestScope`] cancelled when the calling component unmounts.
pub fn use_request_scope() -> RequestScope {
    let scope = use_hook(RequestScope::new);
    let on_drop = scope.clone();
    use_drop(move || on_drop.cancel());
    scope
}

/// Provider component that owns the API client and session state.
/// Must sit inside [`crate::NotificationHost`].
///
/// Builds the client from `config` unless a prebuilt `client` is passed.
#[component]
pub fn SessionProvider(
    #[props(default)] config: Option<ClientConfig>,
    #[props(default)] client: Option<AppClient>,
    children: Element,
) -> Element {
    let client = use_hook(move || client.unwrap_or_else(|| make_client(config.unwrap_or_default())));
    let session = use_signal(|| client.session());
    let notifier = use_notifier();

    use_hook({
        let client = client.clone();
        move || {
            client.on_unauthorized(move || {
                let mut session = session;
                session.set(Session::LoggedOut);
                notifier.show(Notice::session_expired());
            });
        }
    });

    use_context_provider(|| client.clone());
    use_context_provider(|| session);

    rsx! {
        {children}
    }
}

/// Button that ends the session and returns to the login page.
#[component]
pub fn LogoutButton(
    #[props(default = "Keluar".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let api = use_api();
    let mut session = use_session();
    let nav = use_navigator();

    let onclick = move |_| {
        let api = api.clone();
        async move {
            api.logout().await;
            session.set(Session::LoggedOut);
            nav.replace(crate::guard::LOGIN_ROUTE);
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
