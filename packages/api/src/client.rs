//! # Authenticated request wrapper
//!
//! [`ApiClient`] owns the transport, the [`SessionStore`] and the 401 policy.
//! Every endpoint in this crate funnels through one of two entry points:
//!
//! - [`ApiClient::send_public`]: no credentials; used by login, register and
//!   the public catalogue.
//! - [`ApiClient::send_authenticated`]: attaches `Authorization: Bearer`.
//!   Fails with [`ApiError::NotAuthenticated`] before touching the network
//!   when no session exists.
//!
//! ## 401 policy
//!
//! Each login starts a new session *epoch*. An authenticated request records
//! the epoch it was sent under. When a 401 comes back for the current epoch
//! and has not been handled yet, the session is cleared and the
//! unauthorized hook fires. Further 401s from the same epoch (duplicate
//! in-flight requests) are absorbed, and a 401 belonging to an older epoch
//! never clears a session established afterwards.

use std::cell::RefCell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use store::{ClientConfig, KeyValueStorage, Role, Session, SessionStore};

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method};

type Hook = Rc<dyn Fn()>;

#[derive(Debug, Default)]
struct AuthEpoch {
    current: u64,
    handled: bool,
}

struct ClientInner<T, S> {
    config: ClientConfig,
    transport: T,
    sessions: SessionStore<S>,
    epoch: RefCell<AuthEpoch>,
    on_unauthorized: RefCell<Option<Hook>>,
}

/// Shared handle to the REST API. Cloning is cheap.
pub struct ApiClient<T, S> {
    inner: Rc<ClientInner<T, S>>,
}

impl<T, S> Clone for ApiClient<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, S> PartialEq for ApiClient<T, S> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

#[derive(Deserialize)]
struct Envelope<R> {
    data: R,
}

/// Decode `{ "data": R }`, falling back to a bare `R`.
pub fn decode_data<R: DeserializeOwned>(response: &ApiResponse) -> Result<R, ApiError> {
    if let Ok(envelope) = serde_json::from_slice::<Envelope<R>>(&response.body) {
        return Ok(envelope.data);
    }
    Ok(serde_json::from_slice::<R>(&response.body)?)
}

impl<T: HttpTransport, S: KeyValueStorage> ApiClient<T, S> {
    pub fn new(config: ClientConfig, transport: T, storage: S) -> Self {
        Self {
            inner: Rc::new(ClientInner {
                config,
                transport,
                sessions: SessionStore::new(storage),
                epoch: RefCell::new(AuthEpoch::default()),
                on_unauthorized: RefCell::new(None),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn session(&self) -> Session {
        self.inner.sessions.session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.sessions.is_authenticated()
    }

    /// Register the callback run when the backend rejects the session.
    /// Replaces any previous hook.
    pub fn on_unauthorized(&self, hook: impl Fn() + 'static) {
        *self.inner.on_unauthorized.borrow_mut() = Some(Rc::new(hook));
    }

    pub fn url(&self, path: &str) -> String {
        self.inner.config.api_url(path)
    }

    /// Persist a fresh login and re-arm the 401 hook.
    pub(crate) fn begin_session(&self, token: &str, user_id: i64, role: Role) {
        self.inner.sessions.set_session(token, user_id, role);
        let mut epoch = self.inner.epoch.borrow_mut();
        epoch.current += 1;
        epoch.handled = false;
    }

    pub(crate) fn end_session(&self) {
        self.inner.sessions.clear_session();
        self.inner.epoch.borrow_mut().current += 1;
    }

    /// Attach the bearer token. Synchronous: fails before any I/O when
    /// there is no session.
    pub fn authorize(&self, request: ApiRequest) -> Result<(ApiRequest, u64), ApiError> {
        let Session::LoggedIn(creds) = self.inner.sessions.session() else {
            return Err(ApiError::NotAuthenticated);
        };
        let mut request = request.header("Authorization", format!("Bearer {}", creds.token));
        if !request.has_header("Accept") {
            request = request.header("Accept", "application/json");
        }
        Ok((request, self.inner.epoch.borrow().current))
    }

    fn handle_unauthorized(&self, epoch: u64) {
        let hook = {
            let mut state = self.inner.epoch.borrow_mut();
            if state.current != epoch || state.handled {
                debug!(epoch, "duplicate or stale 401 ignored");
                return;
            }
            state.handled = true;
            self.inner.sessions.clear_session();
            self.inner.on_unauthorized.borrow().clone()
        };
        warn!("session rejected by server, signing out");
        if let Some(hook) = hook {
            hook();
        }
    }

    fn check(response: ApiResponse) -> Result<ApiResponse, ApiError> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_response(&response))
        }
    }

    #[tracing::instrument(skip_all, fields(method = %request.method, url = %request.url), level = "debug")]
    pub async fn send_authenticated(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let (request, epoch) = self.authorize(request)?;
        let response = self.inner.transport.send(request).await?;
        if response.status == 401 {
            self.handle_unauthorized(epoch);
            return Err(ApiError::Unauthorized);
        }
        Self::check(response)
    }

    #[tracing::instrument(skip_all, fields(method = %request.method, url = %request.url), level = "debug")]
    pub async fn send_public(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let request = if request.has_header("Accept") {
            request
        } else {
            request.header("Accept", "application/json")
        };
        let response = self.inner.transport.send(request).await?;
        Self::check(response)
    }

    /// Send a request without the 401 policy, ignoring the outcome.
    pub(crate) async fn send_best_effort(&self, request: ApiRequest) {
        if let Err(e) = self.inner.transport.send(request).await {
            debug!(error = %e, "best-effort request failed");
        }
    }

    pub(crate) async fn get_data<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self
            .send_authenticated(ApiRequest::new(Method::GET, self.url(path)))
            .await?;
        decode_data(&response)
    }

    pub(crate) async fn send_data<B, R>(&self, method: Method, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: serde::Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = ApiRequest::new(method, self.url(path)).json(body)?;
        let response = self.send_authenticated(request).await?;
        decode_data(&response)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send_authenticated(ApiRequest::new(Method::DELETE, self.url(path)))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use std::cell::Cell;
    use store::MemoryStorage;

    const BASE: &str = "http://api.test/api";

    fn client() -> (ApiClient<MockTransport, MemoryStorage>, MockTransport) {
        let mock = MockTransport::new(BASE);
        let client = ApiClient::new(ClientConfig::new(BASE), mock.clone(), MemoryStorage::new());
        (client, mock)
    }

    #[tokio::test]
    async fn test_no_session_fails_before_network() {
        let (client, mock) = client();
        let result = client
            .send_authenticated(ApiRequest::new(Method::GET, client.url("/users")))
            .await;
        assert_eq!(result, Err(ApiError::NotAuthenticated));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let (client, mock) = client();
        client.begin_session("tok-1", 1, Role::Admin);
        mock.on(Method::GET, "/users", ApiResponse::json(200, serde_json::json!({"data": []})));

        let users: Vec<crate::User> = client.get_data("/users").await.unwrap();
        assert!(users.is_empty());

        let sent = mock.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].header_value("Authorization"), Some("Bearer tok-1"));
        assert_eq!(sent[0].header_value("Accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_concurrent_401s_fire_hook_once() {
        let mock = MockTransport::new(BASE).yielding();
        let client = ApiClient::new(ClientConfig::new(BASE), mock.clone(), MemoryStorage::new());
        client.begin_session("stale", 2, Role::Instruktur);
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        client.on_unauthorized(move || counter.set(counter.get() + 1));
        mock.on(Method::GET, "/categories", ApiResponse::empty(401));
        mock.on(Method::GET, "/courses", ApiResponse::empty(401));

        let (a, b) = futures::join!(
            client.send_authenticated(ApiRequest::new(Method::GET, client.url("/categories"))),
            client.send_authenticated(ApiRequest::new(Method::GET, client.url("/courses"))),
        );

        assert_eq!(a, Err(ApiError::Unauthorized));
        assert_eq!(b, Err(ApiError::Unauthorized));
        assert_eq!(fired.get(), 1);
        assert_eq!(mock.requests().len(), 2);
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_relogin_rearms_hook() {
        let (client, mock) = client();
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        client.on_unauthorized(move || counter.set(counter.get() + 1));
        mock.on(Method::GET, "/users", ApiResponse::empty(401));

        client.begin_session("a", 1, Role::Admin);
        let _ = client.get_data::<Vec<crate::User>>("/users").await;
        client.begin_session("b", 1, Role::Admin);
        let _ = client.get_data::<Vec<crate::User>>("/users").await;

        assert_eq!(fired.get(), 2);
    }

    #[tokio::test]
    async fn test_stale_401_does_not_clear_new_session() {
        let (client, _mock) = client();
        client.begin_session("old", 1, Role::Admin);
        let (_, old_epoch) = client
            .authorize(ApiRequest::new(Method::GET, client.url("/users")))
            .unwrap();
        client.begin_session("new", 1, Role::Admin);

        client.handle_unauthorized(old_epoch);
        assert!(client.is_authenticated());
        assert_eq!(client.session().token(), Some("new"));
    }

    #[test]
    fn test_decode_accepts_bare_payload() {
        let wrapped = ApiResponse::json(200, serde_json::json!({"data": {"id": 1, "name": "Desain"}}));
        let bare = ApiResponse::json(200, serde_json::json!({"id": 1, "name": "Desain"}));
        let a: crate::Category = decode_data(&wrapped).unwrap();
        let b: crate::Category = decode_data(&bare).unwrap();
        assert_eq!(a, b);
        assert!(decode_data::<crate::Category>(&ApiResponse::empty(200)).is_err());
    }
}
