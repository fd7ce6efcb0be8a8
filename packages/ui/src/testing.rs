//! Shared helpers for component tests.

use std::time::Duration;

use api::testing::MockTransport;
use api::{ApiClient, ApiResponse, Method};
use dioxus::dioxus_core::NoOpMutations;
use dioxus::prelude::*;
use store::{ClientConfig, MemoryStorage, Role};

use crate::session::AppClient;

pub const BASE: &str = "http://api.test/api";

/// A client whose session was established through a scripted login.
pub async fn logged_in_client(role: Role) -> (AppClient, MockTransport) {
    let mock = MockTransport::new(BASE);
    let client = ApiClient::new(ClientConfig::new(BASE), mock.clone(), MemoryStorage::new());
    mock.on(
        Method::POST,
        "/login",
        ApiResponse::json(
            200,
            serde_json::json!({
                "token": "t",
                "user": {"id": 1, "name": "Tester", "email": "tester@kursus.test", "role": role.as_str()}
            }),
        ),
    );
    client.login("tester@kursus.test", "rahasia123").await.unwrap();
    (client, mock)
}

/// Drive spawned tasks, effects and re-renders until the tree stops changing.
pub async fn settle(dom: &mut VirtualDom) {
    for _ in 0..8 {
        let _ = tokio::time::timeout(Duration::from_millis(5), dom.wait_for_work()).await;
        dom.render_immediate(&mut NoOpMutations);
    }
}

pub fn html(dom: &VirtualDom) -> String {
    dioxus_ssr::render(dom)
}
