#![allow(dead_code)]

//! Shared helpers for the UI integration tests: a wiremock-backed app
//! harness plus JSON builders for the list endpoint.

use std::time::Duration;

use egui_kittest::Harness;
use kittest::Queryable;
use steward_ui::StewardApp;
use steward_ui::state::State;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn user_json(id: i64, username: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.com"),
        "quota": 100.0,
        "used_quota": 10.0,
        "is_subscribed": false,
        "level": 0,
        "total_month": 0,
        "enterprise": false,
        "is_banned": false,
        "is_admin": false,
    })
}

pub fn page_json(total: u64, users: &[serde_json::Value]) -> serde_json::Value {
    serde_json::json!({
        "status": true,
        "total": total,
        "data": users,
    })
}

pub async fn start_server() -> MockServer {
    let _ = env_logger::builder().is_test(true).try_init();
    MockServer::start().await
}

/// Mount a catch-all mock for the list endpoint.
pub async fn mount_user_list(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/admin/user/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn app_harness(state: State) -> Harness<'static, StewardApp> {
    let app = StewardApp::new(state);
    Harness::new_eframe(|_| app)
}

/// True when at least one node carries the label (several cells may repeat
/// the same text, e.g. a username and the matching email address).
pub fn has_label(harness: &Harness<'_, StewardApp>, label: &str) -> bool {
    harness.query_all_by_label_contains(label).next().is_some()
}

/// Step frames until a label shows up; commands resolve on the background
/// runtime, so this awaits between frames to keep the mock server serving.
pub async fn wait_for_label(harness: &mut Harness<'_, StewardApp>, label: &str) {
    for _ in 0..200 {
        harness.step();
        if has_label(harness, label) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("label `{label}` did not appear within 2s");
}
