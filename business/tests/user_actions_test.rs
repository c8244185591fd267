//! Integration tests for the per-row mutation calls and commands.

use std::time::Duration;

use steward_business::admin_users::api;
use steward_business::{
    AdminConfig, ApiClient, QuotaCommand, ReleaseUsageCommand, ResetPasswordCommand,
    UserActionCompute, UserActionInput, UserActionKind, UserActionState, UserListCompute,
    UserPage, UserRecord,
};
use steward_states::StateCtx;
use ustr::Ustr;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_base(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

fn ok_response() -> serde_json::Value {
    serde_json::json!({"status": true})
}

fn sample_user(id: i64) -> UserRecord {
    UserRecord {
        id,
        username: format!("user{id}"),
        email: None,
        quota: 100.0,
        used_quota: 0.0,
        is_subscribed: false,
        level: 0,
        total_month: 0,
        enterprise: false,
        is_banned: false,
        is_admin: false,
    }
}

async fn wait_for(ctx: &mut StateCtx, pred: impl Fn(&StateCtx) -> bool) {
    for _ in 0..400 {
        ctx.sync_computes();
        if pred(ctx) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached within 2s");
}

fn action_ctx(server: &MockServer, input: UserActionInput) -> StateCtx {
    let mut ctx = StateCtx::new();
    ctx.add_state(AdminConfig::new(server.uri()));
    ctx.add_state(UserActionInput {
        api_base_url: Some(Ustr::from(&api_base(server))),
        ..input
    });
    ctx.record_compute(UserActionCompute::default());
    ctx.record_compute(UserListCompute::default());
    ctx.record_command(QuotaCommand);
    ctx.record_command(ResetPasswordCommand);
    ctx.record_command(ReleaseUsageCommand);
    ctx
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn quota_delta_sends_no_override_flag() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/user/quota"))
        .and(body_json(serde_json::json!({"id": 1, "quota": 50.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(api_base(&server), None);
    let resp = api::quota_operation(&client, 1, 50.0, false)
        .await
        .expect("call succeeds");
    assert!(resp.status);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn quota_set_sends_override_true() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/user/quota"))
        .and(body_json(serde_json::json!({
            "id": 1,
            "quota": 50.0,
            "override": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(api_base(&server), None);
    let resp = api::quota_operation(&client, 1, 50.0, true)
        .await
        .expect("call succeeds");
    assert!(resp.status);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn release_usage_sends_only_the_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/user/release"))
        .and(body_json(serde_json::json!({"id": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(api_base(&server), None);
    let resp = api::release_usage_operation(&client, 2)
        .await
        .expect("call succeeds");
    assert!(resp.status);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn password_and_email_bodies_match_the_backend_forms() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/user/password"))
        .and(body_json(
            serde_json::json!({"id": 4, "password": "hunter2"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_response()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/user/email"))
        .and(body_json(
            serde_json::json!({"id": 4, "email": "new@example.com"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(api_base(&server), None);
    assert!(
        api::update_password(&client, 4, "hunter2")
            .await
            .expect("password call")
            .status
    );
    assert!(
        api::update_email(&client, 4, "new@example.com")
            .await
            .expect("email call")
            .status
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn quota_command_success_reports_success_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/user/quota"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_response()))
        .mount(&server)
        .await;

    let mut ctx = action_ctx(
        &server,
        UserActionInput {
            amount: Some(50.0),
            ..UserActionInput::for_user(1)
        },
    );
    ctx.dispatch::<QuotaCommand>();

    wait_for(&mut ctx, |ctx| {
        ctx.cached::<UserActionCompute>()
            .map(UserActionCompute::is_finished)
            .unwrap_or(false)
    })
    .await;

    let action = ctx.cached::<UserActionCompute>().expect("compute recorded");
    assert_eq!(
        action.state(),
        &UserActionState::Success {
            kind: UserActionKind::AdjustQuota,
            user_id: 1,
        }
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failed_mutation_reports_reason_and_leaves_page_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/user/quota"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": false,
            "message": "insufficient balance",
        })))
        .mount(&server)
        .await;

    let mut ctx = action_ctx(
        &server,
        UserActionInput {
            amount: Some(-500.0),
            ..UserActionInput::for_user(1)
        },
    );
    // The table already shows a page; the failed mutation must not disturb it.
    if let Some(list) = ctx.cached_mut::<UserListCompute>() {
        *list = UserListCompute::ready(UserPage {
            total: 1,
            data: vec![sample_user(1)],
        });
    }

    ctx.dispatch::<QuotaCommand>();
    wait_for(&mut ctx, |ctx| {
        ctx.cached::<UserActionCompute>()
            .map(UserActionCompute::is_finished)
            .unwrap_or(false)
    })
    .await;

    let action = ctx.cached::<UserActionCompute>().expect("compute recorded");
    assert_eq!(
        action.state(),
        &UserActionState::Error {
            kind: UserActionKind::AdjustQuota,
            user_id: 1,
            message: "insufficient balance".to_owned(),
        }
    );

    // No refresh was queued by the business layer and the page is unchanged.
    assert_eq!(ctx.pending_commands(), 0);
    let list = ctx.cached::<UserListCompute>().expect("compute recorded");
    assert_eq!(list.rows().len(), 1);
    assert_eq!(list.rows()[0].id, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_input_fails_without_touching_the_network() {
    let server = MockServer::start().await;

    // No mocks mounted: any request would 404 and fail differently.
    let mut ctx = action_ctx(&server, UserActionInput::default());
    ctx.dispatch::<ResetPasswordCommand>();

    wait_for(&mut ctx, |ctx| {
        ctx.cached::<UserActionCompute>()
            .map(UserActionCompute::is_finished)
            .unwrap_or(false)
    })
    .await;

    let action = ctx.cached::<UserActionCompute>().expect("compute recorded");
    assert!(matches!(
        action.state(),
        UserActionState::Error { message, .. } if message.contains("user_id")
    ));
}
