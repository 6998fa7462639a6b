//! Integration tests for the player-facing session endpoints.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use videotime_plugin::{ClosureHandler, HookPayload, HookPoint, HookResult};

use crate::helpers::{Caller, TestApp, TestResponse};

#[tokio::test]
async fn test_create_session_is_idempotent() {
    let app = TestApp::new().await;
    let student = Caller::student();
    let module_id = Uuid::new_v4();

    let first = app.start_session(module_id, &student).await;
    let second = app.start_session(module_id, &student).await;
    assert_eq!(first, second);

    let other = app.start_session(module_id, &Caller::student()).await;
    assert_ne!(first, other);
}

#[tokio::test]
async fn test_ticks_accumulate() {
    let app = TestApp::new().await;
    let student = Caller::student();
    let session_id = app.start_session(Uuid::new_v4(), &student).await;

    for elapsed in [5.0, 5.0, 7.5] {
        let response = app
            .request(
                "POST",
                &format!("/api/sessions/{session_id}/tick"),
                Some(json!({ "elapsed_seconds": elapsed })),
                Some(&student),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app
        .request(
            "POST",
            &format!("/api/sessions/{session_id}/tick"),
            Some(json!({ "elapsed_seconds": 0.0 })),
            Some(&student),
        )
        .await;
    assert_eq!(response.body["data"]["cumulative_watch_time"], json!(17.5));
}

#[tokio::test]
async fn test_position_never_lowers_percent() {
    let app = TestApp::new().await;
    let student = Caller::student();
    let session_id = app.start_session(Uuid::new_v4(), &student).await;

    app.position(&session_id, 0.5, 50.0, &student).await;
    let response = app
        .request(
            "POST",
            &format!("/api/sessions/{session_id}/position"),
            Some(json!({ "percent": 0.3, "current_time": 30.0 })),
            Some(&student),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["percent_watched"], json!(0.5));
    assert_eq!(response.body["data"]["current_position"], json!(30.0));
}

#[tokio::test]
async fn test_finish_then_new_visit_opens_fresh_session() {
    let app = TestApp::new().await;
    let student = Caller::student();
    let module_id = Uuid::new_v4();
    let session_id = app.start_session(module_id, &student).await;

    let response = app
        .request(
            "POST",
            &format!("/api/sessions/{session_id}/finish"),
            Some(json!({ "final_percent": 0.97, "final_time": 97.0 })),
            Some(&student),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["state"], json!("finished"));
    assert_eq!(response.body["data"]["percent_watched"], json!(1.0));

    let next = app.start_session(module_id, &student).await;
    assert_ne!(next, session_id);
}

#[tokio::test]
async fn test_finished_session_reused_when_configured() {
    let app = TestApp::with_config(|c| c.tracker.new_session_after_finish = false).await;
    let student = Caller::student();
    let module_id = Uuid::new_v4();
    let session_id = app.start_session(module_id, &student).await;

    app.request(
        "POST",
        &format!("/api/sessions/{session_id}/finish"),
        Some(json!({ "final_percent": 1.0, "final_time": 100.0 })),
        Some(&student),
    )
    .await;

    assert_eq!(app.start_session(module_id, &student).await, session_id);
}

#[tokio::test]
async fn test_out_of_range_percent_is_rejected() {
    let app = TestApp::new().await;
    let student = Caller::student();
    let session_id = app.start_session(Uuid::new_v4(), &student).await;

    let response = app
        .request(
            "POST",
            &format!("/api/sessions/{session_id}/position"),
            Some(json!({ "percent": 1.5, "current_time": 10.0 })),
            Some(&student),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], json!("VALIDATION"));
}

#[tokio::test]
async fn test_malformed_body_is_validation_error() {
    let app = TestApp::new().await;
    let student = Caller::student();
    let session_id = app.start_session(Uuid::new_v4(), &student).await;

    let response = app
        .request(
            "POST",
            &format!("/api/sessions/{session_id}/tick"),
            Some(json!({ "elapsed": "five" })),
            Some(&student),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], json!("VALIDATION"));
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            &format!("/api/sessions/{}/tick", Uuid::new_v4()),
            Some(json!({ "elapsed_seconds": 5.0 })),
            Some(&Caller::student()),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn test_other_users_session_is_forbidden() {
    let app = TestApp::new().await;
    let owner = Caller::student();
    let session_id = app.start_session(Uuid::new_v4(), &owner).await;

    let response = app
        .request(
            "POST",
            &format!("/api/sessions/{session_id}/tick"),
            Some(json!({ "elapsed_seconds": 5.0 })),
            Some(&Caller::student()),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            &format!("/api/sessions/{session_id}/tick"),
            Some(json!({ "elapsed_seconds": 5.0 })),
            Some(&Caller::admin()),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/sessions",
            Some(json!({ "module_id": Uuid::new_v4() })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], json!("AUTHENTICATION"));
}

#[tokio::test]
async fn test_seek_limited_when_fast_forwarding_prevented() {
    let app = TestApp::new().await;
    let module_id = Uuid::new_v4();
    let response = app
        .configure(module_id, json!({ "prevent_fast_forwarding": true }))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);

    let student = Caller::student();
    let session_id = app.start_session(module_id, &student).await;
    app.position(&session_id, 0.2, 20.0, &student).await;

    let denied = seek(&app, &session_id, &student, 0.5).await;
    assert_eq!(denied.status, StatusCode::OK);
    assert_eq!(denied.body["data"]["allowed"], json!(false));
    let max = denied.body["data"]["max_percent"].as_f64().unwrap();
    assert!((max - 0.21).abs() < 1e-9);

    let allowed = seek(&app, &session_id, &student, 0.205).await;
    assert_eq!(allowed.body["data"]["allowed"], json!(true));

    let backwards = seek(&app, &session_id, &student, 0.05).await;
    assert_eq!(backwards.body["data"]["allowed"], json!(true));
}

#[tokio::test]
async fn test_seek_unrestricted_by_default() {
    let app = TestApp::new().await;
    let student = Caller::student();
    let session_id = app.start_session(Uuid::new_v4(), &student).await;

    let response = app
        .request(
            "POST",
            &format!("/api/sessions/{session_id}/seek"),
            Some(json!({ "percent": 0.9 })),
            Some(&student),
        )
        .await;
    assert_eq!(response.body["data"]["allowed"], json!(true));
}

#[tokio::test]
async fn test_finish_fires_hooks() {
    let app = TestApp::new().await;
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    for hook in [HookPoint::OnSessionFinished, HookPoint::OnCompletionUpdated] {
        let tx = tx.clone();
        app.state
            .plugins
            .register_hook(
                hook,
                Arc::new(ClosureHandler::new("recorder", 100, move |payload: HookPayload| {
                    let tx = tx.clone();
                    async move {
                        let _ = tx.send((payload.hook, payload.get_string("module_id").map(String::from)));
                        HookResult::handled("recorder")
                    }
                })),
            )
            .await;
    }

    let module_id = Uuid::new_v4();
    app.configure(module_id, json!({ "completion_on_finish": true }))
        .await;
    let student = Caller::student();
    let session_id = app.start_session(module_id, &student).await;
    app.request(
        "POST",
        &format!("/api/sessions/{session_id}/finish"),
        Some(json!({ "final_percent": 1.0, "final_time": 60.0 })),
        Some(&student),
    )
    .await;

    let mut seen = Vec::new();
    while let Ok(event) = rx.try_recv() {
        seen.push(event);
    }
    let module = Some(module_id.to_string());
    assert!(seen.contains(&(HookPoint::OnSessionFinished, module.clone())));
    assert!(seen.contains(&(HookPoint::OnCompletionUpdated, module)));
}

#[tokio::test]
async fn test_failing_hook_does_not_fail_finish() {
    let app = TestApp::new().await;
    app.state
        .plugins
        .register_hook(
            HookPoint::OnSessionFinished,
            Arc::new(ClosureHandler::new("broken", 100, |_payload: HookPayload| async {
                HookResult::failed("broken", "LMS unavailable")
            })),
        )
        .await;

    let student = Caller::student();
    let session_id = app.start_session(Uuid::new_v4(), &student).await;
    let response = app
        .request(
            "POST",
            &format!("/api/sessions/{session_id}/finish"),
            Some(json!({ "final_percent": 1.0, "final_time": 60.0 })),
            Some(&student),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["state"], json!("finished"));
}

async fn seek(app: &TestApp, session_id: &str, caller: &Caller, percent: f64) -> TestResponse {
    app.request(
        "POST",
        &format!("/api/sessions/{session_id}/seek"),
        Some(json!({ "percent": percent })),
        Some(caller),
    )
    .await
}
