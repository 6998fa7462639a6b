//! Integration tests for per-instance endpoints: resume, progress,
//! completion, tabs and configuration.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use videotime_core::settings::AdminSetting;

use crate::helpers::{Caller, TestApp};

async fn resume(app: &TestApp, module_id: Uuid, duration: f64, caller: &Caller) -> f64 {
    let response = app
        .request(
            "GET",
            &format!("/api/modules/{module_id}/resume?duration={duration}"),
            None,
            Some(caller),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    response.body["data"]["seconds"].as_f64().unwrap()
}

#[tokio::test]
async fn test_resume_without_history_is_zero() {
    let app = TestApp::new().await;
    assert_eq!(resume(&app, Uuid::new_v4(), 120.0, &Caller::student()).await, 0.0);
}

#[tokio::test]
async fn test_resume_returns_last_position_unless_near_end() {
    let app = TestApp::new().await;
    let student = Caller::student();
    let module_id = Uuid::new_v4();
    let session_id = app.start_session(module_id, &student).await;
    app.position(&session_id, 0.5, 99.0, &student).await;

    assert_eq!(resume(&app, module_id, 200.0, &student).await, 99.0);
    assert_eq!(resume(&app, module_id, 100.4, &student).await, 0.0);
    assert_eq!(resume(&app, module_id, 100.0, &student).await, 0.0);
}

#[tokio::test]
async fn test_resume_requires_duration() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "GET",
            &format!("/api/modules/{}/resume", Uuid::new_v4()),
            None,
            Some(&Caller::student()),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_resume_disabled_on_instance() {
    let app = TestApp::new().await;
    let module_id = Uuid::new_v4();
    app.configure(module_id, json!({ "resume_playback": false }))
        .await;

    let student = Caller::student();
    let session_id = app.start_session(module_id, &student).await;
    app.position(&session_id, 0.5, 42.0, &student).await;

    assert_eq!(resume(&app, module_id, 200.0, &student).await, 0.0);
}

#[tokio::test]
async fn test_forced_default_overrides_instance() {
    let app = TestApp::with_config(|c| c.defaults.resume_playback = AdminSetting::forced(false)).await;
    let module_id = Uuid::new_v4();
    app.configure(module_id, json!({ "resume_playback": true }))
        .await;

    let response = app
        .request(
            "GET",
            &format!("/api/modules/{module_id}"),
            None,
            Some(&Caller::student()),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["instance"]["resume_playback"], json!(true));
    assert_eq!(response.body["data"]["effective"]["resume_playback"], json!(false));

    let student = Caller::student();
    let session_id = app.start_session(module_id, &student).await;
    app.position(&session_id, 0.5, 42.0, &student).await;
    assert_eq!(resume(&app, module_id, 200.0, &student).await, 0.0);
}

#[tokio::test]
async fn test_unconfigured_module_uses_defaults() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "GET",
            &format!("/api/modules/{}", Uuid::new_v4()),
            None,
            Some(&Caller::student()),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["instance"].is_null());
    assert!(response.body["data"]["player"].is_null());
    assert_eq!(response.body["data"]["effective"]["configured"], json!(false));
}

#[tokio::test]
async fn test_configure_requires_teacher() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "PUT",
            &format!("/api/modules/{}", Uuid::new_v4()),
            Some(json!({ "name": "Intro", "video_url": "https://vimeo.com/1" })),
            Some(&Caller::student()),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_configure_rejects_bad_input() {
    let app = TestApp::new().await;
    let module_id = Uuid::new_v4();

    let response = app
        .configure(module_id, json!({ "video_url": "not a url" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .configure(module_id, json!({ "completion_on_percent_value": 0 }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_module_configuration() {
    let app = TestApp::new().await;
    let module_id = Uuid::new_v4();
    app.configure(module_id, json!({})).await;

    let path = format!("/api/modules/{module_id}");
    let response = app.request("DELETE", &path, None, Some(&Caller::teacher())).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("DELETE", &path, None, Some(&Caller::teacher())).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tabs_render_with_player() {
    let app = TestApp::new().await;
    let module_id = Uuid::new_v4();
    app.configure(module_id, json!({})).await;

    let response = app
        .request(
            "GET",
            &format!("/api/modules/{module_id}/tabs"),
            None,
            Some(&Caller::student()),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["watch", "information"]);

    let module = app
        .request(
            "GET",
            &format!("/api/modules/{module_id}"),
            None,
            Some(&Caller::student()),
        )
        .await;
    assert_eq!(module.body["data"]["player"]["player"], json!("vimeo"));
}

#[tokio::test]
async fn test_only_configured_tabs_render() {
    let app = TestApp::with_config(|c| c.plugins.tabs = vec!["watch".to_string()]).await;
    let response = app
        .request(
            "GET",
            &format!("/api/modules/{}/tabs", Uuid::new_v4()),
            None,
            Some(&Caller::student()),
        )
        .await;
    assert_eq!(response.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_completion_on_percent() {
    let app = TestApp::new().await;
    let module_id = Uuid::new_v4();
    app.configure(
        module_id,
        json!({ "completion_on_percent": true, "completion_on_percent_value": 50 }),
    )
    .await;

    let student = Caller::student();
    let path = format!("/api/modules/{module_id}/completion");

    let before = app.request("GET", &path, None, Some(&student)).await;
    assert_eq!(before.status, StatusCode::OK);
    assert_eq!(before.body["data"]["outcomes"][0]["rule"], json!("on_percent"));
    assert_eq!(before.body["data"]["outcomes"][0]["satisfied"], json!(false));

    let session_id = app.start_session(module_id, &student).await;
    app.position(&session_id, 0.6, 60.0, &student).await;

    let after = app.request("GET", &path, None, Some(&student)).await;
    assert_eq!(after.body["data"]["outcomes"][0]["satisfied"], json!(true));
}

#[tokio::test]
async fn test_summary_spans_sessions() {
    let app = TestApp::new().await;
    let student = Caller::student();
    let module_id = Uuid::new_v4();

    let first = app.start_session(module_id, &student).await;
    app.request(
        "POST",
        &format!("/api/sessions/{first}/tick"),
        Some(json!({ "elapsed_seconds": 10.0 })),
        Some(&student),
    )
    .await;
    app.request(
        "POST",
        &format!("/api/sessions/{first}/finish"),
        Some(json!({ "final_percent": 1.0, "final_time": 10.0 })),
        Some(&student),
    )
    .await;

    let second = app.start_session(module_id, &student).await;
    app.request(
        "POST",
        &format!("/api/sessions/{second}/tick"),
        Some(json!({ "elapsed_seconds": 5.0 })),
        Some(&student),
    )
    .await;
    app.position(&second, 0.3, 3.0, &student).await;

    let response = app
        .request(
            "GET",
            &format!("/api/modules/{module_id}/summary"),
            None,
            Some(&student),
        )
        .await;

    let data = &response.body["data"];
    assert_eq!(data["session_count"], json!(2));
    assert_eq!(data["total_watch_time"], json!(15.0));
    assert_eq!(data["max_percent"], json!(1.0));
    assert_eq!(data["finished"], json!(true));
    assert_eq!(data["last_position"], json!(3.0));
}

#[tokio::test]
async fn test_reading_other_users_progress_needs_teacher() {
    let app = TestApp::new().await;
    let student = Caller::student();
    let module_id = Uuid::new_v4();
    app.start_session(module_id, &student).await;

    let path = format!("/api/modules/{module_id}/summary?user_id={}", student.user_id);

    let response = app.request("GET", &path, None, Some(&Caller::student())).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("GET", &path, None, Some(&Caller::teacher())).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["session_count"], json!(1));
}

#[tokio::test]
async fn test_view_is_acknowledged() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            &format!("/api/modules/{}/view", Uuid::new_v4()),
            None,
            Some(&Caller::student()),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], json!(true));
}

#[tokio::test]
async fn test_list_sessions_for_teacher() {
    let app = TestApp::new().await;
    let module_id = Uuid::new_v4();
    for _ in 0..3 {
        app.start_session(module_id, &Caller::student()).await;
    }

    let path = format!("/api/modules/{module_id}/sessions?per_page=2");

    let response = app.request("GET", &path, None, Some(&Caller::student())).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("GET", &path, None, Some(&Caller::teacher())).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total_items"], json!(3));
    assert_eq!(response.body["data"]["total_pages"], json!(2));
    assert_eq!(response.body["data"]["items"].as_array().unwrap().len(), 2);
}
