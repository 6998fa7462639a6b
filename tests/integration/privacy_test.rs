//! Integration tests for watch data erasure.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{Caller, TestApp};

#[tokio::test]
async fn test_erase_user_requires_admin() {
    let app = TestApp::new().await;
    let student = Caller::student();
    app.start_session(Uuid::new_v4(), &student).await;

    let path = format!("/api/users/{}/sessions", student.user_id);
    let response = app.request("DELETE", &path, None, Some(&Caller::teacher())).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_erase_user_removes_all_their_sessions() {
    let app = TestApp::new().await;
    let student = Caller::student();
    let bystander = Caller::student();
    let module_a = Uuid::new_v4();
    let module_b = Uuid::new_v4();
    app.start_session(module_a, &student).await;
    app.start_session(module_b, &student).await;
    app.start_session(module_a, &bystander).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/users/{}/sessions", student.user_id),
            None,
            Some(&Caller::admin()),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["deleted"], json!(2));

    let summary = app
        .request(
            "GET",
            &format!("/api/modules/{module_a}/summary"),
            None,
            Some(&bystander),
        )
        .await;
    assert_eq!(summary.body["data"]["session_count"], json!(1));
}

#[tokio::test]
async fn test_erase_module_and_module_user() {
    let app = TestApp::new().await;
    let module_id = Uuid::new_v4();
    let first = Caller::student();
    let second = Caller::student();
    app.start_session(module_id, &first).await;
    app.start_session(module_id, &second).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/modules/{module_id}/users/{}/sessions", first.user_id),
            None,
            Some(&Caller::admin()),
        )
        .await;
    assert_eq!(response.body["data"]["deleted"], json!(1));

    let response = app
        .request(
            "DELETE",
            &format!("/api/modules/{module_id}/sessions"),
            None,
            Some(&Caller::admin()),
        )
        .await;
    assert_eq!(response.body["data"]["deleted"], json!(1));
}

#[tokio::test]
async fn test_erased_user_starts_fresh() {
    let app = TestApp::new().await;
    let student = Caller::student();
    let module_id = Uuid::new_v4();
    let before = app.start_session(module_id, &student).await;

    app.request(
        "DELETE",
        &format!("/api/users/{}/sessions", student.user_id),
        None,
        Some(&Caller::admin()),
    )
    .await;

    let after = app.start_session(module_id, &student).await;
    assert_ne!(before, after);
}
