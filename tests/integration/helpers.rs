//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use videotime_api::state::Stores;
use videotime_api::{AppState, build_app};
use videotime_core::config::{AppConfig, StoreBackend};

/// A caller as asserted by the LMS gateway headers.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: Uuid,
    pub role: &'static str,
}

impl Caller {
    pub fn student() -> Self {
        Self {
            user_id: Uuid::new_v4(),
            role: "student",
        }
    }

    pub fn teacher() -> Self {
        Self {
            user_id: Uuid::new_v4(),
            role: "teacher",
        }
    }

    pub fn admin() -> Self {
        Self {
            user_id: Uuid::new_v4(),
            role: "admin",
        }
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for registering hooks
    pub state: AppState,
}

impl TestApp {
    /// Create a test application on the in-memory store with default settings
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application after adjusting the default configuration
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig::default();
        config.tracker.store = StoreBackend::Memory;
        config.cache.enabled = false;
        adjust(&mut config);

        let state = AppState::build(config, Stores::memory())
            .await
            .expect("Failed to build state");
        let router = build_app(state.clone());

        Self { router, state }
    }

    /// Send a request and parse the JSON response
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        caller: Option<&Caller>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(caller) = caller {
            req = req
                .header("x-user-id", caller.user_id.to_string())
                .header("x-user-role", caller.role);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Open a session and return its ID
    pub async fn start_session(&self, module_id: Uuid, caller: &Caller) -> String {
        let response = self
            .request(
                "POST",
                "/api/sessions",
                Some(serde_json::json!({ "module_id": module_id })),
                Some(caller),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.body["data"]["session_id"]
            .as_str()
            .expect("session_id")
            .to_string()
    }

    /// Report a playback position
    pub async fn position(&self, session_id: &str, percent: f64, time: f64, caller: &Caller) {
        let response = self
            .request(
                "POST",
                &format!("/api/sessions/{session_id}/position"),
                Some(serde_json::json!({ "percent": percent, "current_time": time })),
                Some(caller),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    }

    /// Configure a video instance as a teacher
    pub async fn configure(&self, module_id: Uuid, settings: Value) -> TestResponse {
        let mut body = serde_json::json!({
            "name": "Intro lecture",
            "video_url": "https://vimeo.com/76979871",
        });
        if let (Some(body), Some(extra)) = (body.as_object_mut(), settings.as_object()) {
            body.extend(extra.clone());
        }
        self.request(
            "PUT",
            &format!("/api/modules/{module_id}"),
            Some(body),
            Some(&Caller::teacher()),
        )
        .await
    }
}

/// Test response with status and parsed body
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
