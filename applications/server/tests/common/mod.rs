/// Common test utilities and fixtures
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use jap_core::memory::InMemoryStorage;
use jap_server::{create_router, AppState, AuthService};
use jap_storage::SqliteStorage;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-for-testing";

/// Test application backed by a file-based SQLite database
pub struct TestApp {
    pub router: Router,
    pub auth_service: Arc<AuthService>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let pool = jap_storage::create_pool(&db_url).await.unwrap();
        jap_storage::run_migrations(&pool).await.unwrap();

        let auth_service = Arc::new(AuthService::new(TEST_SECRET, 24));
        let app_state = AppState::new(Arc::new(SqliteStorage::new(pool)), Arc::clone(&auth_service));

        Self {
            router: create_router(app_state),
            auth_service,
            _temp_dir: temp_dir,
        }
    }

    /// Send a request and return status plus parsed JSON body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        send(&self.router, request).await
    }

    /// Register the default test user and return their token
    pub async fn register(&self) -> String {
        let (status, body) = self
            .send(post_json("/api/user/submit", None, &full_profile()))
            .await;
        assert_eq!(status, StatusCode::OK, "registration failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }
}

/// Router over an in-memory store that can be switched to failing mode
pub fn in_memory_app(storage: Arc<InMemoryStorage>) -> (Router, Arc<AuthService>) {
    let auth_service = Arc::new(AuthService::new(TEST_SECRET, 24));
    let app_state = AppState::new(storage, Arc::clone(&auth_service));
    (create_router(app_state), auth_service)
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn full_profile() -> Value {
    serde_json::json!({
        "name": "Radha",
        "mobile": "9876543210",
        "location": "Vrindavan",
        "dob": "1990-08-15"
    })
}

pub fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}
