//! Integration test harness: a full application router backed by a
//! throwaway SQLite database and upload directory.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Extension, Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::util::ServiceExt;
use tower_http::services::ServeDir;
use uuid::Uuid;

use shopdesk_api::config::AppConfig;
use shopdesk_api::db::{establish_connection, run_migrations, DbPool};
use shopdesk_api::handlers::AppServices;
use shopdesk_api::{app_router, AppState};

pub const TEST_PHONE: &str = "9876543210";

pub struct TestApp {
    pub router: Router,
    pub db: Arc<DbPool>,
    pub services: AppServices,
    // Owns the database file and upload directory for the test's lifetime
    _workdir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let workdir = TempDir::new().expect("failed to create test workdir");
        let db_path = workdir.path().join(format!("shopdesk_{}.db", Uuid::new_v4()));
        let upload_dir = workdir.path().join("uploads");

        let mut config = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "test_secret_key_for_testing_purposes_only_32chars".to_string(),
            3600,
            "127.0.0.1".to_string(),
            0,
            "test".to_string(),
        );
        config.allowed_phones = TEST_PHONE.to_string();
        config.upload_dir = upload_dir.display().to_string();

        let db = Arc::new(
            establish_connection(&config.database_url)
                .await
                .expect("failed to open test database"),
        );
        run_migrations(&db).await.expect("migrations failed");

        let services = AppServices::new(db.clone(), &config).expect("failed to build services");
        let auth = services.auth.clone();

        let state = AppState {
            db: db.clone(),
            config: config.clone(),
            services: services.clone(),
        };

        let router = app_router(state)
            .nest_service("/uploads", ServeDir::new(&config.upload_dir))
            .layer(Extension(auth));

        Self {
            router,
            db,
            services,
            _workdir: workdir,
        }
    }

    /// A valid bearer token for the allowed test phone.
    pub fn token(&self) -> String {
        self.services
            .auth
            .generate_token(TEST_PHONE)
            .expect("failed to sign test token")
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body was not JSON")
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None, None).await
    }

    /// Fetches a URI and returns the raw body, for non-JSON responses such
    /// as served upload files.
    pub async fn get_raw(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        (status, bytes.to_vec())
    }

    /// Sends a raw multipart request, used by the image upload tests.
    pub async fn post_multipart(
        &self,
        uri: &str,
        boundary: &str,
        body: Vec<u8>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .expect("failed to build multipart request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body was not JSON")
        };

        (status, json)
    }
}

/// Reads a money field that may serialize as either a JSON string or number.
pub fn money(value: &Value) -> f64 {
    match value {
        Value::String(s) => s.parse().expect("money string"),
        Value::Number(n) => n.as_f64().expect("money number"),
        other => panic!("expected a money value, got {}", other),
    }
}

/// Seeds a spare part and returns its id.
pub async fn seed_spare_part(app: &TestApp, name: &str, quantity: i32) -> i64 {
    let (status, body) = app
        .post(
            "/api/spare-parts",
            serde_json::json!({
                "name": name,
                "category": "General",
                "dealerPrice": "40.00",
                "customerPrice": "50.00",
                "quantity": quantity
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "seed spare part: {}", body);
    body["id"].as_i64().expect("spare part id")
}

/// Seeds a battery and returns its id.
pub async fn seed_battery(app: &TestApp, name: &str, quantity: i32) -> i64 {
    let (status, body) = app
        .post(
            "/api/batteries",
            serde_json::json!({
                "name": name,
                "modelNumber": "TT-150",
                "capacity": "150Ah",
                "dealerPrice": "160.00",
                "customerPrice": "200.00",
                "voltage": "12V",
                "warrantyPeriodInMonths": 36,
                "quantity": quantity
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "seed battery: {}", body);
    body["id"].as_i64().expect("battery id")
}
