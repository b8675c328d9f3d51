//! Test helpers: build the app under test against an in-process fake bucket.
//!
//! Run with: `cargo test --test export_api_test`. No external services are
//! involved; the S3 client is pointed at a local axum server that keeps
//! objects in a `HashMap` and speaks just enough of the S3 REST surface
//! (PutObject, GetObject, HeadBucket) for these tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use axum_test::TestServer;
use json_drop::{
    config::AppConfig, routes::routes::routes, services::storage_service::StorageService,
    state::AppState,
};

pub const TEST_API_KEY: &str = "test-api-key-123";
pub const TEST_BUCKET: &str = "exports-test";

/// Keys containing this marker make the fake bucket fail the upload.
pub const FAILING_KEY_MARKER: &str = "boom";

/// Objects stored by the fake bucket, keyed by object key.
pub type ObjectMap = Arc<Mutex<HashMap<String, Bytes>>>;

/// Test application: a `TestServer` for the API plus a handle on the fake
/// bucket's stored objects.
pub struct TestApp {
    pub server: TestServer,
    pub objects: ObjectMap,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// The stored `(key, bytes)` pair whose key contains `fragment`.
    pub fn stored_object(&self, fragment: &str) -> Option<(String, Vec<u8>)> {
        let guard = self.objects.lock().unwrap();
        guard
            .iter()
            .find(|(key, _)| key.contains(fragment))
            .map(|(key, bytes)| (key.clone(), bytes.to_vec()))
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

/// Set up the API with its storage client wired to a fresh fake bucket.
pub async fn setup_test_app() -> TestApp {
    let (endpoint, objects) = spawn_fake_bucket().await;

    let cfg = AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        api_key: TEST_API_KEY.into(),
        bucket: TEST_BUCKET.into(),
        region: "us-east-1".into(),
        endpoint_url: Some(endpoint),
        access_key_id: "test-access-key".into(),
        secret_access_key: "test-secret-key".into(),
    };

    let storage = StorageService::new(&cfg);
    let state = AppState {
        storage,
        api_key: cfg.api_key.clone(),
    };

    let server = TestServer::new(routes(state)).expect("failed to start test server");

    TestApp { server, objects }
}

/// Bind the fake bucket on an ephemeral port and serve it in the background.
async fn spawn_fake_bucket() -> (String, ObjectMap) {
    let objects: ObjectMap = Arc::new(Mutex::new(HashMap::new()));

    let app = Router::new()
        // HeadBucket: axum answers HEAD from the GET route. The SDK requests
        // the path-style bucket URL with a trailing slash, so match both.
        .route("/{bucket}", get(bucket_status))
        .route("/{bucket}/", get(bucket_status))
        .route("/{bucket}/{*key}", put(put_object).get(get_object))
        .with_state(objects.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind fake bucket listener");
    let addr = listener.local_addr().expect("fake bucket has no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake bucket exited");
    });

    (format!("http://{}", addr), objects)
}

async fn bucket_status() -> StatusCode {
    StatusCode::OK
}

async fn put_object(
    State(objects): State<ObjectMap>,
    Path((_bucket, key)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    if key.contains(FAILING_KEY_MARKER) {
        let xml = concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<Error><Code>InternalError</Code><Message>injected failure</Message></Error>"#,
        );
        return (StatusCode::INTERNAL_SERVER_ERROR, xml).into_response();
    }

    objects.lock().unwrap().insert(key, body);
    (
        StatusCode::OK,
        [(header::ETAG, "\"d41d8cd98f00b204e9800998ecf8427e\"")],
    )
        .into_response()
}

async fn get_object(
    State(objects): State<ObjectMap>,
    Path((_bucket, key)): Path<(String, String)>,
) -> Response {
    match objects.lock().unwrap().get(&key) {
        Some(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            bytes.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
