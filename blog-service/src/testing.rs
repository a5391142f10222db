//! Router-level test harness backed by in-memory doubles

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::UploadConfig;
use crate::db::memory::MemoryStore;
use crate::storage::memory::MemoryBucket;
use crate::{create_router, AppState};

const BOUNDARY: &str = "blog-service-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub db: Arc<MemoryStore>,
    pub bucket: Arc<MemoryBucket>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with(MemoryStore::new(), MemoryBucket::new())
    }

    pub fn with(db: MemoryStore, bucket: MemoryBucket) -> Self {
        Self::with_upload(db, bucket, UploadConfig { max_file_size_mb: 1 })
    }

    pub fn with_upload(db: MemoryStore, bucket: MemoryBucket, upload: UploadConfig) -> Self {
        let db = Arc::new(db);
        let bucket = Arc::new(bucket);
        let state = AppState {
            db: db.clone(),
            storage: bucket.clone(),
            upload,
        };

        Self {
            router: create_router(state),
            db,
            bucket,
        }
    }
}

/// Run one request through the router and decode the JSON body
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

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a `multipart/form-data` POST with text fields and an optional
/// `cover` file given as (filename, content type, bytes)
pub fn multipart_request(
    uri: &str,
    fields: &[(&str, &str)],
    cover: Option<(&str, &str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((filename, content_type, data)) = cover {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"cover\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}
