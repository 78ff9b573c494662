//! In-process HTTP client over the full router (middleware included).

use std::sync::Arc;

use api_adapters::{router, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use storage_adapters::MemoryStore;
use tower::ServiceExt;

use crate::{cheap_hasher, STRONG_PASSWORD};

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// `Value::Null` when the body is empty.
    pub body: Value,
}

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: Router,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), store.clone(), cheap_hasher());
        Self {
            store,
            router: router(state),
        }
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("valid request"))
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Registers an account and returns its id.
    pub async fn register(&self, name: &str, email: &str) -> String {
        let res = self
            .send(
                "POST",
                "/accounts",
                Some(json!({ "name": name, "email": email, "password": STRONG_PASSWORD })),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        res.body["id"].as_str().expect("id").to_string()
    }

    /// Creates a post as `user_id` and returns its id.
    pub async fn create_post(&self, user_id: &str) -> String {
        let res = self
            .send(
                "POST",
                "/posts",
                Some(json!({ "userId": user_id, "title": "Hello world", "content": "First post" })),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        res.body["id"].as_str().expect("id").to_string()
    }
}
