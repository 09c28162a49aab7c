#![allow(dead_code)]

pub mod memory;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use bookshelf::api::{self, AppState};

use self::memory::{
    MemoryBookRepository, MemoryRelationRepository, MemoryStore, MemoryUserRepository,
};

/// The full HTTP router wired against in-memory repositories, plus a handle
/// on the backing store for seeding and direct assertions.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let state = AppState::new(
        Arc::new(MemoryBookRepository(Arc::clone(&store))),
        Arc::new(MemoryRelationRepository(Arc::clone(&store))),
        Arc::new(MemoryUserRepository(Arc::clone(&store))),
    );
    TestApp {
        router: api::router(state),
        store,
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn send_json(
        &self,
        method: Method,
        uri: &str,
        user_id: Option<i32>,
        body: Value,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(id) = user_id {
            builder = builder.header("x-user-id", id.to_string());
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.send(request).await
    }

    pub async fn delete(&self, uri: &str, user_id: Option<i32>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::DELETE).uri(uri);
        if let Some(id) = user_id {
            builder = builder.header("x-user-id", id.to_string());
        }
        let request = builder.body(Body::empty()).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body read failed")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("non-JSON response body")
        };
        (status, json)
    }
}
