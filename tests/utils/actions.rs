#![allow(dead_code)] // Test utilities may not all be used in every test

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use super::setup::TestApp;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestApp {
    /// Send a request through the router and decode the JSON body
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    /// POST an arbitrary body, bypassing JSON encoding
    pub async fn post_raw(&self, uri: &str, token: Option<&str>, body: &str) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    /// Start a game and return its session token
    pub async fn start_game(&self, mode: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/session",
                None,
                Some(json!({ "mode": mode })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "unexpected body: {body}");

        body["session_id"].as_str().unwrap().to_string()
    }

    pub async fn guess(&self, token: &str, guess: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/api/guess",
            Some(token),
            Some(json!({ "guess": guess })),
        )
        .await
    }

    pub async fn game_state(&self, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, "/api/game", Some(token), None).await
    }
}
