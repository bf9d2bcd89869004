//! Integration tests for the Vinayak Sweets API.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vinayak-integration-tests
//! ```
//!
//! # How These Tests Work
//!
//! Each test assembles the full router the same way `main` does, but over
//! in-memory repositories and an in-memory session store. Requests go
//! through `tower::ServiceExt::oneshot`, so the session layer, extractors,
//! and handlers all run without a database or a listening socket. Every
//! test builds its own [`TestApp`]; nothing is shared between tests.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::net::Ipv4Addr;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Method, Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use vinayak_server::middleware::create_memory_session_layer;
use vinayak_server::{AppState, ServerConfig, app};

/// Cookie name the session layer sets.
pub const SESSION_COOKIE: &str = "vinayak_session";

/// A configuration that never touches the network or a real database.
fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: SecretString::from("postgres://localhost/unused"),
        host: Ipv4Addr::LOCALHOST.into(),
        port: 0,
        base_url: "http://localhost:5000".to_owned(),
        session_secret: SecretString::from("kY8rT3mQ9xW2nL6pB4vJ7cF1hD5gS0aZ"),
        sentry_dsn: None,
    }
}

/// The API assembled like production, minus `PostgreSQL` and Sentry.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Build a fresh app over empty in-memory state.
    #[must_use]
    pub fn new() -> Self {
        let config = test_config();
        let session_layer = create_memory_session_layer(&config);
        let state = AppState::in_memory(config);

        Self {
            router: app(state, session_layer),
        }
    }

    /// Send a GET request.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(request(Method::GET, path, None, None)).await
    }

    /// Send a GET request with a session cookie.
    pub async fn get_with_cookie(&self, path: &str, cookie: &str) -> TestResponse {
        self.send(request(Method::GET, path, None, Some(cookie)))
            .await
    }

    /// Send a POST request with a JSON body.
    pub async fn post_json(&self, path: &str, body: &Value) -> TestResponse {
        self.send(request(Method::POST, path, Some(body), None))
            .await
    }

    /// Send a POST request with a JSON body and a session cookie.
    pub async fn post_json_with_cookie(
        &self,
        path: &str,
        body: &Value,
        cookie: &str,
    ) -> TestResponse {
        self.send(request(Method::POST, path, Some(body), Some(cookie)))
            .await
    }

    /// Send a PUT request with a JSON body.
    pub async fn put_json(&self, path: &str, body: &Value) -> TestResponse {
        self.send(request(Method::PUT, path, Some(body), None)).await
    }

    /// Send a PUT request with a JSON body and a session cookie.
    pub async fn put_json_with_cookie(
        &self,
        path: &str,
        body: &Value,
        cookie: &str,
    ) -> TestResponse {
        self.send(request(Method::PUT, path, Some(body), Some(cookie)))
            .await
    }

    /// Sign up and log in a shop owner, returning the session cookie pair.
    pub async fn owner_session(&self) -> String {
        let signup = self
            .post_json(
                "/api/owner/signup",
                &serde_json::json!({
                    "name": "Vinayak Joshi",
                    "businessName": "Vinayak Sweets",
                    "email": "owner@vinayaksweets.in",
                    "phone": "9822012345",
                    "password": "laddoo-counter-7",
                }),
            )
            .await;
        assert_eq!(
            signup.status,
            StatusCode::CREATED,
            "owner signup failed: {}",
            signup.text()
        );

        let login = self
            .post_json(
                "/api/owner/login",
                &serde_json::json!({
                    "email": "owner@vinayaksweets.in",
                    "password": "laddoo-counter-7",
                }),
            )
            .await;
        assert_eq!(
            login.status,
            StatusCode::OK,
            "owner login failed: {}",
            login.text()
        );

        login
            .session_cookie()
            .expect("owner login did not set a session cookie")
            .to_owned()
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router call failed");

        let status = response.status();
        let set_cookie = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| value.starts_with(SESSION_COOKIE))
            .map(str::to_owned);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");

        TestResponse {
            status,
            body,
            set_cookie,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// A response captured from the router, with the body fully read.
pub struct TestResponse {
    /// HTTP status of the response.
    pub status: StatusCode,
    body: Bytes,
    set_cookie: Option<String>,
}

impl TestResponse {
    /// Body parsed as JSON. Panics if the body is not valid JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body was not JSON")
    }

    /// Body as text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The session cookie pair from `Set-Cookie`, if the response set one.
    #[must_use]
    pub fn session_cookie(&self) -> Option<&str> {
        self.set_cookie
            .as_deref()
            .and_then(|raw| raw.split(';').next())
    }

    /// The raw `Set-Cookie` header for the session cookie, if present.
    #[must_use]
    pub fn set_cookie_raw(&self) -> Option<&str> {
        self.set_cookie.as_deref()
    }
}

fn request(
    method: Method,
    path: &str,
    body: Option<&Value>,
    cookie: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let body = body.map_or_else(Body::empty, |value| Body::from(value.to_string()));
    builder.body(body).expect("failed to build request")
}
