//! Shared helpers for HTTP flow tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use serde_json::Value;
use staff_server::db::DbService;
use staff_server::email::Mailer;
use staff_server::error::BoxError;
use staff_server::{AppState, Config, api};
use tower::ServiceExt;

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub body: String,
}

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    /// Last whitespace-separated token of the latest mail to `to`
    pub fn last_code_for(&self, to: &str) -> String {
        let sent = self.sent();
        let mail = sent.iter().rev().find(|m| m.to == to).unwrap();
        mail.body
            .split_whitespace()
            .filter(|w| w.chars().all(|c| c.is_ascii_alphanumeric()) && w.len() >= 6)
            .last()
            .unwrap()
            .to_string()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, _subject: &str, body: &str) -> Result<(), BoxError> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub mailer: Arc<RecordingMailer>,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Config::default()).await
}

pub async fn spawn_app_with(config: Config) -> TestApp {
    let db = DbService::in_memory().await.unwrap();
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState::with_parts(config, db, mailer.clone());
    let router = api::router(state.clone());
    TestApp {
        state,
        router,
        mailer,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_json(&self, uri: &str, cookie: Option<&str>, body: Value) -> Response {
        self.send(json_request("POST", uri, cookie, Some(body))).await
    }

    pub async fn put_json(&self, uri: &str, cookie: Option<&str>, body: Value) -> Response {
        self.send(json_request("PUT", uri, cookie, Some(body))).await
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        self.send(json_request("GET", uri, cookie, None)).await
    }

    /// Sign up and verify an account through the API
    pub async fn verified_user(&self, name: &str, email: &str, password: &str) -> i64 {
        let resp = self
            .post_json(
                "/api/accounts/signup",
                None,
                serde_json::json!({ "name": name, "email": email, "password": password }),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let user = json_body(resp).await;

        let code = self.mailer.last_code_for(email);
        let resp = self
            .post_json(
                "/api/accounts/verify-email",
                None,
                serde_json::json!({ "email": email, "code": code }),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        user["id"].as_i64().unwrap()
    }

    /// Form login; returns the raw response
    pub async fn login(&self, email: &str, password: &str) -> Response {
        let form = format!(
            "username={}&password={}",
            email.replace('@', "%40"),
            password
        );
        let request = Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap();
        self.send(request).await
    }

    /// Log in and return the `SESSION=…` cookie pair
    pub async fn session_for(&self, email: &str, password: &str) -> String {
        let resp = self.login(email, password).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        session_cookie(&resp).unwrap()
    }
}

pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// `SESSION=<id>` from the response's Set-Cookie header
pub fn session_cookie(resp: &Response) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| v.split(';').next())
        .filter(|pair| pair.starts_with("SESSION=") && pair.len() > "SESSION=".len())
        .map(str::to_string)
}

pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap()
}
