//! In-process stand-in for the Apps Script gateway.
//!
//! Binds an axum server to `127.0.0.1:0`, answers every request through a
//! caller-supplied responder and records the actions it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{Query, State},
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use reqwest::Url;
use serde_json::Value;
use tower::ServiceExt;

use forklift_checklist::config::environment::EnvironmentConfig;
use forklift_checklist::create_app;
use forklift_checklist::state::AppState;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub action: String,
    pub params: HashMap<String, String>,
    pub body: Option<Value>,
}

/// What the fake gateway answers with.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl MockReply {
    pub fn json(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn raw(status: StatusCode, content_type: &'static str, body: &str) -> Self {
        Self {
            status,
            content_type,
            body: body.to_string(),
        }
    }
}

type Responder = Arc<dyn Fn(&RecordedCall) -> MockReply + Send + Sync>;

#[derive(Clone)]
struct MockState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responder: Responder,
}

pub struct MockGateway {
    pub url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockGateway {
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&RecordedCall) -> MockReply + Send + Sync + 'static,
    {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            calls: calls.clone(),
            responder: Arc::new(responder),
        };

        let router = Router::new()
            .route("/exec", any(handle))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            url: format!("http://{addr}/exec"),
            calls,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn actions(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.action).collect()
    }

    pub fn app(&self) -> Router {
        app_for(Some(&self.url))
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    Query(mut params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let action = params.remove("action").unwrap_or_default();
    let body = serde_json::from_slice(&body).ok();
    let call = RecordedCall {
        method,
        action,
        params,
        body,
    };

    let reply = (state.responder)(&call);
    state.calls.lock().unwrap().push(call);

    (
        reply.status,
        [(header::CONTENT_TYPE, reply.content_type)],
        reply.body,
    )
        .into_response()
}

/// Application wired to `gas_url`, or with no gateway configured.
pub fn app_for(gas_url: Option<&str>) -> Router {
    let config = EnvironmentConfig {
        gas_url: gas_url.map(|u| Url::parse(u).unwrap()),
        gateway_timeout: Duration::from_secs(5),
        ..EnvironmentConfig::default()
    };
    create_app(AppState::new(config).unwrap())
}

/// A URL on a port nothing listens on.
pub async fn unreachable_gateway_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/exec")
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    let (status, text) = send(app, request).await;
    (status, serde_json::from_str(&text).unwrap())
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, text) = send(app, request).await;
    (status, serde_json::from_str(&text).unwrap())
}

pub async fn get_html(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_form(app: Router, uri: &str, pairs: &[(&str, &str)]) -> (StatusCode, String) {
    let body = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}
