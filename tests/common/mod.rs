#![allow(dead_code)]
//! Shared test helpers: an in-process stub of the Stability endpoints plus
//! request plumbing for router-level tests.
//!
//! The stub is a real Axum server bound to an ephemeral port so the client
//! under test talks actual HTTP; its responses are scripted per test.
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get as axum_get, post as axum_post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use stability_api_proxy::api::routes::AppState;
use stability_api_proxy::{PollPolicy, StabilityClient};

/// One scripted answer from the stub result endpoint. The last entry of a
/// script repeats for any further polls.
#[derive(Clone)]
pub enum PollScript {
    /// 202, job still running.
    Pending,
    /// 200 with these video bytes.
    Ready(Vec<u8>),
    /// Any other status with a body.
    Error(u16, &'static str),
}

pub struct StubStability {
    poll_script: Vec<PollScript>,
    fail_generation_at: Option<usize>,
    generation_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    poll_calls: AtomicUsize,
}

impl StubStability {
    /// Every generation succeeds; every poll returns the video immediately.
    pub fn new() -> Arc<Self> {
        Self::with(None, vec![PollScript::Ready(b"mp4-bytes".to_vec())])
    }

    /// Generation request number `index` (0-based) answers 500.
    pub fn failing_generation_at(index: usize) -> Arc<Self> {
        Self::with(Some(index), vec![PollScript::Ready(b"mp4-bytes".to_vec())])
    }

    /// Result polls answer according to `script`.
    pub fn with_poll_script(script: Vec<PollScript>) -> Arc<Self> {
        Self::with(None, script)
    }

    fn with(fail_generation_at: Option<usize>, poll_script: Vec<PollScript>) -> Arc<Self> {
        Arc::new(StubStability {
            poll_script,
            fail_generation_at,
            generation_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
            poll_calls: AtomicUsize::new(0),
        })
    }

    pub fn generations(&self) -> usize {
        self.generation_calls.load(Ordering::SeqCst)
    }

    pub fn submits(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn polls(&self) -> usize {
        self.poll_calls.load(Ordering::SeqCst)
    }
}

async fn generate_image(State(stub): State<Arc<StubStability>>) -> Response {
    let n = stub.generation_calls.fetch_add(1, Ordering::SeqCst);
    if stub.fail_generation_at == Some(n) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    (StatusCode::OK, b"png-bytes".to_vec()).into_response()
}

async fn submit_video(State(stub): State<Arc<StubStability>>) -> Response {
    stub.submit_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "id": "job-0001" })).into_response()
}

async fn video_result(State(stub): State<Arc<StubStability>>) -> Response {
    let k = stub.poll_calls.fetch_add(1, Ordering::SeqCst);
    let idx = k.min(stub.poll_script.len() - 1);
    match &stub.poll_script[idx] {
        PollScript::Pending => StatusCode::ACCEPTED.into_response(),
        PollScript::Ready(bytes) => (StatusCode::OK, bytes.clone()).into_response(),
        PollScript::Error(code, body) => {
            (StatusCode::from_u16(*code).unwrap(), (*body).to_string()).into_response()
        }
    }
}

/// Serve the stub on an ephemeral port and return its base URL.
pub fn spawn_stub(stub: Arc<StubStability>) -> String {
    let app = Router::new()
        .route("/v2beta/stable-image/generate/core", axum_post(generate_image))
        .route("/v2beta/image-to-video", axum_post(submit_video))
        .route("/v2beta/image-to-video/result/:id", axum_get(video_result))
        .with_state(stub);

    let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
        .serve(app.into_make_service());
    let addr = server.local_addr();
    tokio::spawn(server);
    format!("http://{}", addr)
}

/// Poll schedule with no waiting, for tests.
pub fn fast_policy() -> PollPolicy {
    PollPolicy {
        initial_wait: Duration::ZERO,
        poll_interval: Duration::ZERO,
        max_attempts: 5,
    }
}

/// Application state wired to the stub and a temporary public root.
pub fn test_state(base_url: &str, public_root: &Path) -> Arc<AppState> {
    Arc::new(AppState {
        stability_client: StabilityClient::new(base_url.to_string(), "test-key".to_string()),
        public_root: public_root.to_path_buf(),
        poll_policy: fast_policy(),
    })
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
