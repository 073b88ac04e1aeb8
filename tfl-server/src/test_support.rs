//! In-process fake of the TfL line endpoint, served by axum on an ephemeral port.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::tfl::TflConfig;

/// What the fake answers with.
#[derive(Debug, Clone)]
pub(crate) struct FakeReply {
    pub status: StatusCode,
    pub body: String,
    pub cache_control: Option<String>,
    pub delay: Duration,
}

impl FakeReply {
    /// A 200 response with the given body and no `Cache-Control`.
    pub fn body(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
            cache_control: None,
            delay: Duration::ZERO,
        }
    }

    pub fn with_cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = Some(value.into());
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request the fake received.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub modes: String,
    pub app_id: Option<String>,
    pub app_key: Option<String>,
}

#[derive(Clone)]
struct FakeState {
    reply: Arc<Mutex<FakeReply>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    hits: Arc<AtomicUsize>,
}

/// Running fake upstream. The server lives until the test runtime shuts down.
pub(crate) struct FakeUpstream {
    pub base_url: String,
    state: FakeState,
}

impl FakeUpstream {
    pub async fn start(reply: FakeReply) -> Self {
        let state = FakeState {
            reply: Arc::new(Mutex::new(reply)),
            requests: Arc::new(Mutex::new(Vec::new())),
            hits: Arc::new(AtomicUsize::new(0)),
        };

        let router = Router::new()
            .route("/Line/Mode/:modes", get(line_mode))
            .with_state(state.clone());
        let addr = serve(router).await;

        Self {
            base_url: format!("http://{addr}/"),
            state,
        }
    }

    /// Client config pointing at this fake.
    pub fn config(&self) -> TflConfig {
        TflConfig::new("test-id", "test-key")
            .with_base_url(&self.base_url)
            .with_modes(["tube", "dlr"])
    }

    pub fn set_reply(&self, reply: FakeReply) {
        *self.state.reply.lock().unwrap() = reply;
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn line_mode(
    State(state): State<FakeState>,
    Path(modes): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let request = RecordedRequest {
        modes,
        app_id: query.get("app_id").cloned(),
        app_key: query.get("app_key").cloned(),
    };
    state.requests.lock().unwrap().push(request);

    let reply = state.reply.lock().unwrap().clone();
    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    let mut response = (reply.status, reply.body).into_response();
    if let Some(value) = reply.cache_control {
        let value = HeaderValue::from_str(&value).unwrap();
        response.headers_mut().insert(header::CACHE_CONTROL, value);
    }
    response
}

/// Serve `router` on 127.0.0.1 with an OS-assigned port.
pub(crate) async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}
