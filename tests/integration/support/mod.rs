//! In-process stub backend shared by the integration tests.
//!
//! Binds an `axum` server to `127.0.0.1:0`, records every request it sees
//! and answers from a per-route script. Unscripted routes get a JSON 404.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Method, Response, StatusCode, Uri, header};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::task::JoinHandle;

use pipetrack::api::ApiClient;
use pipetrack::session::SessionStore;

/// One request as the backend received it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Recorded {
    /// The body parsed as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

/// A scripted response.
#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    content_type: Option<&'static str>,
    body: String,
    delay: Duration,
}

impl Reply {
    pub fn json(status: u16, value: &Value) -> Self {
        Self {
            status,
            content_type: Some("application/json; charset=utf-8"),
            body: value.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn text(status: u16, text: &str) -> Self {
        Self {
            status,
            content_type: Some("text/plain"),
            body: text.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: String::new(),
            delay: Duration::ZERO,
        }
    }

    /// Holds the response back for `delay`.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Default)]
struct StubState {
    requests: Mutex<Vec<Recorded>>,
    // Replies are consumed in order; the last one repeats.
    routes: Mutex<HashMap<String, Vec<Reply>>>,
}

fn route_key(method: &str, path: &str) -> String {
    format!("{} {path}", method.to_ascii_uppercase())
}

async fn handle(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response<Body> {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    state.requests.lock().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_owned),
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
        body,
    });

    let reply = {
        let mut routes = state.routes.lock();
        routes
            .get_mut(&route_key(method.as_str(), uri.path()))
            .map(|queue| {
                if queue.len() > 1 {
                    queue.remove(0)
                } else {
                    queue[0].clone()
                }
            })
    }
    .unwrap_or_else(|| Reply::json(404, &json!({ "error": "not found" })));

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    let mut response = Response::builder().status(StatusCode::from_u16(reply.status).unwrap());
    if let Some(ct) = reply.content_type {
        response = response.header(header::CONTENT_TYPE, ct);
    }
    response.body(Body::from(reply.body)).unwrap()
}

/// Running stub backend.
pub struct StubBackend {
    pub addr: SocketAddr,
    state: Arc<StubState>,
    _handle: JoinHandle<()>,
}

impl StubBackend {
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = axum::Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub backend");
        });

        Self {
            addr,
            state,
            _handle: handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Scripts the next reply for `method path`.
    pub fn on(&self, method: &str, path: &str, reply: Reply) -> &Self {
        self.state
            .routes
            .lock()
            .entry(route_key(method, path))
            .or_default()
            .push(reply);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method.eq_ignore_ascii_case(method) && r.path == path)
            .collect()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("at least one request")
    }

    pub fn client(&self, session: &SessionStore) -> ApiClient {
        ApiClient::new(&self.url(), session.clone()).unwrap()
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub const TS: &str = "2024-05-01T10:00:00Z";

pub fn user_json(id: u64, name: &str) -> Value {
    json!({ "id": id, "email": format!("{}@example.com", name.to_lowercase()), "name": name })
}

pub fn task_json(id: u64, title: &str, status: &str, creator_id: u64) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "status": status,
        "creator_id": creator_id,
        "archived": false,
        "created_at": TS,
        "updated_at": TS,
    })
}

pub fn comment_json(id: u64, task_id: u64, content: &str) -> Value {
    json!({
        "id": id,
        "task_id": task_id,
        "user_id": 1,
        "user_name": "A",
        "content": content,
        "created_at": TS,
        "updated_at": TS,
    })
}

pub fn log_json(id: u64, task_id: u64, action: &str) -> Value {
    json!({
        "id": id,
        "task_id": task_id,
        "user_id": 1,
        "action": action,
        "created_at": TS,
    })
}

pub fn candidate_json(id: u64, first: &str, last: &str) -> Value {
    json!({
        "id": id,
        "first_name": first,
        "last_name": last,
        "email": format!("{}@example.com", first.to_lowercase()),
        "created_at": TS,
        "updated_at": TS,
    })
}

/// A session already holding `token` for user 1 ("A").
pub fn logged_in(token: &str) -> SessionStore {
    let session = SessionStore::in_memory();
    let user = serde_json::from_value(user_json(1, "A")).unwrap();
    session.set_session(token, &user).unwrap();
    session
}
