//! In-process mock of the portal API for client tests.
//!
//! Serves every path through one fallback handler, records each request, and
//! answers with either a fixed response, a route table, or an echoing record
//! store.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::client::ApiClient;
use crate::session::Session;

/// A request as the mock server saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path including the `/api` prefix
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Value of a header (lowercase name)
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    /// Path with the `/api` prefix removed
    pub fn endpoint(&self) -> &str {
        self.path.strip_prefix("/api").unwrap_or(&self.path)
    }
}

/// Canned response
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

pub type Handler = Arc<dyn Fn(&RecordedRequest) -> MockResponse + Send + Sync>;

struct MockState {
    handler: Handler,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Running mock server; shuts down with the test runtime
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    /// Serve every request with `handler`
    pub async fn start(handler: Handler) -> Self {
        let state = Arc::new(MockState {
            handler,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .fallback(dispatch)
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    /// Answer every request with the same response
    pub async fn fixed(response: MockResponse) -> Self {
        Self::start(Arc::new(move |_| response.clone())).await
    }

    /// Answer `(METHOD, endpoint)` pairs from a table, 404 for anything else
    pub async fn routes(routes: Vec<(&str, &str, MockResponse)>) -> Self {
        let table: Vec<(String, String, MockResponse)> = routes
            .into_iter()
            .map(|(m, p, r)| (m.to_string(), p.to_string(), r))
            .collect();

        Self::start(Arc::new(move |req| {
            table
                .iter()
                .find(|(m, p, _)| *m == req.method && p == req.endpoint())
                .map(|(_, _, r)| r.clone())
                .unwrap_or_else(|| MockResponse::json(404, json!({ "error": "no route" })))
        }))
        .await
    }

    /// Backend that stores what it is sent and echoes it back
    pub async fn echo() -> Self {
        Self::start(echo_handler(Map::new())).await
    }

    /// Echo backend that also stamps `assigned` fields onto every created
    /// record, the way the server assigns `role` on registration
    pub async fn echo_assigning(assigned: Value) -> Self {
        let assigned = match assigned {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::start(echo_handler(assigned)).await
    }

    /// Base URL to hand to the client
    pub fn url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.lock().unwrap().last().cloned()
    }
}

async fn dispatch(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let recorded = RecordedRequest {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers: headers
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("").to_string()))
            .collect(),
        body: if body.is_empty() {
            None
        } else {
            serde_json::from_slice(&body).ok()
        },
    };

    let response = (state.handler)(&recorded);
    state.requests.lock().unwrap().push(recorded);

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [("content-type", "application/json")], response.body).into_response()
}

/// Generic record store. A request addresses the record whose id is the
/// right-most path segment naming a stored record.
///
/// - POST stores the body plus `assigned` under a fresh id (also written as
///   `user_id` and `id`)
/// - GET of a record returns `{ data: record }`; any other GET lists everything
/// - PUT/PATCH of a record merges the body into it
/// - DELETE of a record removes it
pub fn echo_handler(assigned: Map<String, Value>) -> Handler {
    let store: Arc<Mutex<BTreeMap<String, Value>>> = Arc::new(Mutex::new(BTreeMap::new()));
    let counter = Arc::new(AtomicU64::new(0));

    Arc::new(move |req| {
        let mut store = store.lock().unwrap();
        let known = req
            .endpoint()
            .rsplit('/')
            .find(|s| store.contains_key(*s))
            .map(str::to_string);

        match (req.method.as_str(), known) {
            ("POST", _) => {
                let id = format!("id-{}", counter.fetch_add(1, Ordering::SeqCst) + 1);
                let mut record = match &req.body {
                    Some(Value::Object(map)) => map.clone(),
                    _ => Map::new(),
                };
                for (k, v) in &assigned {
                    record.entry(k.clone()).or_insert_with(|| v.clone());
                }
                record.insert("user_id".into(), json!(id));
                record.insert("id".into(), json!(id));
                let record = Value::Object(record);
                store.insert(id, record.clone());
                MockResponse::json(201, json!({ "message": "Created", "data": record }))
            }
            ("GET", Some(id)) => MockResponse::json(200, json!({ "data": store[&id] })),
            ("GET", None) => {
                let all: Vec<Value> = store.values().cloned().collect();
                MockResponse::json(200, json!({ "data": all }))
            }
            ("PUT" | "PATCH", Some(id)) => {
                let record = store.entry(id).or_insert_with(|| json!({}));
                if let (Value::Object(fields), Some(Value::Object(update))) = (&mut *record, &req.body) {
                    for (k, v) in update {
                        fields.insert(k.clone(), v.clone());
                    }
                }
                let record = record.clone();
                MockResponse::json(200, json!({ "message": "Updated", "data": record }))
            }
            ("DELETE", Some(id)) => {
                store.remove(&id);
                MockResponse::json(200, json!({ "message": "Deleted" }))
            }
            ("PUT" | "PATCH" | "DELETE", None) => {
                MockResponse::json(404, json!({ "error": "not found" }))
            }
            _ => MockResponse::json(405, json!({ "error": "method not allowed" })),
        }
    })
}

/// Client pointed at `backend`, bypassing any system proxy
pub fn test_client(backend: &MockBackend, session: Session) -> ApiClient {
    let http = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("build test http client");
    ApiClient::with_http_client(backend.url(), session, http)
}
