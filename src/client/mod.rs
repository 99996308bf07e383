//! Portal REST Client
//!
//! HTTP client for the portal API. Composes URLs from one base URL, attaches
//! the session's bearer token, and maps failed statuses onto [`ApiError`].
//!
//! Every call is a single attempt: no retry, no timeout, no caching. Callers
//! own any recovery policy.
//!
//! ```rust,no_run
//! use nsportal::{ApiClient, Session, FileTokenStore};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::load(FileTokenStore::new(FileTokenStore::default_path()));
//! let client = ApiClient::new(nsportal::DEFAULT_BASE_URL, session);
//!
//! client.auth().login("admin@example.com", "secret").await?;
//! let operators = client.operators().get_all().await?;
//! println!("{} operators", operators.len());
//! # Ok(())
//! # }
//! ```

mod envelope;

pub use envelope::{ApiResponse, Payload};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;

use crate::error::{ApiError, ApiResult, GENERIC_FAILURE_MESSAGE};
use crate::session::{Session, SessionError};

/// Production API base URL
pub const DEFAULT_BASE_URL: &str = "https://nsbackend-silk.vercel.app/api";

/// Method, body, headers and query for one request
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    /// Applied after the defaults, so they win on conflict
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: HeaderMap::new(),
            query: Vec::new(),
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Builder method: JSON-encode `body`
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Builder method: set a header, replacing any default of the same name
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Builder method: append a query pair
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Typed client for the portal REST API
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Create a client for `base_url` using `session` for authentication
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self::with_http_client(base_url, session, Client::new())
    }

    /// Create a client around a preconfigured `reqwest::Client`
    pub fn with_http_client(base_url: impl Into<String>, session: Session, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Persist `token` and attach it to subsequent requests
    pub fn set_token(&self, token: &str) -> Result<(), SessionError> {
        self.session.set_token(token)
    }

    /// Forget the token in memory and in the store
    pub fn clear_token(&self) -> Result<(), SessionError> {
        self.session.clear_token()
    }

    /// Advisory check of the held token's `exp` claim
    pub fn is_token_valid(&self) -> bool {
        self.session.is_token_valid()
    }

    /// Full URL for an endpoint path
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Perform one request and return the parsed JSON body.
    ///
    /// Failed statuses map to 401 `AuthenticationFailed` (token cleared),
    /// 403 `AccessDenied`, 404 `NotFound`, 5xx `Server`, anything else
    /// `Api` with the server's message.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> ApiResult<Value> {
        let url = self.url(endpoint);
        let request_id = uuid::Uuid::new_v4();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.session.token() {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!(request_id = %request_id, "Stored token is not a valid header value"),
            }
        }
        for name in options.headers.keys() {
            headers.remove(name);
        }
        for (name, value) in options.headers.iter() {
            headers.append(name.clone(), value.clone());
        }

        tracing::debug!(
            request_id = %request_id,
            method = %options.method,
            url = %url,
            "API request"
        );

        let mut builder = self.http.request(options.method.clone(), &url).headers(headers);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(body) = &options.body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(request_id = %request_id, url = %url, "API request error: {}", e);
            ApiError::Network(e)
        })?;

        let status = response.status();

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("");
            let text = response.text().await.unwrap_or_default();
            let message = error_message(status.as_u16(), reason, &text);

            if status.as_u16() == 401 {
                if let Err(e) = self.session.clear_token() {
                    tracing::warn!(request_id = %request_id, "Failed to clear token after 401: {}", e);
                }
            }

            let error = ApiError::from_status(status.as_u16(), message);
            tracing::warn!(
                request_id = %request_id,
                status = status.as_u16(),
                error_kind = %error.kind(),
                error_message = ?error.server_message(),
                "API request failed"
            );
            return Err(error);
        }

        let bytes = response.bytes().await.map_err(ApiError::Network)?;
        tracing::debug!(request_id = %request_id, status = status.as_u16(), bytes = bytes.len(), "API response");

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET `endpoint` and decode its payload, unwrapping a `data` envelope
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.fetch_with(endpoint, RequestOptions::get()).await
    }

    /// Like [`fetch`](Self::fetch) with explicit options
    pub async fn fetch_with<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let value = self.request(endpoint, options).await?;
        Payload::decode(value).map(Payload::into_inner)
    }

    /// Send `body` as JSON and decode the acknowledgement
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<ApiResponse> {
        let options = RequestOptions::new(method).json(body)?;
        let value = self.request(endpoint, options).await?;
        ApiResponse::from_value(value)
    }

    /// Send a bodiless request and decode the acknowledgement
    pub async fn send_empty(&self, method: Method, endpoint: &str) -> ApiResult<ApiResponse> {
        let value = self.request(endpoint, RequestOptions::new(method)).await?;
        ApiResponse::from_value(value)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish()
    }
}

/// Percent-encode an identifier for use as one path segment
pub(crate) fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

/// Message for a failed response: the body's `error`, else its `message`,
/// else a generic text. A body that is not JSON yields `HTTP <code>: <reason>`.
fn error_message(status: u16, reason: &str, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => {
            let pick = |key: &str| {
                value
                    .get(key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            };
            pick("error")
                .or_else(|| pick("message"))
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
        }
        Err(_) => format!("HTTP {}: {}", status, reason),
    }
}
