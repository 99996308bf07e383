//! Login, admin self-registration, and logout

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::client::{ApiClient, ApiResponse, Payload, RequestOptions};
use crate::error::{ApiError, ApiResult, ErrorKind};
use crate::models::{AdminProfile, NewAccount, Role};

/// Successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Login failures, worded for the person at the login form
#[derive(Error, Debug)]
pub enum LoginError {
    #[error("No account found with this email address")]
    NoAccount,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Server is temporarily unavailable. Please try again later.")]
    ServerUnavailable,

    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for LoginError {
    fn from(error: ApiError) -> Self {
        match error.kind() {
            ErrorKind::UserNotFound => LoginError::NoAccount,
            ErrorKind::AuthenticationFailed => LoginError::InvalidCredentials,
            ErrorKind::ServerError => LoginError::ServerUnavailable,
            ErrorKind::AccessDenied | ErrorKind::Generic => LoginError::Api(error),
        }
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct AdminRegistration<'a> {
    #[serde(flatten)]
    account: &'a NewAccount<AdminProfile>,
    role: Role,
}

pub struct Auth<'a> {
    client: &'a ApiClient,
}

impl<'a> Auth<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Log in and persist the returned token on the client's session
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, LoginError> {
        let options = RequestOptions::post().json(&Credentials { email, password })?;
        let value = self.client.request("/auth/login", options).await?;
        let login = decode_login(value)?;

        self.client.set_token(&login.token).map_err(ApiError::from)?;
        tracing::info!(user_id = ?login.user_id, role = ?login.role, "Logged in");

        Ok(login)
    }

    /// Register an administrator account; `role` is always sent as admin
    pub async fn register_admin(&self, account: &NewAccount<AdminProfile>) -> ApiResult<ApiResponse> {
        let body = AdminRegistration {
            account,
            role: Role::Admin,
        };
        self.client.send_json(Method::POST, "/auth/register", &body).await
    }

    /// Forget the session token. No request is made.
    pub fn logout(&self) -> ApiResult<()> {
        self.client.clear_token()?;
        Ok(())
    }
}

/// Login fields sit at the top level of the body; a `data` envelope is only
/// consulted when the top level carries no token.
fn decode_login(value: Value) -> ApiResult<LoginResponse> {
    if value.get("token").is_some_and(Value::is_string) {
        return serde_json::from_value(value)
            .map_err(|e| ApiError::UnexpectedShape(format!("login response: {}", e)));
    }
    Payload::decode(value).map(Payload::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Contact;
    use crate::session::{MemoryTokenStore, Session, TokenStore};
    use crate::testing::{test_client, MockBackend, MockResponse};
    use serde_json::json;

    #[tokio::test]
    async fn test_login_persists_token() {
        let backend = MockBackend::routes(vec![(
            "POST",
            "/auth/login",
            MockResponse::json(
                200,
                json!({ "message": "ok", "token": "jwt-abc", "user_id": "u1", "role": "admin" }),
            ),
        )])
        .await;
        let store = MemoryTokenStore::new();
        let client = test_client(&backend, Session::load(store.clone()));

        let login = client.auth().login("a@b.c", "pw").await.unwrap();
        assert_eq!(login.token, "jwt-abc");
        assert_eq!(login.role, Some(Role::Admin));
        assert_eq!(store.load().unwrap().as_deref(), Some("jwt-abc"));

        let request = backend.last_request().unwrap();
        assert_eq!(request.body, Some(json!({ "email": "a@b.c", "password": "pw" })));
    }

    #[tokio::test]
    async fn test_login_top_level_token_beside_data() {
        let backend = MockBackend::fixed(MockResponse::json(
            200,
            json!({
                "message": "Login successful",
                "token": "jwt-top",
                "user_id": "u1",
                "role": "admin",
                "data": { "email": "a@b.c" }
            }),
        ))
        .await;
        let client = test_client(&backend, Session::in_memory());

        let login = client.auth().login("a@b.c", "pw").await.unwrap();
        assert_eq!(login.token, "jwt-top");
        assert_eq!(login.user_id.as_deref(), Some("u1"));
        assert_eq!(client.session().token().as_deref(), Some("jwt-top"));
    }

    #[tokio::test]
    async fn test_login_enveloped_response() {
        let backend = MockBackend::fixed(MockResponse::json(
            200,
            json!({ "data": { "token": "t2", "user_id": "u2", "role": "vendor" } }),
        ))
        .await;
        let client = test_client(&backend, Session::in_memory());

        let login = client.auth().login("v@b.c", "pw").await.unwrap();
        assert_eq!(login.user_id.as_deref(), Some("u2"));
        assert_eq!(client.session().token().as_deref(), Some("t2"));
    }

    #[tokio::test]
    async fn test_login_failure_messages() {
        let cases = [
            (404, "No account found with this email address"),
            (401, "Invalid email or password"),
            (500, "Server is temporarily unavailable. Please try again later."),
        ];

        for (status, message) in cases {
            let backend =
                MockBackend::fixed(MockResponse::json(status, json!({ "error": "x" }))).await;
            let client = test_client(&backend, Session::in_memory());

            let err = client.auth().login("a@b.c", "pw").await.unwrap_err();
            assert_eq!(err.to_string(), message, "status {}", status);
        }
    }

    #[tokio::test]
    async fn test_login_other_failures_pass_through() {
        let backend =
            MockBackend::fixed(MockResponse::json(400, json!({ "error": "Email is required" }))).await;
        let client = test_client(&backend, Session::in_memory());

        let err = client.auth().login("", "pw").await.unwrap_err();
        assert!(matches!(err, LoginError::Api(_)));
        assert_eq!(err.to_string(), "Email is required");
    }

    #[tokio::test]
    async fn test_login_without_token_is_rejected() {
        let backend = MockBackend::fixed(MockResponse::json(200, json!({ "message": "ok" }))).await;
        let client = test_client(&backend, Session::in_memory());

        let err = client.auth().login("a@b.c", "pw").await.unwrap_err();
        assert!(matches!(err, LoginError::Api(ApiError::UnexpectedShape(_))));
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_register_admin_forces_role() {
        let backend = MockBackend::echo().await;
        let client = test_client(&backend, Session::in_memory());

        let account = NewAccount::new(
            "root@isp.example",
            "pw",
            AdminProfile {
                contact: Contact::new("Root", "100"),
                ..Default::default()
            },
        );
        client.auth().register_admin(&account).await.unwrap();

        let body = backend.last_request().unwrap().body.unwrap();
        assert_eq!(body["role"], "admin");
        assert_eq!(body["email"], "root@isp.example");
        assert_eq!(body["profileDetail"]["name"], "Root");
    }

    #[tokio::test]
    async fn test_logout_clears_store() {
        let store = MemoryTokenStore::with_token("t");
        let client = ApiClient::new("http://localhost/api", Session::load(store.clone()));

        client.auth().logout().unwrap();
        assert_eq!(client.session().token(), None);
        assert_eq!(store.load().unwrap(), None);
    }
}
