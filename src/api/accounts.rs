//! Account management for every role.
//!
//! The six account families share one set of operations and differ only in
//! their paths, so each role is described by a static [`AccountRoutes`] table
//! and served by the same [`Accounts`] accessor.
//!
//! | Role       | get                            | profile                     | update / delete                |
//! |------------|--------------------------------|-----------------------------|--------------------------------|
//! | admin      | `/admin/profile/{id}`          | `/admin/profile/{id}`       | `/admin/profile/{id}`          |
//! | operator   | `/admin/operator/{id}`         | `/operator/profile/{id}`    | `/admin/operator/profile/{id}` |
//! | technician | `/admin/technician/{id}`       | `/technician/profile/{id}`  | `/admin/technician/{id}`       |
//! | staff      | `/admin/staff/profile/{id}`    | `/staff/profile/{id}`       | `/admin/staff/profile/{id}`    |
//! | vendor     | `/admin/vendor/{id}`           | `/vendor/profile/{id}`      | `/admin/vendor/{id}`           |
//! | customer   | `/admin/customer/profile/{id}` | `/customer/profile/{id}`    | `/admin/customer/{id}`         |

use reqwest::Method;
use serde::Serialize;
use std::marker::PhantomData;

use crate::client::{segment, ApiClient, ApiResponse};
use crate::error::ApiResult;
use crate::models::{AccountUpdate, NewAccount, Role, User};

/// Paths for one account family. Path prefixes end in `/`; the account id
/// is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountRoutes {
    pub role: Role,
    pub list: &'static str,
    pub register: &'static str,
    pub get: &'static str,
    pub profile: &'static str,
    pub modify: &'static str,
}

pub const ADMINS: AccountRoutes = AccountRoutes {
    role: Role::Admin,
    list: "/admin/all",
    register: "/admin/register",
    get: "/admin/profile/",
    profile: "/admin/profile/",
    modify: "/admin/profile/",
};

pub const OPERATORS: AccountRoutes = AccountRoutes {
    role: Role::Operator,
    list: "/admin/operator/all",
    register: "/admin/operator/register",
    get: "/admin/operator/",
    profile: "/operator/profile/",
    modify: "/admin/operator/profile/",
};

pub const TECHNICIANS: AccountRoutes = AccountRoutes {
    role: Role::Technician,
    list: "/admin/technician/all",
    register: "/admin/technician/register",
    get: "/admin/technician/",
    profile: "/technician/profile/",
    modify: "/admin/technician/",
};

pub const STAFF: AccountRoutes = AccountRoutes {
    role: Role::Staff,
    list: "/admin/staff/all",
    register: "/admin/staff/register",
    get: "/admin/staff/profile/",
    profile: "/staff/profile/",
    modify: "/admin/staff/profile/",
};

pub const VENDORS: AccountRoutes = AccountRoutes {
    role: Role::Vendor,
    list: "/admin/vendor/all",
    register: "/admin/vendor/register",
    get: "/admin/vendor/",
    profile: "/vendor/profile/",
    modify: "/admin/vendor/",
};

pub const CUSTOMERS: AccountRoutes = AccountRoutes {
    role: Role::Customer,
    list: "/admin/customer/all",
    register: "/admin/customer/register",
    get: "/admin/customer/profile/",
    profile: "/customer/profile/",
    modify: "/admin/customer/",
};

impl AccountRoutes {
    /// Routes for `role`
    pub fn for_role(role: Role) -> &'static AccountRoutes {
        match role {
            Role::Admin => &ADMINS,
            Role::Operator => &OPERATORS,
            Role::Technician => &TECHNICIANS,
            Role::Staff => &STAFF,
            Role::Vendor => &VENDORS,
            Role::Customer => &CUSTOMERS,
        }
    }
}

/// Accounts of one role; `P` is the profile shape sent on registration
pub struct Accounts<'a, P> {
    client: &'a ApiClient,
    routes: &'static AccountRoutes,
    _profile: PhantomData<fn() -> P>,
}

impl<'a, P> Accounts<'a, P> {
    pub(crate) fn new(client: &'a ApiClient, routes: &'static AccountRoutes) -> Self {
        Self {
            client,
            routes,
            _profile: PhantomData,
        }
    }

    pub fn role(&self) -> Role {
        self.routes.role
    }

    pub fn routes(&self) -> &'static AccountRoutes {
        self.routes
    }

    /// Every account of this role
    pub async fn get_all(&self) -> ApiResult<Vec<User>> {
        self.client.fetch(self.routes.list).await
    }

    /// One account, through the admin view
    pub async fn get(&self, id: &str) -> ApiResult<User> {
        self.client
            .fetch(&format!("{}{}", self.routes.get, segment(id)))
            .await
    }

    /// One account, through the role's own profile endpoint
    pub async fn profile(&self, id: &str) -> ApiResult<User> {
        self.client
            .fetch(&format!("{}{}", self.routes.profile, segment(id)))
            .await
    }

    pub async fn update(&self, id: &str, update: &AccountUpdate) -> ApiResult<ApiResponse> {
        let endpoint = format!("{}{}", self.routes.modify, segment(id));
        self.client.send_json(Method::PUT, &endpoint, update).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<ApiResponse> {
        let endpoint = format!("{}{}", self.routes.modify, segment(id));
        self.client.send_empty(Method::DELETE, &endpoint).await
    }
}

impl<'a, P: Serialize> Accounts<'a, P> {
    /// Register a new account; the server assigns the role from the path
    pub async fn add(&self, account: &NewAccount<P>) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::POST, self.routes.register, account)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Contact, OperatorProfile, Profile, StaffProfile};
    use crate::session::Session;
    use crate::testing::{test_client, MockBackend, MockResponse};
    use serde_json::json;

    fn operator_json(id: &str) -> serde_json::Value {
        json!({
            "user_id": id,
            "email": format!("{}@isp.example", id),
            "role": "operator",
            "profileDetail": { "name": "Op", "phone": "1", "revenue": 1000 }
        })
    }

    #[test]
    fn test_routes_for_role() {
        for role in Role::all() {
            assert_eq!(AccountRoutes::for_role(*role).role, *role);
        }
    }

    #[tokio::test]
    async fn test_paths_per_operation() {
        let backend = MockBackend::fixed(MockResponse::json(
            200,
            json!({ "data": operator_json("op-1") }),
        ))
        .await;
        let client = test_client(&backend, Session::in_memory());
        let operators = client.operators();

        operators.get("op-1").await.unwrap();
        operators.profile("op-1").await.unwrap();
        operators.update("op-1", &AccountUpdate::new().email("x@y.z")).await.unwrap();
        operators.delete("op-1").await.unwrap();

        let seen: Vec<(String, String)> = backend
            .requests()
            .iter()
            .map(|r| (r.method.clone(), r.endpoint().to_string()))
            .collect();
        assert_eq!(
            seen,
            vec![
                ("GET".into(), "/admin/operator/op-1".into()),
                ("GET".into(), "/operator/profile/op-1".into()),
                ("PUT".into(), "/admin/operator/profile/op-1".into()),
                ("DELETE".into(), "/admin/operator/profile/op-1".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_all_accepts_both_shapes() {
        let wrapped = MockBackend::routes(vec![(
            "GET",
            "/admin/operator/all",
            MockResponse::json(200, json!({ "data": [operator_json("a"), operator_json("b")] })),
        )])
        .await;
        let client = test_client(&wrapped, Session::in_memory());
        assert_eq!(client.operators().get_all().await.unwrap().len(), 2);

        let bare = MockBackend::routes(vec![(
            "GET",
            "/admin/operator/all",
            MockResponse::json(200, json!([operator_json("a")])),
        )])
        .await;
        let client = test_client(&bare, Session::in_memory());
        assert_eq!(client.operators().get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_repeated_reads_are_stable() {
        let backend = MockBackend::fixed(MockResponse::json(
            200,
            json!({ "data": [operator_json("a"), operator_json("b")] }),
        ))
        .await;
        let client = test_client(&backend, Session::in_memory());

        let first = client.operators().get_all().await.unwrap();
        let second = client.operators().get_all().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_add_then_get_returns_sent_fields() {
        let backend = MockBackend::echo_assigning(json!({ "role": "operator" })).await;
        let client = test_client(&backend, Session::in_memory());

        let profile = OperatorProfile {
            contact: Contact::new("Ravi", "9876543210"),
            company_name: Some("City Net".into()),
            customer_count: Some(42),
            revenue: Some(12500.0),
            ..Default::default()
        };
        let ack = client
            .operators()
            .add(&NewAccount::new("ravi@citynet.example", "pw", profile))
            .await
            .unwrap();
        let id = ack.data.as_ref().and_then(|d| d["user_id"].as_str()).unwrap().to_string();

        let user = client.operators().get(&id).await.unwrap();
        assert_eq!(user.user_id, id);
        assert_eq!(user.email, "ravi@citynet.example");
        assert_eq!(user.extra.get("password"), Some(&json!("pw")));
        match user.profile {
            Profile::Operator(op) => {
                assert_eq!(op.contact.name, "Ravi");
                assert_eq!(op.contact.phone, "9876543210");
                assert_eq!(op.company_name.as_deref(), Some("City Net"));
                assert_eq!(op.customer_count, Some(42));
                assert_eq!(op.revenue, Some(12500.0));
            }
            other => panic!("expected operator profile, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_staff_register_path() {
        let backend = MockBackend::echo_assigning(json!({ "role": "staff" })).await;
        let client = test_client(&backend, Session::in_memory());

        let profile = StaffProfile {
            contact: Contact::new("Asha", "1"),
            ..Default::default()
        };
        client
            .staff()
            .add(&NewAccount::new("asha@isp.example", "pw", profile))
            .await
            .unwrap();

        let request = backend.last_request().unwrap();
        assert_eq!(request.endpoint(), "/admin/staff/register");
        assert_eq!(request.body.unwrap()["profileDetail"]["name"], "Asha");
    }
}
