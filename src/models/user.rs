//! Portal accounts
//!
//! A [`User`] is decoded from the wire shape
//! `{ user_id, email, role, profileDetail, createdAt, updatedAt, Permissions }`
//! with the profile validated against the role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

use super::profile::{Profile, ProfileError};

/// Account role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Operator,
    Technician,
    Vendor,
    Customer,
    Staff,
}

impl Role {
    /// All roles, for iteration
    pub fn all() -> &'static [Role] {
        &[
            Role::Admin,
            Role::Operator,
            Role::Technician,
            Role::Vendor,
            Role::Customer,
            Role::Staff,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operator => "operator",
            Role::Technician => "technician",
            Role::Vendor => "vendor",
            Role::Customer => "customer",
            Role::Staff => "staff",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::all()
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown role: {}", s))
    }
}

/// A portal account with its role-shaped profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawUser", into = "RawUser")]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub profile: Profile,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Server-side permission flags (`Permissions` on the wire)
    pub permissions: Map<String, Value>,
    /// Unmodelled top-level fields
    pub extra: Map<String, Value>,
}

impl User {
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn name(&self) -> &str {
        self.profile.name()
    }

    pub fn phone(&self) -> &str {
        self.profile.phone()
    }

    /// `Permissions.status`, when the server sets one
    pub fn status(&self) -> Option<&str> {
        self.permissions.get("status").and_then(Value::as_str)
    }
}

/// Wire shape of a user record
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    email: String,
    role: Role,
    #[serde(rename = "profileDetail", default)]
    profile_detail: Value,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "Permissions", default, skip_serializing_if = "Map::is_empty")]
    permissions: Map<String, Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Reasons a user record is rejected at decode time
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("user record has neither user_id nor _id")]
    MissingId,

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

impl TryFrom<RawUser> for User {
    type Error = UserError;

    fn try_from(raw: RawUser) -> Result<Self, Self::Error> {
        let user_id = raw
            .user_id
            .or_else(|| raw.extra.get("_id").and_then(Value::as_str).map(str::to_string))
            .ok_or(UserError::MissingId)?;

        let profile = Profile::from_value(raw.role, raw.profile_detail)?;

        Ok(User {
            user_id,
            email: raw.email,
            profile,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            permissions: raw.permissions,
            extra: raw.extra,
        })
    }
}

impl From<User> for RawUser {
    fn from(user: User) -> Self {
        let role = user.role();
        let profile_detail = serde_json::to_value(&user.profile).unwrap_or(Value::Null);
        RawUser {
            user_id: Some(user.user_id),
            email: user.email,
            role,
            profile_detail,
            created_at: user.created_at,
            updated_at: user.updated_at,
            permissions: user.permissions,
            extra: user.extra,
        }
    }
}

/// Body for registering an account of any role
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount<P> {
    pub email: String,
    pub password: String,
    #[serde(rename = "profileDetail")]
    pub profile_detail: P,
}

impl<P> NewAccount<P> {
    pub fn new(email: impl Into<String>, password: impl Into<String>, profile_detail: P) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            profile_detail,
        }
    }
}

/// Partial account update; only set fields are sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "profileDetail", skip_serializing_if = "Option::is_none")]
    pub profile_detail: Option<Map<String, Value>>,
}

impl AccountUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Builder method: set one profile field
    pub fn profile_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.profile_detail
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}
