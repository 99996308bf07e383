//! Role-specific profile details
//!
//! Each role carries its own profile shape on top of a shared [`Contact`].
//! Fields the server sends that are not modelled land in `extra`, so a
//! profile survives a fetch-and-resend unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::user::Role;

/// Fields every profile has
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// Postal area used by operators and vendors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub area: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceCapacity {
    #[serde(default)]
    pub connections: u64,
    #[serde(default)]
    pub olts: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAccess {
    #[serde(default)]
    pub whatsapp: bool,
    #[serde(default)]
    pub payment_gateway: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    #[serde(flatten)]
    pub contact: Contact,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// ISP operator (franchise) profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorProfile {
    #[serde(flatten)]
    pub contact: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_assigned: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_capacity: Option<ServiceCapacity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_access: Option<ApiAccess>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianProfile {
    #[serde(flatten)]
    pub contact: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_operator_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffProfile {
    #[serde(flatten)]
    pub contact: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorProfile {
    #[serde(flatten)]
    pub contact: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Commission percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Broadband subscriber profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    #[serde(flatten)]
    pub contact: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rate: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Profile detail of a user, shaped by the user's role
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Profile {
    Admin(AdminProfile),
    Operator(OperatorProfile),
    Technician(TechnicianProfile),
    Staff(StaffProfile),
    Vendor(VendorProfile),
    Customer(CustomerProfile),
}

impl Profile {
    /// Decode a `profileDetail` value for `role`.
    ///
    /// `null` is treated as an empty profile; any other non-object is rejected.
    pub fn from_value(role: Role, value: Value) -> Result<Self, ProfileError> {
        let value = match value {
            Value::Null => Value::Object(Map::new()),
            Value::Object(_) => value,
            _ => return Err(ProfileError::NotAnObject(role)),
        };

        let decoded = match role {
            Role::Admin => serde_json::from_value(value).map(Profile::Admin),
            Role::Operator => serde_json::from_value(value).map(Profile::Operator),
            Role::Technician => serde_json::from_value(value).map(Profile::Technician),
            Role::Staff => serde_json::from_value(value).map(Profile::Staff),
            Role::Vendor => serde_json::from_value(value).map(Profile::Vendor),
            Role::Customer => serde_json::from_value(value).map(Profile::Customer),
        };

        decoded.map_err(|e| ProfileError::Invalid {
            role,
            error: e.to_string(),
        })
    }

    /// Role this profile belongs to
    pub fn role(&self) -> Role {
        match self {
            Profile::Admin(_) => Role::Admin,
            Profile::Operator(_) => Role::Operator,
            Profile::Technician(_) => Role::Technician,
            Profile::Staff(_) => Role::Staff,
            Profile::Vendor(_) => Role::Vendor,
            Profile::Customer(_) => Role::Customer,
        }
    }

    pub fn contact(&self) -> &Contact {
        match self {
            Profile::Admin(p) => &p.contact,
            Profile::Operator(p) => &p.contact,
            Profile::Technician(p) => &p.contact,
            Profile::Staff(p) => &p.contact,
            Profile::Vendor(p) => &p.contact,
            Profile::Customer(p) => &p.contact,
        }
    }

    pub fn name(&self) -> &str {
        &self.contact().name
    }

    pub fn phone(&self) -> &str {
        &self.contact().phone
    }

    /// Unmodelled profile fields
    pub fn extra(&self) -> &Map<String, Value> {
        match self {
            Profile::Admin(p) => &p.extra,
            Profile::Operator(p) => &p.extra,
            Profile::Technician(p) => &p.extra,
            Profile::Staff(p) => &p.extra,
            Profile::Vendor(p) => &p.extra,
            Profile::Customer(p) => &p.extra,
        }
    }

    /// Company name for operators and vendors
    pub fn company_name(&self) -> Option<&str> {
        match self {
            Profile::Operator(p) => p.company_name.as_deref(),
            Profile::Vendor(p) => p.company_name.as_deref(),
            _ => None,
        }
    }

    /// Revenue figure for operators and vendors
    pub fn revenue(&self) -> Option<f64> {
        match self {
            Profile::Operator(p) => p.revenue,
            Profile::Vendor(p) => p.revenue,
            _ => None,
        }
    }
}

/// Profile validation failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("profileDetail for {0} must be a JSON object")]
    NotAnObject(Role),

    #[error("invalid {role} profileDetail: {error}")]
    Invalid { role: Role, error: String },
}
