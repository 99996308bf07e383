//! Portal domain records
//!
//! Typed views over the JSON the portal API exchanges:
//! - `user` / `profile`: accounts with role-shaped profile details
//! - `complaint`: customer support tickets
//! - `leave`: technician and staff leave requests
//! - `catalog`: vendor products, stock products, catalog products
//! - `order`: marketplace and vendor orders
//! - `inventory`: stock issuance, assignment, installation
//! - `notification`: user notifications
//! - `billing`: invoices, payments, vendor settlements
//!
//! Every record keeps the fields it does not model in a flattened `extra`
//! map, so nothing the server sends is lost when a record is re-sent.

/// Closed status-like enum with an `Unknown` catch-all.
///
/// Decoding ignores case and maps any value not listed to `Unknown`, so one
/// record with a new status does not fail the list it arrives in. `FromStr`
/// stays strict.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant,)+
            /// A value this crate does not model
            Unknown,
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Unknown => "unknown",
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($wire) {
                        return Ok($name::$variant);
                    }
                )+
                Err(format!("unknown {}: {}", stringify!($name), s))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <String as serde::Deserialize>::deserialize(deserializer)?;
                Ok(value.parse().unwrap_or($name::Unknown))
            }
        }
    };
}

pub mod billing;
pub mod catalog;
pub mod complaint;
pub mod inventory;
pub mod leave;
pub mod notification;
pub mod order;
pub mod profile;
pub mod user;

pub use billing::{
    BillingRecord, InvoiceRequest, PaymentRecord, PaymentRequest, PaymentStatus, Settlement,
    SettlementStatus,
};
pub use catalog::{
    Category, NewCategory, NewProduct, NewStockItem, NewVendorProduct, Product, StockItem,
    VendorProduct,
};
pub use complaint::{Complaint, ComplaintUpdate, NewComplaint, Priority};
pub use inventory::{
    CustomerInstallation, IssueLine, ItemReturn, OperatorAssignment, OperatorStock,
    StockAdjustment, StockIssue, StockItemUpdate, TechnicianAssignment, TechnicianReturn,
};
pub use leave::{LeaveRequest, LeaveStatus, LeaveUpdate, NewLeaveRequest};
pub use notification::{NewNotification, Notification};
pub use order::{
    MarketplaceOrder, NewOrder, Order, OrderLine, OrderUpdate, PlaceOrder, VendorOrderStatus,
};
pub use profile::{
    Address, AdminProfile, ApiAccess, Contact, CustomerProfile, OperatorProfile, Profile,
    ProfileError, ServiceCapacity, StaffProfile, TechnicianProfile, VendorProfile,
};
pub use user::{AccountUpdate, NewAccount, Role, User, UserError};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Loosely shaped record for endpoints whose payload has no fixed schema
/// (stock movements, alerts, issuances, installations)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    /// `id`, falling back to `_id`
    pub fn id(&self) -> Option<&str> {
        record_id(None, &self.0)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }
}

/// Identifier of a record: the modelled `id` if set, else `id`/`_id` in `extra`
pub(crate) fn record_id<'a>(id: Option<&'a String>, extra: &'a Map<String, Value>) -> Option<&'a str> {
    id.map(String::as_str).or_else(|| {
        ["id", "_id"]
            .iter()
            .find_map(|k| extra.get(*k).and_then(Value::as_str))
    })
}
