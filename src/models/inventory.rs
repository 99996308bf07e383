//! Request bodies for stock movements: warehouse to operator, operator to
//! technician, technician to customer, and back.

use serde::Serialize;

use super::user::Role;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLine {
    pub item_id: String,
    pub quantity: i64,
}

/// Warehouse issue of several items to an operator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockIssue {
    pub operator_id: String,
    pub items: Vec<IssueLine>,
}

impl StockIssue {
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianAssignment {
    pub operator_id: String,
    pub technician_id: String,
    pub item_id: String,
    pub quantity: i64,
    pub issue_id: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianReturn {
    pub operator_id: String,
    pub technician_id: String,
    pub quantity: i64,
    pub issue_id: String,
    pub role: Role,
}

/// Items a technician installed at a customer site
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInstallation {
    pub technician_id: String,
    pub customer_id: String,
    pub item_id: String,
    pub quantity: i64,
    pub role: Role,
    pub install_status: String,
}

/// Stock an operator records in their own inventory
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorStock {
    pub item_name: String,
    pub quantity: i64,
    pub supplier: String,
    pub unit_price: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorAssignment {
    pub technician_id: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemReturn {
    pub quantity: i64,
}

/// Signed correction to a stock level
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustment {
    pub item_id: String,
    pub adjustment: i64,
    pub reason: String,
}
