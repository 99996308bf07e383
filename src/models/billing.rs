//! Invoices, payments, and vendor settlements

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::record_id;

/// A customer billing entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BillingRecord {
    pub fn id(&self) -> Option<&str> {
        record_id(self.id.as_ref(), &self.extra)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    pub amount: f64,
    pub due_date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub customer_id: String,
    pub amount: f64,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
}

wire_enum! {
    pub enum SettlementStatus {
        Pending => "pending",
        Processing => "processing",
        Paid => "paid",
    }
}

/// Periodic payout owed to a vendor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default)]
    pub total_sales: f64,
    #[serde(default)]
    pub commission: f64,
    #[serde(default)]
    pub net_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SettlementStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Settlement {
    pub fn id(&self) -> Option<&str> {
        record_id(self.id.as_ref(), &self.extra)
    }
}

wire_enum! {
    pub enum PaymentStatus {
        Completed => "completed",
        Pending => "pending",
        Failed => "failed",
    }
}

/// Payment received against a vendor order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub commission: f64,
    #[serde(default)]
    pub net_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PaymentRecord {
    pub fn id(&self) -> Option<&str> {
        record_id(self.id.as_ref(), &self.extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_settlement() {
        let settlement: Settlement = serde_json::from_value(json!({
            "id": "SET-2024-01",
            "period": "January 2024",
            "totalSales": 125000,
            "commission": 6250,
            "netAmount": 118750,
            "status": "paid",
            "transactionId": "TXN123"
        }))
        .unwrap();

        assert_eq!(settlement.status, Some(SettlementStatus::Paid));
        assert_eq!(settlement.net_amount, 118750.0);
        assert_eq!(settlement.transaction_id.as_deref(), Some("TXN123"));
    }

    #[test]
    fn test_unmodelled_statuses_decode_as_unknown() {
        let payment: PaymentRecord =
            serde_json::from_value(json!({ "id": "p1", "status": "refunded" })).unwrap();
        assert_eq!(payment.status, Some(PaymentStatus::Unknown));
        assert!("refunded".parse::<PaymentStatus>().is_err());

        let settlement: Settlement =
            serde_json::from_value(json!({ "status": "PAID", "netAmount": 10 })).unwrap();
        assert_eq!(settlement.status, Some(SettlementStatus::Paid));
        assert_eq!(serde_json::to_value(settlement.status).unwrap(), json!("paid"));
    }
}
