//! Orders placed through the marketplace or directly with vendors

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::record_id;

/// An order record. The marketplace and vendor endpoints share this shape
/// loosely, so only the common fields are modelled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    pub fn id(&self) -> Option<&str> {
        record_id(self.id.as_ref(), &self.extra)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: i64,
    pub price: f64,
}

/// Multi-line order with shipping and payment details
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub vendor_id: String,
    pub products: Vec<OrderLine>,
    pub shipping_address: String,
    pub payment_method: String,
}

impl NewOrder {
    /// Sum of line price times quantity
    pub fn total(&self) -> f64 {
        self.products.iter().map(|l| l.price * l.quantity as f64).sum()
    }
}

/// Single-product marketplace order from an operator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceOrder {
    pub product_name: String,
    pub quantity: i64,
    pub operator_id: String,
    pub vendor_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Catalog order by product id
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    pub product_id: String,
    pub quantity: i64,
    pub vendor_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

/// Vendor-side status change; vendors send `trackingId`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorOrderStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_total() {
        let order = NewOrder {
            vendor_id: "v1".into(),
            products: vec![
                OrderLine { product_id: "p1".into(), quantity: 2, price: 100.0 },
                OrderLine { product_id: "p2".into(), quantity: 1, price: 50.5 },
            ],
            shipping_address: "HSR Layout".into(),
            payment_method: "upi".into(),
        };
        assert_eq!(order.total(), 250.5);
    }
}
