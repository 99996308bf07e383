//! Products: vendor listings, warehouse stock, and the product catalog

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::record_id;
use super::user::Role;

/// A product a vendor lists for operators to buy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VendorProduct {
    pub fn id(&self) -> Option<&str> {
        record_id(self.id.as_ref(), &self.extra)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVendorProduct {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
    pub description: String,
    pub specifications: String,
    pub warranty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

/// Warehouse stock item, also served as a marketplace product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StockItem {
    pub fn id(&self) -> Option<&str> {
        record_id(self.id.as_ref(), &self.extra)
    }
}

/// Body for adding a stock item. Field casing follows the server,
/// including its `ModelNumber`, `ProductImage` and `warantyInfo` keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStockItem {
    pub item_name: String,
    pub quantity: i64,
    pub supplier: String,
    pub unit_price: f64,
    pub category: String,
    pub brand: String,
    /// Role of the caller adding the item
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specification: Option<String>,
    #[serde(rename = "ModelNumber", skip_serializing_if = "Option::is_none")]
    pub model_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<f64>,
    #[serde(rename = "ProductImage", skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    #[serde(rename = "warantyInfo", skip_serializing_if = "Option::is_none")]
    pub warranty_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sold: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl NewStockItem {
    /// Item with the required fields; optional fields start unset
    pub fn new(
        item_name: impl Into<String>,
        quantity: i64,
        supplier: impl Into<String>,
        unit_price: f64,
        category: impl Into<String>,
        brand: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            item_name: item_name.into(),
            quantity,
            supplier: supplier.into(),
            unit_price,
            category: category.into(),
            brand: brand.into(),
            role,
            phone_number: None,
            description: None,
            specification: None,
            model_number: None,
            cost_price: None,
            selling_price: None,
            product_image: None,
            warranty_info: None,
            discount: None,
            rating: None,
            unit_type: None,
            sold: None,
            status: None,
        }
    }
}

/// Entry of the general product catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn id(&self) -> Option<&str> {
        record_id(self.id.as_ref(), &self.extra)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: String,
    pub specifications: Value,
    pub images: Vec<String>,
}

/// Stock category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}
