use reqwest::Method;

use crate::client::{segment, ApiClient, ApiResponse};
use crate::error::ApiResult;
use crate::models::{MarketplaceOrder, NewStockItem, Order, OrderUpdate, StockItem};

/// Operator marketplace: warehouse stock offered for sale and the orders
/// placed against it
pub struct Marketplace<'a> {
    client: &'a ApiClient,
}

impl<'a> Marketplace<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn products(&self) -> ApiResult<Vec<StockItem>> {
        self.client.fetch("/inventory/stock/products").await
    }

    pub async fn add_product(&self, item: &NewStockItem) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::POST, "/inventory/stock/add", item)
            .await
    }

    pub async fn create_order(&self, order: &MarketplaceOrder) -> ApiResult<ApiResponse> {
        self.client.send_json(Method::POST, "/orders", order).await
    }

    pub async fn orders(&self) -> ApiResult<Vec<Order>> {
        self.client.fetch("/orders").await
    }

    pub async fn update_order(&self, order_id: &str, update: &OrderUpdate) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::PUT, &format!("/orders/{}", segment(order_id)), update)
            .await
    }
}
