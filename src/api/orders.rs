use reqwest::Method;
use serde::Serialize;

use crate::client::{segment, ApiClient, ApiResponse};
use crate::error::ApiResult;
use crate::models::{NewOrder, Order, OrderUpdate, PlaceOrder};

/// Purchase orders, `/orders`
pub struct Orders<'a> {
    client: &'a ApiClient,
}

impl<'a> Orders<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, order: &NewOrder) -> ApiResult<ApiResponse> {
        self.client.send_json(Method::POST, "/orders", order).await
    }

    pub async fn get_all(&self) -> ApiResult<Vec<Order>> {
        self.client.fetch("/orders").await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Order> {
        self.client.fetch(&format!("/orders/{}", segment(id))).await
    }

    /// Free-form update of an order
    pub async fn update<B: Serialize + ?Sized>(&self, id: &str, patch: &B) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::PUT, &format!("/orders/{}", segment(id)), patch)
            .await
    }

    /// Status, tracking and delivery update
    pub async fn update_status(&self, id: &str, update: &OrderUpdate) -> ApiResult<ApiResponse> {
        self.update(id, update).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<ApiResponse> {
        self.client
            .send_empty(Method::DELETE, &format!("/orders/{}", segment(id)))
            .await
    }

    /// Order a catalog product by id
    pub async fn place(&self, order: &PlaceOrder) -> ApiResult<ApiResponse> {
        self.client.send_json(Method::POST, "/order/Places", order).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderLine;
    use crate::session::Session;
    use crate::testing::{test_client, MockBackend};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_get_delete() {
        let backend = MockBackend::echo().await;
        let client = test_client(&backend, Session::in_memory());
        let orders = client.orders();

        let ack = orders
            .create(&NewOrder {
                vendor_id: "v-1".into(),
                products: vec![OrderLine {
                    product_id: "p-1".into(),
                    quantity: 3,
                    price: 120.0,
                }],
                shipping_address: "Whitefield".into(),
                payment_method: "cod".into(),
            })
            .await
            .unwrap();
        let id = ack.data.unwrap()["id"].as_str().unwrap().to_string();

        let order = orders.get(&id).await.unwrap();
        assert_eq!(order.id(), Some(id.as_str()));
        assert_eq!(order.vendor_id.as_deref(), Some("v-1"));
        assert_eq!(order.extra["products"][0]["productId"], "p-1");
        assert_eq!(order, orders.get(&id).await.unwrap());

        orders.delete(&id).await.unwrap();
        assert!(orders.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_place_order_path() {
        let backend = MockBackend::echo().await;
        let client = test_client(&backend, Session::in_memory());

        client
            .orders()
            .place(&PlaceOrder {
                product_id: "p-5".into(),
                quantity: 1,
                vendor_id: "v-2".into(),
            })
            .await
            .unwrap();

        let request = backend.last_request().unwrap();
        assert_eq!(request.endpoint(), "/order/Places");
        assert_eq!(
            request.body,
            Some(json!({ "productId": "p-5", "quantity": 1, "vendorId": "v-2" }))
        );
    }
}
