//! Vendor-facing catalog and order handling

use reqwest::Method;
use serde::Serialize;

use crate::client::{segment, ApiClient, ApiResponse};
use crate::error::ApiResult;
use crate::models::{NewVendorProduct, Order, VendorOrderStatus, VendorProduct};

pub struct VendorCatalog<'a> {
    client: &'a ApiClient,
}

impl<'a> VendorCatalog<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Products listed by `vendor_id`
    pub async fn products(&self, vendor_id: &str) -> ApiResult<Vec<VendorProduct>> {
        self.client
            .fetch(&format!("/vendor/products/{}", segment(vendor_id)))
            .await
    }

    pub async fn add_product(&self, product: &NewVendorProduct) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::POST, "/vendor/products", product)
            .await
    }

    /// Replace fields of a listed product; any serializable patch is accepted
    pub async fn update_product<B: Serialize + ?Sized>(
        &self,
        product_id: &str,
        patch: &B,
    ) -> ApiResult<ApiResponse> {
        self.client
            .send_json(
                Method::PUT,
                &format!("/vendor/products/{}", segment(product_id)),
                patch,
            )
            .await
    }

    pub async fn delete_product(&self, product_id: &str) -> ApiResult<ApiResponse> {
        self.client
            .send_empty(
                Method::DELETE,
                &format!("/vendor/products/{}", segment(product_id)),
            )
            .await
    }

    /// Orders placed with `vendor_id`
    pub async fn orders(&self, vendor_id: &str) -> ApiResult<Vec<Order>> {
        self.client
            .fetch(&format!("/vendor/orders/{}", segment(vendor_id)))
            .await
    }

    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: &str,
        tracking_id: Option<&str>,
    ) -> ApiResult<ApiResponse> {
        let body = VendorOrderStatus {
            status: status.to_string(),
            tracking_id: tracking_id.map(str::to_string),
        };
        self.client
            .send_json(
                Method::PUT,
                &format!("/vendor/orders/{}/status", segment(order_id)),
                &body,
            )
            .await
    }
}
