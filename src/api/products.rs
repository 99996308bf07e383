//! Product catalog.
//!
//! Stock-backed products live under `/inventory/stock/*`; the general catalog
//! (search, categories, catalog listing) lives under `/products/*`.

use reqwest::Method;
use serde::Serialize;

use crate::client::{segment, ApiClient, ApiResponse, RequestOptions};
use crate::error::ApiResult;
use crate::models::{NewProduct, Product, StockItem};

pub struct Products<'a> {
    client: &'a ApiClient,
}

impl<'a> Products<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> ApiResult<Vec<StockItem>> {
        self.client.fetch("/inventory/stock/products").await
    }

    pub async fn get(&self, id: &str) -> ApiResult<StockItem> {
        self.client
            .fetch(&format!("/inventory/stock/products/{}", segment(id)))
            .await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, product: &B) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::POST, "/inventory/stock/add", product)
            .await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: &str, patch: &B) -> ApiResult<ApiResponse> {
        self.client
            .send_json(
                Method::PUT,
                &format!("/inventory/update/stock/{}", segment(id)),
                patch,
            )
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<ApiResponse> {
        self.client
            .send_empty(Method::DELETE, &format!("/products/{}", segment(id)))
            .await
    }

    /// Full-text search over the catalog
    pub async fn search(&self, query: &str) -> ApiResult<Vec<Product>> {
        self.client
            .fetch_with("/products/search", RequestOptions::get().query("q", query))
            .await
    }

    pub async fn by_category(&self, category: &str) -> ApiResult<Vec<Product>> {
        self.client
            .fetch(&format!("/products/category/{}", segment(category)))
            .await
    }

    pub async fn catalog(&self) -> ApiResult<Vec<Product>> {
        self.client.fetch("/products/catalog").await
    }

    pub async fn list(&self) -> ApiResult<Vec<Product>> {
        self.client.fetch("/products").await
    }

    pub async fn add(&self, product: &NewProduct) -> ApiResult<ApiResponse> {
        self.client.send_json(Method::POST, "/products/add", product).await
    }
}
