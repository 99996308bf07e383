use reqwest::Method;

use crate::client::{segment, ApiClient, ApiResponse};
use crate::error::ApiResult;
use crate::models::{Complaint, ComplaintUpdate, NewComplaint};

/// Support complaints, `/admin/complain/*`
pub struct Complaints<'a> {
    client: &'a ApiClient,
}

impl<'a> Complaints<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> ApiResult<Vec<Complaint>> {
        self.client.fetch("/admin/complain/all").await
    }

    pub async fn add(&self, complaint: &NewComplaint) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::POST, "/admin/complain/register", complaint)
            .await
    }

    pub async fn update(&self, id: &str, update: &ComplaintUpdate) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::PUT, &format!("/admin/complain/{}", segment(id)), update)
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<ApiResponse> {
        self.client
            .send_empty(Method::DELETE, &format!("/admin/complain/{}", segment(id)))
            .await
    }
}
