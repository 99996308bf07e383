use reqwest::Method;

use crate::client::{segment, ApiClient, ApiResponse};
use crate::error::ApiResult;
use crate::models::{NewNotification, Notification};

pub struct Notifications<'a> {
    client: &'a ApiClient,
}

impl<'a> Notifications<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Notifications addressed to `user_id`
    pub async fn get_all(&self, user_id: &str) -> ApiResult<Vec<Notification>> {
        self.client
            .fetch(&format!("/notifications/{}", segment(user_id)))
            .await
    }

    pub async fn mark_read(&self, id: &str) -> ApiResult<ApiResponse> {
        self.client
            .send_empty(Method::PUT, &format!("/notifications/{}/read", segment(id)))
            .await
    }

    pub async fn send(&self, notification: &NewNotification) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::POST, "/notifications", notification)
            .await
    }
}
