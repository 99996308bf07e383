use reqwest::Method;

use crate::client::{segment, ApiClient, ApiResponse};
use crate::error::ApiResult;
use crate::models::{LeaveRequest, LeaveUpdate, NewLeaveRequest};

/// Leave requests, `/leave/requests/*`
pub struct Leave<'a> {
    client: &'a ApiClient,
}

impl<'a> Leave<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// File a request on behalf of `technician_id`
    pub async fn create(&self, technician_id: &str, request: &NewLeaveRequest) -> ApiResult<ApiResponse> {
        self.client
            .send_json(
                Method::POST,
                &format!("/leave/requests/{}", segment(technician_id)),
                request,
            )
            .await
    }

    pub async fn get_all(&self) -> ApiResult<Vec<LeaveRequest>> {
        self.client.fetch("/leave/requests").await
    }

    /// Requests filed by one technician
    pub async fn for_technician(&self, technician_id: &str) -> ApiResult<Vec<LeaveRequest>> {
        self.client
            .fetch(&format!("/leave/requests/my/{}", segment(technician_id)))
            .await
    }

    pub async fn update(&self, id: &str, update: &LeaveUpdate) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::PUT, &format!("/leave/requests/{}", segment(id)), update)
            .await
    }

    pub async fn approve(&self, id: &str) -> ApiResult<ApiResponse> {
        self.decide(id, "approve").await
    }

    pub async fn reject(&self, id: &str) -> ApiResult<ApiResponse> {
        self.decide(id, "reject").await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<ApiResponse> {
        self.client
            .send_empty(Method::DELETE, &format!("/leave/requests/{}", segment(id)))
            .await
    }

    async fn decide(&self, id: &str, action: &str) -> ApiResult<ApiResponse> {
        tracing::debug!(leave_id = %id, action, "Deciding leave request");
        self.client
            .send_empty(
                Method::PUT,
                &format!("/leave/requests/{}/{}", segment(id), action),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::LeaveStatus;
    use crate::session::Session;
    use crate::testing::{test_client, MockBackend, MockResponse};
    use chrono::NaiveDate;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_and_list() {
        let backend = MockBackend::echo().await;
        let client = test_client(&backend, Session::in_memory());

        client
            .leave()
            .create(
                "tech-7",
                &NewLeaveRequest {
                    leave_type: "casual".into(),
                    start_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                    reason: "Family function".into(),
                    documents: None,
                },
            )
            .await
            .unwrap();

        let request = backend.last_request().unwrap();
        assert_eq!(request.endpoint(), "/leave/requests/tech-7");
        assert_eq!(request.body.unwrap()["startDate"], "2024-03-04");

        let all = client.leave().get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].leave_type.as_deref(), Some("casual"));
    }

    #[tokio::test]
    async fn test_decision_paths() {
        let backend = MockBackend::fixed(MockResponse::json(
            200,
            json!({ "message": "Leave request updated" }),
        ))
        .await;
        let client = test_client(&backend, Session::in_memory());

        let ack = client.leave().approve("LR001").await.unwrap();
        assert_eq!(ack.message.as_deref(), Some("Leave request updated"));
        client.leave().reject("LR002").await.unwrap();
        let err = client.leave().for_technician("tech-1").await.unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedShape(_)));

        let requests = backend.requests();
        assert_eq!(requests[0].method, "PUT");
        assert_eq!(requests[0].endpoint(), "/leave/requests/LR001/approve");
        assert_eq!(requests[1].endpoint(), "/leave/requests/LR002/reject");
        assert_eq!(requests[2].endpoint(), "/leave/requests/my/tech-1");
    }

    #[tokio::test]
    async fn test_list_keeps_records_with_other_statuses() {
        let backend = MockBackend::fixed(MockResponse::json(
            200,
            json!({ "data": [
                { "id": "LR1", "status": "pending" },
                { "id": "LR2", "status": "cancelled" },
                { "id": "LR3", "status": "escalated" }
            ] }),
        ))
        .await;
        let client = test_client(&backend, Session::in_memory());

        let all = client.leave().get_all().await.unwrap();
        let statuses: Vec<Option<LeaveStatus>> = all.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                Some(LeaveStatus::Pending),
                Some(LeaveStatus::Cancelled),
                Some(LeaveStatus::Unknown)
            ]
        );
    }
}
