use reqwest::Method;

use crate::client::{segment, ApiClient, ApiResponse};
use crate::error::ApiResult;
use crate::models::{BillingRecord, InvoiceRequest, PaymentRequest};

/// Customer billing, `/billing/*`
pub struct Billing<'a> {
    client: &'a ApiClient,
}

impl<'a> Billing<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn history(&self, customer_id: &str) -> ApiResult<Vec<BillingRecord>> {
        self.client
            .fetch(&format!("/billing/history/{}", segment(customer_id)))
            .await
    }

    pub async fn generate_invoice(
        &self,
        customer_id: &str,
        invoice: &InvoiceRequest,
    ) -> ApiResult<ApiResponse> {
        self.client
            .send_json(
                Method::POST,
                &format!("/billing/invoice/{}", segment(customer_id)),
                invoice,
            )
            .await
    }

    pub async fn process_payment(&self, payment: &PaymentRequest) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::POST, "/billing/payment", payment)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::testing::{test_client, MockBackend};

    #[tokio::test]
    async fn test_invoice_then_history() {
        let backend = MockBackend::echo().await;
        let client = test_client(&backend, Session::in_memory());

        client
            .billing()
            .generate_invoice(
                "cust-1",
                &InvoiceRequest {
                    amount: 799.0,
                    due_date: "2024-02-05".into(),
                    description: "Monthly 100 Mbps plan".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(backend.last_request().unwrap().endpoint(), "/billing/invoice/cust-1");

        let history = client.billing().history("cust-1").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].amount, Some(799.0));
        assert_eq!(history[0].due_date.as_deref(), Some("2024-02-05"));
    }

    #[tokio::test]
    async fn test_payment_body_omits_missing_invoice() {
        let backend = MockBackend::echo().await;
        let client = test_client(&backend, Session::in_memory());

        client
            .billing()
            .process_payment(&PaymentRequest {
                customer_id: "cust-1".into(),
                amount: 799.0,
                payment_method: "upi".into(),
                invoice_id: None,
            })
            .await
            .unwrap();

        let body = backend.last_request().unwrap().body.unwrap();
        assert_eq!(body["paymentMethod"], "upi");
        assert!(body.get("invoiceId").is_none());
    }
}
