//! Stock flow from the warehouse to customer premises.
//!
//! Warehouse stock is issued to operators, operators assign it to their
//! technicians, technicians install it at customers or return it. Movements,
//! alerts and categories are read from the stock endpoints.

use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};

use crate::client::{segment, ApiClient, ApiResponse};
use crate::error::ApiResult;
use crate::models::{
    Category, CustomerInstallation, ItemReturn, NewCategory, NewStockItem, OperatorAssignment,
    OperatorStock, Record, Role, StockAdjustment, StockIssue, StockItem, StockItemUpdate,
    TechnicianAssignment, TechnicianReturn,
};

pub struct Inventory<'a> {
    client: &'a ApiClient,
}

#[derive(Serialize)]
struct RoleBody {
    role: Role,
}

impl<'a> Inventory<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    // Warehouse stock

    pub async fn stock_products(&self) -> ApiResult<Vec<StockItem>> {
        self.client.fetch("/inventory/stock/products").await
    }

    pub async fn add_stock_item(&self, item: &NewStockItem) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::POST, "/inventory/stock/add", item)
            .await
    }

    pub async fn update_stock_item(&self, id: &str, update: &StockItemUpdate) -> ApiResult<ApiResponse> {
        self.client
            .send_json(
                Method::PUT,
                &format!("/inventory/update/stock/{}", segment(id)),
                update,
            )
            .await
    }

    /// Delete a stock item; the server authorizes on the `role` in the body
    pub async fn delete_stock_item(&self, id: &str, role: Role) -> ApiResult<ApiResponse> {
        self.client
            .send_json(
                Method::DELETE,
                &format!("/inventory/delete/stock/{}", segment(id)),
                &RoleBody { role },
            )
            .await
    }

    // Issuance to operators

    pub async fn issue_to_operator(&self, issue: &StockIssue) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::POST, "/inventory/stock/issue", issue)
            .await
    }

    pub async fn issuances(&self) -> ApiResult<Vec<Record>> {
        self.client.fetch("/inventory/stock/issuance/all").await
    }

    pub async fn issuance(&self, issue_id: &str) -> ApiResult<Record> {
        self.client
            .fetch(&format!("/inventory/stock/issuance/{}", segment(issue_id)))
            .await
    }

    pub async fn update_issuance_status(&self, issue_id: &str, status: &str) -> ApiResult<ApiResponse> {
        self.client
            .send_json(
                Method::PATCH,
                &format!("/inventory/stock/issuance/{}/status", segment(issue_id)),
                &json!({ "status": status }),
            )
            .await
    }

    pub async fn operator_issuances(&self, operator_id: &str) -> ApiResult<Vec<Record>> {
        self.client
            .fetch(&format!(
                "/inventory/stock/issuance/operator/{}",
                segment(operator_id)
            ))
            .await
    }

    // Technician stock

    pub async fn assign_to_technician(&self, assignment: &TechnicianAssignment) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::POST, "/inventory/stock/assign/technician", assignment)
            .await
    }

    /// Stock held by a technician. The shape varies (a list of items or a
    /// summary object), so the payload is returned as JSON.
    pub async fn technician_stock(&self, technician_id: &str) -> ApiResult<Value> {
        self.client
            .fetch(&format!(
                "/inventory/stock/assign/technician/{}",
                segment(technician_id)
            ))
            .await
    }

    pub async fn return_from_technician(
        &self,
        item_id: &str,
        stock_return: &TechnicianReturn,
    ) -> ApiResult<ApiResponse> {
        self.client
            .send_json(
                Method::POST,
                &format!("/inventory/stock/technician/return/{}", segment(item_id)),
                stock_return,
            )
            .await
    }

    // Customer installations

    pub async fn install_to_customer(&self, installation: &CustomerInstallation) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::POST, "/inventory/stock/technician/install", installation)
            .await
    }

    pub async fn customer_installations(&self, customer_id: &str) -> ApiResult<Vec<Record>> {
        self.client
            .fetch(&format!(
                "/inventory/stock/customer/{}/installations",
                segment(customer_id)
            ))
            .await
    }

    /// The server reads the new value from `newStatus`
    pub async fn update_installation_status(
        &self,
        install_id: &str,
        new_status: &str,
    ) -> ApiResult<ApiResponse> {
        self.client
            .send_json(
                Method::PATCH,
                &format!(
                    "/inventory/stock/customer/installation/{}/status",
                    segment(install_id)
                ),
                &json!({ "newStatus": new_status }),
            )
            .await
    }

    pub async fn confirm_installation(&self, item_id: &str) -> ApiResult<ApiResponse> {
        self.client
            .send_empty(
                Method::PUT,
                &format!("/inventory/customer/confirm/{}", segment(item_id)),
            )
            .await
    }

    // Operator-held stock

    pub async fn add_operator_stock(&self, stock: &OperatorStock) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::POST, "/inventory/operator/add", stock)
            .await
    }

    pub async fn assign_operator_stock(
        &self,
        item_id: &str,
        assignment: &OperatorAssignment,
    ) -> ApiResult<ApiResponse> {
        self.client
            .send_json(
                Method::PUT,
                &format!("/inventory/operator/assign/{}", segment(item_id)),
                assignment,
            )
            .await
    }

    pub async fn return_items(&self, item_id: &str, quantity: i64) -> ApiResult<ApiResponse> {
        self.client
            .send_json(
                Method::PUT,
                &format!("/inventory/technician/return/{}", segment(item_id)),
                &ItemReturn { quantity },
            )
            .await
    }

    // Movements, alerts, categories

    pub async fn movements(&self) -> ApiResult<Vec<Record>> {
        self.client.fetch("/inventory/stock/movements").await
    }

    pub async fn alerts(&self) -> ApiResult<Vec<Record>> {
        self.client.fetch("/stock/alerts").await
    }

    pub async fn adjust(&self, adjustment: &StockAdjustment) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::POST, "/stock/adjustment", adjustment)
            .await
    }

    pub async fn categories(&self) -> ApiResult<Vec<Category>> {
        self.client.fetch("/stock/categories").await
    }

    pub async fn add_category(&self, category: &NewCategory) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::POST, "/stock/categories", category)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IssueLine;
    use crate::session::Session;
    use crate::testing::{test_client, MockBackend, MockResponse};

    #[tokio::test]
    async fn test_delete_stock_item_sends_role() {
        let backend = MockBackend::fixed(MockResponse::json(200, json!({ "message": "Deleted" }))).await;
        let client = test_client(&backend, Session::in_memory());

        let ack = client
            .inventory()
            .delete_stock_item("s-1", Role::Admin)
            .await
            .unwrap();
        assert_eq!(ack.message.as_deref(), Some("Deleted"));

        let request = backend.last_request().unwrap();
        assert_eq!(request.method, "DELETE");
        assert_eq!(request.endpoint(), "/inventory/delete/stock/s-1");
        assert_eq!(request.body, Some(json!({ "role": "admin" })));
    }

    #[tokio::test]
    async fn test_issuance_flow() {
        let backend = MockBackend::echo().await;
        let client = test_client(&backend, Session::in_memory());
        let inventory = client.inventory();

        let ack = inventory
            .issue_to_operator(&StockIssue {
                operator_id: "op-1".into(),
                items: vec![IssueLine {
                    item_id: "s-1".into(),
                    quantity: 10,
                }],
            })
            .await
            .unwrap();
        let issue_id = ack.data.unwrap()["id"].as_str().unwrap().to_string();

        inventory
            .update_issuance_status(&issue_id, "delivered")
            .await
            .unwrap();

        let issuance = inventory.issuance(&issue_id).await.unwrap();
        assert_eq!(issuance.get_str("operatorId"), Some("op-1"));
        assert_eq!(issuance.get_str("status"), Some("delivered"));
        assert_eq!(inventory.issuances().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_status_and_confirm_paths() {
        let backend = MockBackend::fixed(MockResponse::json(200, json!({}))).await;
        let client = test_client(&backend, Session::in_memory());
        let inventory = client.inventory();

        inventory
            .update_installation_status("inst-4", "active")
            .await
            .unwrap();
        inventory.confirm_installation("s-2").await.unwrap();
        inventory.return_items("s-3", 2).await.unwrap();
        inventory
            .assign_operator_stock(
                "s-4",
                &OperatorAssignment {
                    technician_id: "t-1".into(),
                    quantity: 1,
                },
            )
            .await
            .unwrap();

        let requests = backend.requests();
        assert_eq!(requests[0].method, "PATCH");
        assert_eq!(
            requests[0].endpoint(),
            "/inventory/stock/customer/installation/inst-4/status"
        );
        assert_eq!(requests[0].body, Some(json!({ "newStatus": "active" })));

        assert_eq!(requests[1].method, "PUT");
        assert_eq!(requests[1].endpoint(), "/inventory/customer/confirm/s-2");
        assert_eq!(requests[1].body, None);

        assert_eq!(requests[2].endpoint(), "/inventory/technician/return/s-3");
        assert_eq!(requests[2].body, Some(json!({ "quantity": 2 })));

        assert_eq!(requests[3].endpoint(), "/inventory/operator/assign/s-4");
        assert_eq!(
            requests[3].body,
            Some(json!({ "technicianId": "t-1", "quantity": 1 }))
        );
    }

    #[tokio::test]
    async fn test_technician_return_body() {
        let backend = MockBackend::echo().await;
        let client = test_client(&backend, Session::in_memory());

        client
            .inventory()
            .return_from_technician(
                "s-9",
                &TechnicianReturn {
                    operator_id: "op-1".into(),
                    technician_id: "t-2".into(),
                    quantity: 3,
                    issue_id: "iss-1".into(),
                    role: Role::Operator,
                },
            )
            .await
            .unwrap();

        let request = backend.last_request().unwrap();
        assert_eq!(request.endpoint(), "/inventory/stock/technician/return/s-9");
        let body = request.body.unwrap();
        assert_eq!(body["issueId"], "iss-1");
        assert_eq!(body["role"], "operator");
    }

    #[tokio::test]
    async fn test_categories_round_trip() {
        let backend = MockBackend::echo().await;
        let client = test_client(&backend, Session::in_memory());

        client
            .inventory()
            .add_category(&NewCategory {
                name: "Fiber".into(),
                description: "Cables and connectors".into(),
            })
            .await
            .unwrap();

        let categories = client.inventory().categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Fiber");
        assert_eq!(categories[0].description.as_deref(), Some("Cables and connectors"));
    }

    #[tokio::test]
    async fn test_technician_stock_accepts_lists_and_objects() {
        let summary = json!({ "technicianId": "t1", "items": [{ "itemName": "ONT", "quantity": 2 }] });
        let backend = MockBackend::fixed(MockResponse::json(200, json!({ "data": summary.clone() }))).await;
        let client = test_client(&backend, Session::in_memory());

        let stock = client.inventory().technician_stock("t1").await.unwrap();
        assert_eq!(stock, summary);
        assert_eq!(
            backend.last_request().unwrap().endpoint(),
            "/inventory/stock/assign/technician/t1"
        );

        let backend = MockBackend::fixed(MockResponse::json(200, json!([{ "itemName": "Router" }]))).await;
        let client = test_client(&backend, Session::in_memory());
        let stock = client.inventory().technician_stock("t1").await.unwrap();
        assert_eq!(stock[0]["itemName"], "Router");
    }
}
