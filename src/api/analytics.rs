//! Analytics reports.
//!
//! Report bodies have no fixed schema and are returned as raw JSON, exactly
//! as the server sent them (no envelope unwrapping). Filters are sent as a
//! query string.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

use crate::client::{ApiClient, ApiResponse, RequestOptions};
use crate::error::ApiResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyticsReport {
    Overview,
    Revenue,
    Operators,
    Technicians,
    Inventory,
    Complaints,
    Marketplace,
}

impl AnalyticsReport {
    pub fn all() -> &'static [AnalyticsReport] {
        &[
            AnalyticsReport::Overview,
            AnalyticsReport::Revenue,
            AnalyticsReport::Operators,
            AnalyticsReport::Technicians,
            AnalyticsReport::Inventory,
            AnalyticsReport::Complaints,
            AnalyticsReport::Marketplace,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsReport::Overview => "overview",
            AnalyticsReport::Revenue => "revenue",
            AnalyticsReport::Operators => "operators",
            AnalyticsReport::Technicians => "technicians",
            AnalyticsReport::Inventory => "inventory",
            AnalyticsReport::Complaints => "complaints",
            AnalyticsReport::Marketplace => "marketplace",
        }
    }

    pub fn endpoint(&self) -> String {
        format!("/analytics/{}", self.as_str())
    }
}

impl std::fmt::Display for AnalyticsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyticsReport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnalyticsReport::all()
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown analytics report: {}", s))
    }
}

pub struct Analytics<'a> {
    client: &'a ApiClient,
}

impl<'a> Analytics<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetch `report` with optional filter pairs
    pub async fn report(&self, report: AnalyticsReport, params: &[(&str, &str)]) -> ApiResult<Value> {
        let options = params
            .iter()
            .fold(RequestOptions::get(), |options, (k, v)| options.query(*k, *v));
        self.client.request(&report.endpoint(), options).await
    }

    pub async fn overview(&self) -> ApiResult<Value> {
        self.report(AnalyticsReport::Overview, &[]).await
    }

    pub async fn revenue(&self, params: &[(&str, &str)]) -> ApiResult<Value> {
        self.report(AnalyticsReport::Revenue, params).await
    }

    pub async fn operators(&self, params: &[(&str, &str)]) -> ApiResult<Value> {
        self.report(AnalyticsReport::Operators, params).await
    }

    pub async fn technicians(&self, params: &[(&str, &str)]) -> ApiResult<Value> {
        self.report(AnalyticsReport::Technicians, params).await
    }

    pub async fn inventory(&self, params: &[(&str, &str)]) -> ApiResult<Value> {
        self.report(AnalyticsReport::Inventory, params).await
    }

    pub async fn complaints(&self, params: &[(&str, &str)]) -> ApiResult<Value> {
        self.report(AnalyticsReport::Complaints, params).await
    }

    pub async fn marketplace(&self, params: &[(&str, &str)]) -> ApiResult<Value> {
        self.report(AnalyticsReport::Marketplace, params).await
    }

    pub async fn export_report<B: Serialize + ?Sized>(&self, request: &B) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::POST, "/analytics/export", request)
            .await
    }

    pub async fn schedule_report<B: Serialize + ?Sized>(&self, request: &B) -> ApiResult<ApiResponse> {
        self.client
            .send_json(Method::POST, "/analytics/schedule", request)
            .await
    }
}
