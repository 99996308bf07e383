//! Leave requests

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::record_id;

wire_enum! {
    /// Leave request state
    pub enum LeaveStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Cancelled => "cancelled",
    }
}

/// A leave request as returned by the leave endpoints.
///
/// Dates are kept as the server's strings; they arrive both as plain
/// dates and as full timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LeaveStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LeaveRequest {
    pub fn id(&self) -> Option<&str> {
        record_id(self.id.as_ref(), &self.extra)
    }
}

/// Body for filing a leave request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLeaveRequest {
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<String>>,
}

impl NewLeaveRequest {
    /// Inclusive number of calendar days requested
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_leave_request_wire_format() {
        let request = NewLeaveRequest {
            leave_type: "sick".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 22).unwrap(),
            reason: "Fever".into(),
            documents: None,
        };

        assert_eq!(request.days(), 3);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "leaveType": "sick",
                "startDate": "2024-01-20",
                "endDate": "2024-01-22",
                "reason": "Fever"
            })
        );
    }

    #[test]
    fn test_decode_leave_request() {
        let leave: LeaveRequest = serde_json::from_value(json!({
            "_id": "LR001",
            "employeeName": "Ravi Kumar",
            "status": "approved",
            "startDate": "2024-01-20T00:00:00.000Z",
            "documents": ["medical.pdf"]
        }))
        .unwrap();

        assert_eq!(leave.id(), Some("LR001"));
        assert_eq!(leave.status, Some(LeaveStatus::Approved));
        assert_eq!(leave.documents.len(), 1);
    }
}
