//! Derived numbers for the portal dashboards.
//!
//! Everything here is computed client-side from fetched lists. [`Dashboard::load`]
//! is the only async entry point; the rest are pure functions over records.

use std::collections::BTreeMap;

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Address, Complaint, LeaveRequest, LeaveStatus, Profile, Role, Settlement, SettlementStatus, User,
};

/// Headline counts for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_operators: usize,
    pub active_operators: usize,
    pub total_revenue: f64,
    pub total_customers: usize,
    pub total_technicians: usize,
    pub total_staff: usize,
    pub total_vendors: usize,
    pub total_complaints: usize,
}

impl DashboardStats {
    /// An operator counts as active when `Permissions.status` is `active`
    /// or its role is operator. Revenue sums operator profile revenue, a
    /// missing value counting as zero.
    pub fn from_lists(
        operators: &[User],
        technicians: &[User],
        staff: &[User],
        vendors: &[User],
        customers: &[User],
        complaints: &[Complaint],
    ) -> Self {
        let active_operators = operators
            .iter()
            .filter(|u| u.status() == Some("active") || u.role() == Role::Operator)
            .count();
        let total_revenue = operators
            .iter()
            .map(|u| u.profile.revenue().unwrap_or(0.0))
            .sum();

        Self {
            total_operators: operators.len(),
            active_operators,
            total_revenue,
            total_customers: customers.len(),
            total_technicians: technicians.len(),
            total_staff: staff.len(),
            total_vendors: vendors.len(),
            total_complaints: complaints.len(),
        }
    }
}

/// Lists behind the admin dashboard, loaded together
#[derive(Debug, Default)]
pub struct Dashboard {
    pub operators: Vec<User>,
    pub technicians: Vec<User>,
    pub staff: Vec<User>,
    pub vendors: Vec<User>,
    pub customers: Vec<User>,
    pub complaints: Vec<Complaint>,
    pub stats: DashboardStats,
    /// Lists that failed to load, by name; those lists are empty
    pub failures: Vec<(&'static str, ApiError)>,
}

impl Dashboard {
    /// Fetch the six dashboard lists concurrently.
    ///
    /// Each list fails independently: a failed fetch leaves that list empty,
    /// is logged, and is recorded in `failures`. This never returns an error.
    pub async fn load(client: &ApiClient) -> Self {
        let (operators, technicians, staff, vendors, customers, complaints) = (
            client.operators(),
            client.technicians(),
            client.staff(),
            client.vendors(),
            client.customers(),
            client.complaints(),
        );
        let (operators, technicians, staff, vendors, customers, complaints) = tokio::join!(
            operators.get_all(),
            technicians.get_all(),
            staff.get_all(),
            vendors.get_all(),
            customers.get_all(),
            complaints.get_all(),
        );

        let mut failures = Vec::new();
        let operators = settle("operators", operators, &mut failures);
        let technicians = settle("technicians", technicians, &mut failures);
        let staff = settle("staff", staff, &mut failures);
        let vendors = settle("vendors", vendors, &mut failures);
        let customers = settle("customers", customers, &mut failures);
        let complaints = settle("complaints", complaints, &mut failures);

        let stats = DashboardStats::from_lists(
            &operators,
            &technicians,
            &staff,
            &vendors,
            &customers,
            &complaints,
        );
        tracing::debug!(
            operators = stats.total_operators,
            customers = stats.total_customers,
            failed = failures.len(),
            "Dashboard loaded"
        );

        Self {
            operators,
            technicians,
            staff,
            vendors,
            customers,
            complaints,
            stats,
            failures,
        }
    }

    /// True when every list loaded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

fn settle<T>(
    name: &'static str,
    result: ApiResult<Vec<T>>,
    failures: &mut Vec<(&'static str, ApiError)>,
) -> Vec<T> {
    match result {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(list = name, error_kind = %e.kind(), "Dashboard list failed to load: {}", e);
            failures.push((name, e));
            Vec::new()
        }
    }
}

/// Operator card on the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct RecentOperator {
    pub user_id: String,
    pub name: String,
    pub company_name: String,
    pub phone: String,
    pub address: Address,
    pub plan_assigned: String,
    pub revenue: f64,
    pub customer_count: u64,
}

impl RecentOperator {
    fn from_user(user: &User) -> Self {
        let name = non_empty(user.name()).unwrap_or("Unknown").to_string();
        let company_name = user
            .profile
            .company_name()
            .or_else(|| non_empty(user.name()))
            .unwrap_or("Unknown Company")
            .to_string();
        let phone = non_empty(user.phone()).unwrap_or("N/A").to_string();

        let (address, plan_assigned, customer_count) = match &user.profile {
            Profile::Operator(op) => (
                op.address.clone(),
                op.plan_assigned.clone(),
                op.customer_count,
            ),
            _ => (None, None, None),
        };

        Self {
            user_id: user.user_id.clone(),
            name,
            company_name,
            phone,
            address: address.unwrap_or_else(|| Address {
                state: "N/A".into(),
                district: "N/A".into(),
                area: "N/A".into(),
            }),
            plan_assigned: plan_assigned.unwrap_or_else(|| "Basic".into()),
            revenue: user.profile.revenue().unwrap_or(0.0),
            customer_count: customer_count.unwrap_or(0),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// The `n` most recently created operators, newest first. Records without
/// `createdAt` sort last.
pub fn recent_operators(operators: &[User], n: usize) -> Vec<RecentOperator> {
    let mut sorted: Vec<&User> = operators.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
        .into_iter()
        .take(n)
        .map(RecentOperator::from_user)
        .collect()
}

/// Leave request counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaveSummary {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl LeaveSummary {
    pub fn from_requests(requests: &[LeaveRequest]) -> Self {
        requests.iter().fold(
            Self {
                total: requests.len(),
                ..Default::default()
            },
            |mut summary, request| {
                match request.status {
                    Some(LeaveStatus::Pending) => summary.pending += 1,
                    Some(LeaveStatus::Approved) => summary.approved += 1,
                    Some(LeaveStatus::Rejected) => summary.rejected += 1,
                    _ => {}
                }
                summary
            },
        )
    }
}

/// Leave list filter. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaveFilter {
    /// Case-insensitive substring of the employee name or request id
    pub search: Option<String>,
    pub status: Option<LeaveStatus>,
    /// Matched against `employeeRole`
    pub role: Option<Role>,
}

impl LeaveFilter {
    pub fn matches(&self, request: &LeaveRequest) -> bool {
        let matches_search = match &self.search {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                let hit = |field: Option<&str>| {
                    field.map_or(false, |f| f.to_lowercase().contains(&term))
                };
                hit(request.employee_name.as_deref()) || hit(request.id())
            }
        };
        let matches_status = self.status.map_or(true, |s| request.status == Some(s));
        let matches_role = self.role.map_or(true, |role| {
            request
                .employee_role
                .as_deref()
                .map_or(false, |r| r.eq_ignore_ascii_case(role.as_str()))
        });

        matches_search && matches_status && matches_role
    }

    pub fn apply<'r>(&self, requests: &'r [LeaveRequest]) -> Vec<&'r LeaveRequest> {
        requests.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Vendor payout totals
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SettlementSummary {
    /// Net amount of settlements still pending
    pub pending_amount: f64,
    /// Net amount of settlements paid out
    pub paid_amount: f64,
    /// Commission across all settlements
    pub total_commission: f64,
}

impl SettlementSummary {
    pub fn from_settlements(settlements: &[Settlement]) -> Self {
        settlements.iter().fold(Self::default(), |mut summary, s| {
            match s.status {
                Some(SettlementStatus::Pending) => summary.pending_amount += s.net_amount,
                Some(SettlementStatus::Paid) => summary.paid_amount += s.net_amount,
                _ => {}
            }
            summary.total_commission += s.commission;
            summary
        })
    }
}

/// Complaint counts keyed by status and by priority
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintSummary {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<String, usize>,
}

impl ComplaintSummary {
    /// Complaints without a status or priority are counted as `unknown`
    pub fn from_complaints(complaints: &[Complaint]) -> Self {
        let mut summary = Self {
            total: complaints.len(),
            ..Default::default()
        };
        for complaint in complaints {
            let status = complaint.status.as_deref().unwrap_or("unknown").to_lowercase();
            *summary.by_status.entry(status).or_insert(0) += 1;

            let priority = complaint.priority.map_or("unknown", |p| p.as_str());
            *summary.by_priority.entry(priority.to_string()).or_insert(0) += 1;
        }
        summary
    }

    pub fn count_status(&self, status: &str) -> usize {
        self.by_status.get(&status.to_lowercase()).copied().unwrap_or(0)
    }
}
