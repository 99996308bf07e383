//! Portal API surface
//!
//! Resource accessors borrowed from an [`ApiClient`]. Each accessor is a thin
//! set of wrappers: build the path, pick the verb, encode the body, and decode
//! the payload.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /auth/login`, `POST /auth/register`
//!
//! ## Accounts (admins, operators, technicians, staff, vendors, customers)
//! - `GET /admin/<role>/all`, `POST /admin/<role>/register`
//! - `GET`/`PUT`/`DELETE` per-account paths, see [`accounts`]
//!
//! ## Operations
//! - complaints: `/admin/complain/*`
//! - leave: `/leave/requests/*`
//! - inventory: `/inventory/*`, `/stock/*`
//! - orders and marketplace: `/orders`, `/order/Places`
//! - products: `/products/*`, `/inventory/stock/products`
//! - vendor catalog: `/vendor/products/*`, `/vendor/orders/*`
//! - notifications, billing, analytics
//!
//! ```rust,no_run
//! use nsportal::{ApiClient, Session};
//!
//! # async fn run(client: ApiClient) -> nsportal::ApiResult<()> {
//! for leave in client.leave().get_all().await? {
//!     println!("{:?} {:?}", leave.employee_name, leave.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod accounts;
pub mod analytics;
pub mod auth;
pub mod billing;
pub mod complaints;
pub mod inventory;
pub mod leave;
pub mod marketplace;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod vendor;

pub use accounts::{AccountRoutes, Accounts};
pub use analytics::{Analytics, AnalyticsReport};
pub use auth::{Auth, LoginError, LoginResponse};
pub use billing::Billing;
pub use complaints::Complaints;
pub use inventory::Inventory;
pub use leave::Leave;
pub use marketplace::Marketplace;
pub use notifications::Notifications;
pub use orders::Orders;
pub use products::Products;
pub use vendor::VendorCatalog;

use crate::client::ApiClient;
use crate::models::{
    AdminProfile, CustomerProfile, OperatorProfile, StaffProfile, TechnicianProfile, VendorProfile,
};

impl ApiClient {
    pub fn auth(&self) -> Auth<'_> {
        Auth::new(self)
    }

    pub fn admins(&self) -> Accounts<'_, AdminProfile> {
        Accounts::new(self, &accounts::ADMINS)
    }

    pub fn operators(&self) -> Accounts<'_, OperatorProfile> {
        Accounts::new(self, &accounts::OPERATORS)
    }

    pub fn technicians(&self) -> Accounts<'_, TechnicianProfile> {
        Accounts::new(self, &accounts::TECHNICIANS)
    }

    pub fn staff(&self) -> Accounts<'_, StaffProfile> {
        Accounts::new(self, &accounts::STAFF)
    }

    pub fn vendors(&self) -> Accounts<'_, VendorProfile> {
        Accounts::new(self, &accounts::VENDORS)
    }

    pub fn customers(&self) -> Accounts<'_, CustomerProfile> {
        Accounts::new(self, &accounts::CUSTOMERS)
    }

    pub fn complaints(&self) -> Complaints<'_> {
        Complaints::new(self)
    }

    pub fn vendor_catalog(&self) -> VendorCatalog<'_> {
        VendorCatalog::new(self)
    }

    pub fn marketplace(&self) -> Marketplace<'_> {
        Marketplace::new(self)
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders::new(self)
    }

    pub fn products(&self) -> Products<'_> {
        Products::new(self)
    }

    pub fn inventory(&self) -> Inventory<'_> {
        Inventory::new(self)
    }

    pub fn leave(&self) -> Leave<'_> {
        Leave::new(self)
    }

    pub fn notifications(&self) -> Notifications<'_> {
        Notifications::new(self)
    }

    pub fn billing(&self) -> Billing<'_> {
        Billing::new(self)
    }

    pub fn analytics(&self) -> Analytics<'_> {
        Analytics::new(self)
    }
}
