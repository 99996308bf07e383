//! # NS Portal
//!
//! Typed client for the NS ISP operations portal API: accounts for every
//! portal role, complaints, leave, inventory, the vendor marketplace,
//! orders, billing, notifications and analytics.
//!
//! ## Modules
//!
//! - [`client`]: transport, bearer auth, response envelope decoding
//! - [`session`]: token storage and expiry checks
//! - [`api`]: one accessor per resource family
//! - [`models`]: typed records
//! - [`stats`]: dashboard aggregation over fetched lists
//! - [`config`]: TOML config with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nsportal::{ApiClient, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(nsportal::DEFAULT_BASE_URL, Session::in_memory());
//!
//!     client.auth().login("admin@example.com", "secret").await?;
//!
//!     let operators = client.operators().get_all().await?;
//!     println!("{} operators", operators.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod stats;

#[cfg(test)]
mod testing;

pub use api::{LoginError, LoginResponse};
pub use client::{ApiClient, ApiResponse, Payload, RequestOptions, DEFAULT_BASE_URL};
pub use config::Config;
pub use error::{ApiError, ApiResult, ErrorKind};
pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionError, TokenStore};
pub use stats::{Dashboard, DashboardStats};
