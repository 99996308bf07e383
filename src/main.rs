//! NS Portal CLI
//!
//! Command-line interface for the portal API:
//! - Log in and out, inspect the stored token
//! - List and fetch accounts, complaints, leave, orders, products
//! - Approve or reject leave requests
//! - Show the admin dashboard numbers

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nsportal::config::{generate_default_config, Config, LoggingConfig};
use nsportal::models::{Complaint, LeaveRequest, Notification, Order, StockItem, User};
use nsportal::session::token;
use nsportal::stats::{recent_operators, Dashboard, LeaveSummary};
use nsportal::ApiClient;

#[derive(Parser)]
#[command(name = "nsportal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Command-line client for the NS ISP operations portal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides config and NSPORTAL_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        email: String,
        /// Password
        #[arg(long, env = "NSPORTAL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show whether a token is held and still valid
    Token,

    /// List records of a resource
    List {
        #[arg(value_enum)]
        resource: Resource,
        /// Recipient for notifications
        #[arg(long)]
        user: Option<String>,
    },

    /// Fetch one record
    Get {
        #[arg(value_enum)]
        resource: Resource,
        id: String,
    },

    /// Decide leave requests
    Leave {
        #[command(subcommand)]
        action: LeaveAction,
    },

    /// Load the admin dashboard lists and print the numbers
    Dashboard,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum LeaveAction {
    Approve { id: String },
    Reject { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Resource {
    Admins,
    Operators,
    Technicians,
    Staff,
    Vendors,
    Customers,
    Complaints,
    Leave,
    Orders,
    Products,
    Notifications,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.client.base_url = url.clone();
    }

    init_logging(&config.logging);
    tracing::debug!(base_url = %config.client.base_url, "Using portal API");

    let client = config.client();

    match cli.command {
        Commands::Login { email, password } => {
            let password = password.context("password required: pass --password or set NSPORTAL_PASSWORD")?;
            let login = client.auth().login(&email, &password).await?;
            println!(
                "Logged in as {} ({})",
                login.user_id.as_deref().unwrap_or("unknown user"),
                login.role.map(|r| r.to_string()).unwrap_or_else(|| "unknown role".into())
            );
        }

        Commands::Logout => {
            client.auth().logout()?;
            println!("Logged out");
        }

        Commands::Token => match client.session().token() {
            None => println!("No token stored"),
            Some(t) => {
                let expiry = token::expiry(&t)
                    .and_then(|exp| chrono::DateTime::from_timestamp(exp as i64, 0))
                    .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                let state = if client.is_token_valid() { "valid" } else { "expired or unreadable" };
                println!("Token held: {}", state);
                println!("Expires: {}", expiry);
            }
        },

        Commands::List { resource, user } => list(&client, resource, user, cli.format).await?,

        Commands::Get { resource, id } => get(&client, resource, &id, cli.format).await?,

        Commands::Leave { action } => {
            let (ack, verb) = match &action {
                LeaveAction::Approve { id } => (client.leave().approve(id).await?, "approved"),
                LeaveAction::Reject { id } => (client.leave().reject(id).await?, "rejected"),
            };
            match ack.message {
                Some(message) => println!("{}", message),
                None => println!("Leave request {}", verb),
            }
        }

        Commands::Dashboard => dashboard(&client, cli.format).await?,

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nsportal={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn list(
    client: &ApiClient,
    resource: Resource,
    user: Option<String>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match resource {
        Resource::Admins => emit(&client.admins().get_all().await?, format),
        Resource::Operators => emit(&client.operators().get_all().await?, format),
        Resource::Technicians => emit(&client.technicians().get_all().await?, format),
        Resource::Staff => emit(&client.staff().get_all().await?, format),
        Resource::Vendors => emit(&client.vendors().get_all().await?, format),
        Resource::Customers => emit(&client.customers().get_all().await?, format),
        Resource::Complaints => emit(&client.complaints().get_all().await?, format),
        Resource::Leave => {
            let requests = client.leave().get_all().await?;
            emit(&requests, format)?;
            if format == OutputFormat::Table {
                let summary = LeaveSummary::from_requests(&requests);
                println!();
                println!(
                    "{} total, {} pending, {} approved, {} rejected",
                    summary.total, summary.pending, summary.approved, summary.rejected
                );
            }
            Ok(())
        }
        Resource::Orders => emit(&client.orders().get_all().await?, format),
        Resource::Products => emit(&client.products().get_all().await?, format),
        Resource::Notifications => {
            let user = user.context("--user is required to list notifications")?;
            emit(&client.notifications().get_all(&user).await?, format)
        }
    }
}

async fn get(client: &ApiClient, resource: Resource, id: &str, format: OutputFormat) -> anyhow::Result<()> {
    match resource {
        Resource::Admins => emit(&[client.admins().get(id).await?], format),
        Resource::Operators => emit(&[client.operators().get(id).await?], format),
        Resource::Technicians => emit(&[client.technicians().get(id).await?], format),
        Resource::Staff => emit(&[client.staff().get(id).await?], format),
        Resource::Vendors => emit(&[client.vendors().get(id).await?], format),
        Resource::Customers => emit(&[client.customers().get(id).await?], format),
        Resource::Orders => emit(&[client.orders().get(id).await?], format),
        Resource::Products => emit(&[client.products().get(id).await?], format),
        Resource::Complaints | Resource::Leave | Resource::Notifications => {
            bail!("get is not available for {:?}; use list", resource)
        }
    }
}

async fn dashboard(client: &ApiClient, format: OutputFormat) -> anyhow::Result<()> {
    let dashboard = Dashboard::load(client).await;
    let stats = &dashboard.stats;

    let rows: Vec<(&str, String)> = vec![
        ("operators", stats.total_operators.to_string()),
        ("active_operators", stats.active_operators.to_string()),
        ("total_revenue", format!("{:.2}", stats.total_revenue)),
        ("customers", stats.total_customers.to_string()),
        ("technicians", stats.total_technicians.to_string()),
        ("staff", stats.total_staff.to_string()),
        ("vendors", stats.total_vendors.to_string()),
        ("complaints", stats.total_complaints.to_string()),
    ];

    match format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = rows
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["stat", "value"])?;
            for (k, v) in &rows {
                writer.write_record([*k, v.as_str()])?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            for (k, v) in &rows {
                println!("{:<18} {}", k, v);
            }

            let recent = recent_operators(&dashboard.operators, 5);
            if !recent.is_empty() {
                println!();
                println!("Recent operators:");
                for op in recent {
                    println!(
                        "  {:<24} {:<24} {:<14} {}",
                        op.company_name, op.name, op.phone, op.plan_assigned
                    );
                }
            }
        }
    }

    for (name, error) in &dashboard.failures {
        eprintln!("warning: {} could not be loaded: {}", name, error);
    }

    Ok(())
}

/// A record that renders as one table or CSV row
trait Tabular {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

fn cell(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn number<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

impl Tabular for User {
    fn headers() -> &'static [&'static str] {
        &["id", "email", "role", "name", "phone", "status"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.user_id.clone(),
            self.email.clone(),
            self.role().to_string(),
            self.name().to_string(),
            self.phone().to_string(),
            cell(self.status()),
        ]
    }
}

impl Tabular for Complaint {
    fn headers() -> &'static [&'static str] {
        &["id", "title", "priority", "status", "assigned_to"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            cell(self.id()),
            cell(self.title.as_deref()),
            cell(self.priority.map(|p| p.as_str())),
            cell(self.status.as_deref()),
            cell(self.assigned_to.as_deref()),
        ]
    }
}

impl Tabular for LeaveRequest {
    fn headers() -> &'static [&'static str] {
        &["id", "employee", "role", "type", "start", "end", "status"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            cell(self.id()),
            cell(self.employee_name.as_deref()),
            cell(self.employee_role.as_deref()),
            cell(self.leave_type.as_deref()),
            cell(self.start_date.as_deref()),
            cell(self.end_date.as_deref()),
            cell(self.status.map(|s| s.as_str())),
        ]
    }
}

impl Tabular for Order {
    fn headers() -> &'static [&'static str] {
        &["id", "product", "quantity", "status", "tracking"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            cell(self.id()),
            cell(self.product_name.as_deref()),
            number(self.quantity),
            cell(self.status.as_deref()),
            cell(self.tracking_number.as_deref()),
        ]
    }
}

impl Tabular for StockItem {
    fn headers() -> &'static [&'static str] {
        &["id", "item", "quantity", "unit_price", "category", "brand"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            cell(self.id()),
            cell(self.item_name.as_deref()),
            number(self.quantity),
            number(self.unit_price),
            cell(self.category.as_deref()),
            cell(self.brand.as_deref()),
        ]
    }
}

impl Tabular for Notification {
    fn headers() -> &'static [&'static str] {
        &["id", "title", "type", "read", "created_at"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            cell(self.id()),
            cell(self.title.as_deref()),
            cell(self.kind.as_deref()),
            self.read.to_string(),
            cell(self.created_at.as_deref()),
        ]
    }
}

fn emit<T: Tabular + Serialize>(items: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(T::headers())?;
            for item in items {
                writer.write_record(item.row())?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => print_table(items),
    }
    Ok(())
}

fn print_table<T: Tabular>(items: &[T]) {
    if items.is_empty() {
        println!("No records");
        return;
    }

    let headers = T::headers();
    let rows: Vec<Vec<String>> = items.iter().map(Tabular::row).collect();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
                .min(32)
        })
        .collect();

    let line = |cells: Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", truncate(c, *w), width = w))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    println!("{}", line(headers.iter().map(|h| h.to_string()).collect()));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 3 * (widths.len() - 1)));
    for row in rows {
        println!("{}", line(row));
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}
