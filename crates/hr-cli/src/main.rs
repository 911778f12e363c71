//! `hr`: command-line client for the HR Suite API

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hr_client::{ApiClient, EmployeeStore, PayrollStore, ReviewStore};
use hr_contracts::{NewPayrollPayload, NewReviewPayload, ReviewUpdatePayload};
use hr_core::config::{AppConfig, ClientConfig};
use hr_core::traits::Id;
use hr_models::{PayrollFilter, PayrollInputs, ReviewFilter, ReviewState};
use tracing_subscriber::EnvFilter;

mod render;

/// HR Suite: employees, performance reviews and payroll
#[derive(Parser, Debug)]
#[command(name = "hr")]
#[command(about = "Command-line client for the HR Suite API", long_about = None)]
struct Cli {
    /// API base URL (falls back to HR_API_URL, then http://localhost:8080)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage employees
    #[command(subcommand)]
    Employees(EmployeeCommand),
    /// Manage performance reviews
    #[command(subcommand)]
    Reviews(ReviewCommand),
    /// Record and list payroll
    #[command(subcommand)]
    Payroll(PayrollCommand),
}

#[derive(Subcommand, Debug)]
enum EmployeeCommand {
    /// List all employees
    List,
    /// Create an employee
    Add { name: String },
    /// Rename an employee
    Rename { id: Id, name: String },
    /// Delete an employee and everything recorded for them
    Remove { id: Id },
}

#[derive(Subcommand, Debug)]
enum ReviewCommand {
    /// List reviews with per-employee averages
    List {
        #[arg(long)]
        employee: Option<Id>,
        #[arg(long)]
        period: Option<String>,
        /// draft, submitted or approved
        #[arg(long)]
        state: Option<ReviewState>,
    },
    /// Create a draft review
    Add {
        #[arg(long)]
        employee: Id,
        #[arg(long)]
        period: String,
        #[arg(long)]
        reviewer: String,
        /// 1 to 5
        #[arg(long, allow_negative_numbers = true)]
        rating: i32,
        #[arg(long, default_value = "")]
        strengths: String,
        #[arg(long, default_value = "")]
        opportunities: String,
    },
    /// Change review fields; the state is left alone
    Edit {
        id: Id,
        #[arg(long)]
        reviewer: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        rating: Option<i32>,
        #[arg(long)]
        strengths: Option<String>,
        #[arg(long)]
        opportunities: Option<String>,
    },
    /// Move a review to its next state (draft -> submitted -> approved)
    Advance { id: Id },
}

#[derive(Subcommand, Debug)]
enum PayrollCommand {
    /// List payroll records with totals per period
    List {
        #[arg(long)]
        employee: Option<Id>,
        #[arg(long)]
        period: Option<String>,
    },
    /// Record a payroll entry; net pay is computed by the server
    Add {
        #[arg(long)]
        employee: Id,
        #[arg(long)]
        period: String,
        #[arg(long, allow_negative_numbers = true)]
        base_salary: f64,
        #[arg(long, default_value_t = 0.0)]
        overtime_hours: f64,
        #[arg(long, default_value_t = 0.0)]
        overtime_rate: f64,
        #[arg(long, default_value_t = 0.0)]
        bonuses: f64,
        #[arg(long, default_value_t = 0.0)]
        deductions: f64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = client_config(|key| std::env::var(key).ok(), cli.api_url);
    let client = ApiClient::new(&config)?;
    tracing::debug!(base_url = client.base_url(), "Using API");

    match cli.command {
        Commands::Employees(cmd) => employees(client, cmd).await,
        Commands::Reviews(cmd) => reviews(client, cmd).await,
        Commands::Payroll(cmd) => payroll(client, cmd).await,
    }
}

/// Client settings from the environment; unparsable server settings
/// fall back to defaults with a warning
fn client_config<F>(lookup: F, api_url: Option<String>) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = AppConfig::from_lookup(lookup)
        .map(|c| c.client)
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to load config from env: {}, using defaults", e);
            AppConfig::default().client
        });
    if api_url.is_some() {
        config.api_url = api_url;
    }
    config
}

async fn employees(client: ApiClient, cmd: EmployeeCommand) -> Result<()> {
    let mut store = EmployeeStore::new(client);

    match cmd {
        EmployeeCommand::List => {
            for e in store.refresh().await? {
                println!("{}", render::employee(e));
            }
        }
        EmployeeCommand::Add { name } => {
            let created = store.create(&name).await?;
            println!("{}", render::employee(&created));
        }
        EmployeeCommand::Rename { id, name } => {
            let updated = store.rename(id, &name).await?;
            println!("{}", render::employee(&updated));
        }
        EmployeeCommand::Remove { id } => {
            store.remove(id).await?;
            println!("removed {}", id);
        }
    }
    Ok(())
}

async fn reviews(client: ApiClient, cmd: ReviewCommand) -> Result<()> {
    match cmd {
        ReviewCommand::List {
            employee,
            period,
            state,
        } => {
            let filter = ReviewFilter {
                employee_id: employee,
                period,
                state,
            };
            let mut store = ReviewStore::with_filter(client, filter);
            store.refresh().await?;

            for r in store.items() {
                println!("{}", render::review(r));
            }
            if !store.aggregates().is_empty() {
                println!();
                for a in store.aggregates() {
                    println!("{}", render::review_aggregate(a));
                }
            }
        }
        ReviewCommand::Add {
            employee,
            period,
            reviewer,
            rating,
            strengths,
            opportunities,
        } => {
            let mut store = ReviewStore::new(client);
            let created = store
                .create(&NewReviewPayload {
                    employee_id: employee,
                    period,
                    reviewer,
                    rating,
                    strengths,
                    opportunities,
                })
                .await?;
            println!("{}", render::review(&created));
        }
        ReviewCommand::Edit {
            id,
            reviewer,
            rating,
            strengths,
            opportunities,
        } => {
            let payload = ReviewUpdatePayload {
                reviewer,
                rating,
                strengths,
                opportunities,
            };
            let mut store = ReviewStore::new(client);
            let updated = store.edit(id, &payload).await?;
            println!("{}", render::review(&updated));
        }
        ReviewCommand::Advance { id } => {
            let mut store = ReviewStore::new(client);
            let advanced = store.advance(id).await?;
            println!("{}", render::review(&advanced));
        }
    }
    Ok(())
}

async fn payroll(client: ApiClient, cmd: PayrollCommand) -> Result<()> {
    match cmd {
        PayrollCommand::List { employee, period } => {
            let filter = PayrollFilter {
                employee_id: employee,
                period,
            };
            let mut store = PayrollStore::with_filter(client, filter);
            store.refresh().await?;

            for p in store.items() {
                println!("{}", render::payroll_record(p));
            }
            println!();
            for line in render::payroll_totals(store.aggregates()) {
                println!("{}", line);
            }
        }
        PayrollCommand::Add {
            employee,
            period,
            base_salary,
            overtime_hours,
            overtime_rate,
            bonuses,
            deductions,
        } => {
            let inputs = PayrollInputs {
                base_salary,
                overtime_hours,
                overtime_rate,
                bonuses,
                deductions,
            };
            let mut store = PayrollStore::new(client);
            let created = store
                .create(&NewPayrollPayload::new(employee, period, inputs))
                .await?;
            println!("{}", render::payroll_record(&created));
        }
    }
    Ok(())
}
