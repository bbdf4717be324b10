//! SubsFlow CLI - Seeding and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed demo accounts and plans, print resulting stats
//! sf-cli seed
//!
//! # Register an account
//! sf-cli account create -e jane@example.com -n "Jane Doe" -c secret -r user
//!
//! # Print platform stats
//! sf-cli stats
//! ```
//!
//! Configuration comes from `SUBSFLOW_*` environment variables (see
//! `subsflow_platform::config`). Set `SUBSFLOW_DATA_DIR` to persist
//! the session and notification records across runs. Simulated demo
//! latencies are zeroed for management commands.
//!
//! # Commands
//!
//! - `seed` - Seed demo data
//! - `account create` - Register accounts
//! - `stats` - Print aggregate metrics

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use subsflow_core::Role;
use subsflow_platform::config::PlatformConfig;
use subsflow_platform::error::PlatformError;
use subsflow_platform::Platform;

mod commands;

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(author, version, about = "SubsFlow CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed demo accounts and plans
    Seed,
    /// Manage accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Print aggregate platform stats
    Stats,
}

#[derive(Subcommand)]
enum AccountAction {
    /// Register a new account
    Create {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Credential for the account
        #[arg(short, long)]
        credential: String,

        /// Account role (`user`, `admin`)
        #[arg(short, long, default_value = "user")]
        role: Role,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), PlatformError> {
    let cli = Cli::parse();

    // Management commands should not wait out the demo's simulated
    // backend delays.
    let mut config = PlatformConfig::from_env()?;
    config.api_latency = std::time::Duration::ZERO;
    config.profile_latency = std::time::Duration::ZERO;
    config.sign_out_latency = std::time::Duration::ZERO;

    let platform = Platform::new(config)?;

    match cli.command {
        Commands::Seed => commands::seed::run(&platform).await,
        Commands::Account {
            action:
                AccountAction::Create {
                    email,
                    name,
                    credential,
                    role,
                },
        } => commands::account::create(&platform, &email, &name, &credential, role).await,
        Commands::Stats => commands::stats::run(&platform).await,
    }
}
