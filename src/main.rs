//! Paydesk main entry point

use anyhow::Context;
use clap::Parser;
use paydesk_api::start_server;
use paydesk_config::{Config, ConfigError};
use paydesk_core::seed::seed_demo;
use paydesk_core::{db, AccountService, PaymentService};
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "paydesk")]
#[command(author = "Paydesk Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Back-office admin for accounts and their payments", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Fill the database with demo accounts and payments before serving
    #[arg(long)]
    seed: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, missing_config) = match Config::load(&args.config) {
        Ok(config) => (config, false),
        Err(ConfigError::FileNotFound { .. }) => (Config::default(), true),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load {}", args.config.display()))
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.clone()),
    )
    .init();

    if missing_config {
        log::warn!(
            "Config file {} not found, using defaults",
            args.config.display()
        );
    } else {
        log::info!("Config loaded from {}", args.config.display());
    }

    let rt = Runtime::new()?;
    rt.block_on(async {
        log::info!("Opening database {}", config.database.url);
        let connection = db::open(&config.database)
            .await
            .context("Failed to open database")?;

        if args.seed {
            let accounts = AccountService::new(connection.clone());
            let payments = PaymentService::new(connection.clone());
            seed_demo(&accounts, &payments)
                .await
                .context("Failed to seed demo data")?;
        }

        start_server(config, connection).await
    })
}
