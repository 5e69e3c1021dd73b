//! Inventory Service - operator commands for the inventory database.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventory_service_lib::config::InventoryServiceConfig;
use inventory_service_lib::export::EXPORT_FILE_NAME;
use inventory_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "inventory-service")]
#[command(about = "Inventory database maintenance")]
struct Cli {
    /// Overrides the configured database URL
    #[arg(long, global = true, env = "INVENTORY_DATABASE_URL")]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Create the default accounts if no user exists
    Seed,
    /// Export all products to an xlsx workbook
    Export {
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },
    /// List products at or below their reorder level
    LowStock,
    /// Show product count, units on hand and stock value
    Metrics,
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = InventoryServiceConfig::from_env()?;
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }

    match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            inventory_service_lib::run_migrations(&config, migrate_action).await?;
        }
        Commands::Seed => {
            let created = inventory_service_lib::run_seed(&config).await?;
            println!("Created {} account(s)", created);
        }
        Commands::Export { output } => {
            let count = inventory_service_lib::run_export(&config, &output).await?;
            println!("Exported {} product(s) to {}", count, output.display());
        }
        Commands::LowStock => {
            inventory_service_lib::run_low_stock(&config).await?;
        }
        Commands::Metrics => {
            inventory_service_lib::run_metrics(&config).await?;
        }
    }

    Ok(())
}
