//! CLI administration tool for shortkey.
//!
//! Works directly against the configured database, so mappings can be created,
//! inspected and deactivated without the HTTP server running.
//!
//! # Usage
//!
//! ```bash
//! # Create a mapping
//! cargo run --bin admin -- create https://example.com
//!
//! # Inspect a mapping by its secret key
//! cargo run --bin admin -- info X7K2Q_4MZ81PQA
//!
//! # Deactivate a mapping
//! cargo run --bin admin -- deactivate X7K2Q_4MZ81PQA
//!
//! # Print random keys without touching the database
//! cargo run --bin admin -- keygen --length 8 --count 3
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `shortkey::config`.

use shortkey::application::services::{KeyPolicy, MappingService};
use shortkey::config::{self, Config, mask_connection_string};
use shortkey::domain::entities::Mapping;
use shortkey::domain::repositories::MappingRepository;
use shortkey::infrastructure::persistence::connect_repository;
use shortkey::utils::key_generator::generate_random_key;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

type Service = MappingService<dyn MappingRepository>;

/// CLI tool for managing shortkey mappings.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a mapping for a target URL
    Create {
        /// Target URL (http or https)
        target_url: String,
    },

    /// Show a mapping by its secret key
    Info {
        secret_key: String,
    },

    /// Deactivate a mapping by its secret key
    Deactivate {
        secret_key: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print random keys (no database access)
    Keygen {
        /// Key length (defaults to KEY_LENGTH)
        #[arg(short, long)]
        length: Option<usize>,

        /// Number of keys to print
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Create { target_url } => {
            create(&connect(&config).await?, &config, &target_url).await?
        }
        Commands::Info { secret_key } => {
            info(&connect(&config).await?, &config, &secret_key).await?
        }
        Commands::Deactivate { secret_key, yes } => {
            deactivate(&connect(&config).await?, &secret_key, yes).await?
        }
        Commands::Keygen { length, count } => {
            keygen(length.unwrap_or(config.key_length), count)?
        }
        Commands::Stats => stats(&connect(&config).await?).await?,
        Commands::Db { action } => {
            handle_db_action(action, &connect(&config).await?, &config).await?
        }
    }

    Ok(())
}

/// Connects to the configured database and applies migrations.
async fn connect(config: &Config) -> Result<Service> {
    let repository = connect_repository(config)
        .await
        .context("Failed to connect to database")?;

    Ok(Service::new(repository, KeyPolicy::from_config(config)))
}

/// Creates a mapping and prints both keys.
///
/// The secret key is shown once here; it is the only handle for later
/// inspection or deactivation.
async fn create(service: &Service, config: &Config, target_url: &str) -> Result<()> {
    println!("{}", "🔗 Create Mapping".bright_blue().bold());
    println!();

    let mapping = service
        .create(target_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create mapping: {}", e))?;

    print_mapping(&mapping, config);
    println!(
        "{}",
        "⚠️  Keep the secret key: it is required to inspect or delete this URL."
            .yellow()
            .bold()
    );
    println!();

    Ok(())
}

/// Prints an active mapping found by secret key.
async fn info(service: &Service, config: &Config, secret_key: &str) -> Result<()> {
    let mapping = service
        .find_by_secret(secret_key)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("No active mapping for this secret key")?;

    println!("{}", "ℹ️  Mapping".bright_blue().bold());
    println!();
    print_mapping(&mapping, config);

    Ok(())
}

/// Deactivates a mapping after confirmation.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes`
/// - Deactivated keys are never reissued
async fn deactivate(service: &Service, secret_key: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Deactivate Mapping".bright_blue().bold());
    println!();

    let mapping = service
        .find_by_secret(secret_key)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("No active mapping for this secret key")?;

    println!("  Key:    {}", mapping.key.cyan());
    println!("  Target: {}", mapping.target_url.bright_white());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Deactivate this mapping?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deactivated = service
        .deactivate(secret_key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to deactivate mapping: {}", e))?;

    match deactivated {
        Some(mapping) => {
            println!(
                "{} {}",
                "✅ Successfully deleted shortened URL for".green().bold(),
                mapping.target_url.bright_white()
            );
        }
        None => println!("{}", "⚠️  Mapping was already deactivated".yellow()),
    }
    println!();

    Ok(())
}

/// Prints random keys drawn from the key alphabet.
fn keygen(length: usize, count: usize) -> Result<()> {
    anyhow::ensure!(length > 0, "Key length must be at least 1");

    for _ in 0..count {
        println!("{}", generate_random_key(length).bright_yellow());
    }

    Ok(())
}

/// Displays mapping counts.
async fn stats(service: &Service) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let total = service
        .count(false)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;
    let active = service
        .count(true)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!(
        "  Mappings: {}",
        total.to_string().bright_green().bold()
    );
    println!(
        "  Active:   {}",
        active.to_string().bright_green().bold()
    );
    println!(
        "  Inactive: {}",
        (total - active).to_string().bright_black()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, service: &Service, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!(
                "{} {}",
                "🔍 Checking database connection...".bright_blue(),
                mask_connection_string(&config.database_url).bright_black()
            );

            service
                .health_check()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}

fn print_mapping(mapping: &Mapping, config: &Config) {
    let base = config.base_url.trim_end_matches('/');
    let status = if mapping.is_active() {
        "ACTIVE".green()
    } else {
        "INACTIVE".red()
    };

    println!("  Target:     {}", mapping.target_url.bright_white());
    println!("  Key:        {}", mapping.key.cyan());
    println!("  Secret key: {}", mapping.secret_key.bright_yellow().bold());
    println!("  Short URL:  {}/{}", base, mapping.key);
    println!("  Admin URL:  {}/admin/{}", base, mapping.secret_key);
    println!("  Clicks:     {}", mapping.clicks.to_string().bright_green());
    println!("  Status:     {}", status);
    println!();
}
