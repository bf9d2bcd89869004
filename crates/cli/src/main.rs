//! Vinayak Sweets CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! vinayak-cli migrate
//!
//! # Seed the product catalog from a YAML file
//! vinayak-cli seed -f crates/cli/seeds/products.yaml
//!
//! # Create a shop owner account
//! VINAYAK_OWNER_PASSWORD=... vinayak-cli owner create \
//!     -e owner@vinayaksweets.in -n "Vinayak Joshi" \
//!     -b "Vinayak Sweets" -p 9822012345
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the product catalog from YAML
//! - `owner create` - Create shop owner accounts

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vinayak-cli")]
#[command(author, version, about = "Vinayak Sweets CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the product catalog from a YAML file
    Seed {
        /// Path to the YAML seed file
        #[arg(short, long, default_value = "crates/cli/seeds/products.yaml")]
        file: String,
    },
    /// Manage shop owner accounts
    Owner {
        #[command(subcommand)]
        action: OwnerAction,
    },
}

#[derive(Subcommand)]
enum OwnerAction {
    /// Create a new shop owner account
    Create {
        /// Owner email address
        #[arg(short, long)]
        email: String,

        /// Owner display name
        #[arg(short, long)]
        name: String,

        /// Business name shown on the owner dashboard
        #[arg(short, long)]
        business: String,

        /// Contact phone number
        #[arg(short, long)]
        phone: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file } => commands::seed::products(&file).await?,
        Commands::Owner { action } => match action {
            OwnerAction::Create {
                email,
                name,
                business,
                phone,
            } => {
                commands::owner::create(&email, &name, &business, &phone).await?;
            }
        },
    }
    Ok(())
}
