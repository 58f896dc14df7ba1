//! Tableside binary

use clap::{Parser, Subcommand};

use tableside::{Config, logger, ui};

#[derive(Parser)]
#[command(
    name = "tableside",
    about = "Terminal client for the Tably ordering backend",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diner flow: browse the menu, build a cart, check out
    Diner {
        /// Restaurant (tenant) id
        #[arg(long, env = "TABLY_RESTAURANT_ID")]
        restaurant: String,

        /// Preselect a table number
        #[arg(long)]
        table: Option<u32>,
    },
    /// Kitchen console: live orders, availability, stock, and chat
    Kitchen {
        /// Restaurant (tenant) id
        #[arg(long, env = "TABLY_RESTAURANT_ID")]
        restaurant: String,

        /// Display name used in the staff chat
        #[arg(long, default_value = "kitchen")]
        operator: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::from_env();
    logger::init(&config.log_dir())?;
    tracing::info!(api_url = %config.api_url, "Tableside starting");

    match cli.command {
        Commands::Diner { restaurant, table } => {
            ui::diner::run(&config, &restaurant, table).await
        }
        Commands::Kitchen {
            restaurant,
            operator,
        } => ui::kitchen::run(&config, &restaurant, &operator).await,
    }
}
