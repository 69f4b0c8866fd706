mod commands;
mod output;
mod validation;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use openstates_api::{Client, Config};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "openstates")]
#[command(about = "Query state legislative data from the Open States API")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API key (defaults to OPENSTATES_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// API root URL (defaults to OPENSTATES_API_URL or the public endpoint)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show metadata for one state
    State(commands::states::StateArgs),
    /// Show one bill and its actions
    Bill(commands::bills::BillArgs),
    /// Search bills
    Bills(commands::bills::BillsArgs),
    /// Show one legislator and their roles
    Legislator(commands::legislators::LegislatorArgs),
    /// Search legislators
    Legislators(commands::legislators::LegislatorsArgs),
    /// List legislators whose districts contain a point
    Geo(commands::legislators::GeoArgs),
    /// Show one committee and its members
    Committee(commands::committees::CommitteeArgs),
    /// Search committees
    Committees(commands::committees::CommitteesArgs),
    /// Search events
    Events(commands::events::EventsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("openstates=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let mut config = Config::from_env();
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }
    let Some(key) = cli.api_key.or(config.api_key.take()) else {
        bail!("no API key: pass --api-key or set OPENSTATES_API_KEY");
    };
    openstates_api::set_api_key(key);
    let client = Client::from_config(&config)?;

    match &cli.command {
        Commands::State(args) => commands::states::run(args, &client, &format).await?,
        Commands::Bill(args) => commands::bills::run_get(args, &client, &format).await?,
        Commands::Bills(args) => commands::bills::run_search(args, &client, &format).await?,
        Commands::Legislator(args) => {
            commands::legislators::run_get(args, &client, &format).await?
        }
        Commands::Legislators(args) => {
            commands::legislators::run_search(args, &client, &format).await?
        }
        Commands::Geo(args) => commands::legislators::run_geo(args, &client, &format).await?,
        Commands::Committee(args) => {
            commands::committees::run_get(args, &client, &format).await?
        }
        Commands::Committees(args) => {
            commands::committees::run_search(args, &client, &format).await?
        }
        Commands::Events(args) => commands::events::run(args, &client, &format).await?,
    }

    Ok(())
}
