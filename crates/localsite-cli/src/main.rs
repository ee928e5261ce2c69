mod locations;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "localsite")]
#[command(about = "Suburb link lists for generated local-service sites")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the footer suburb links (the default)
    Footer,
    /// Print every suburb inside the service radius
    Areas,
    /// Print the suburbs nearest to one suburb
    Related {
        /// Suburb name, matched loosely against the catalogue
        #[arg(long)]
        suburb: String,
        /// Number of neighbours to list
        #[arg(long, default_value = "6")]
        limit: usize,
    },
    /// Validate config and catalogue and print a summary
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let config = localsite_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let site = locations::SiteData::load(config)?;

    match cli.command.unwrap_or(Commands::Footer) {
        Commands::Footer => locations::run_footer(&site)?,
        Commands::Areas => locations::run_areas(&site)?,
        Commands::Related { suburb, limit } => locations::run_related(&site, &suburb, limit)?,
        Commands::Check => locations::run_check(&site)?,
    }

    Ok(())
}
