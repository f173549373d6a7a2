use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use signage_blacklist::{
    blacklist::{BlacklistScope, BlacklistStore, parser::load_bulk_from_file},
    config::Config,
    telemetry,
};

/// Manage the media blacklist of a signage display
#[derive(Parser, Debug)]
#[command(name = "signage-blacklist")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Blacklist a media item and report it to the CMS
    Add {
        id: String,
        /// `single` for this display, `all` for every display
        #[arg(short, long, default_value = "single")]
        scope: BlacklistScope,
        #[arg(short, long, default_value = "")]
        reason: String,
    },
    /// Exit with status 0 if the media item is blacklisted, 1 otherwise
    Check { id: String },
    /// Blacklist every record of an XML document locally
    Import { path: PathBuf },
    /// Print all blacklisted ids
    List,
    /// Delete the blacklist
    Truncate,
}

#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let args = Args::parse();

    let config = Config::load()?;
    tracing::debug!("Loaded configuration: {:?}", config);

    let store = BlacklistStore::from_config(&config)?;

    match args.command {
        Command::Add { id, scope, reason } => {
            // Wait for the report so exiting does not cancel it
            if let Some(report) = store.add(&id, scope, &reason).await {
                if let Err(e) = report.outcome().await {
                    eprintln!("Stored locally, but the CMS was not notified: {e}");
                }
            }
        }
        Command::Check { id } => {
            let listed = store.is_blacklisted(&id).await;
            println!("{id}: {}", if listed { "blacklisted" } else { "allowed" });
            if !listed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Import { path } => {
            let items = load_bulk_from_file(&path).await?;
            let added = store.add_bulk(items).await;
            println!("Imported {added} entries from {}", path.display());
        }
        Command::List => {
            for id in store.entries().await {
                println!("{id}");
            }
        }
        Command::Truncate => store.truncate().await,
    }

    Ok(ExitCode::SUCCESS)
}
