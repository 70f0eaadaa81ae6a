use clap::Parser;
use stacy::application::build_index::BuildIndexUseCase;
use stacy::cli::commands::{Cli, Commands};
use stacy::config::{load_env, Config};
use stacy::domain::entities::query::UserQuery;
use stacy::infrastructure::catalog::csv_import::import_csv;
use stacy::infrastructure::catalog::json_catalog::JsonCatalog;
use stacy::infrastructure::http::server;
use stacy::Stacy;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // `.env` first so a RUST_LOG set there reaches the filter.
    let env_file = match load_env() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stacy=info,tower_http=info")))
        .init();
    if let Some(path) = env_file {
        tracing::info!("Loaded environment from {}", path.display());
    }

    let cli = Cli::parse();
    if let Err(e) = run_command(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Serve { bind } => {
            let addr: SocketAddr = bind
                .parse()
                .map_err(|e| format!("invalid bind address {bind}: {e}"))?;
            let config = Config::from_env()?;
            let stacy = Arc::new(Stacy::from_config(&config)?);
            server::serve(stacy, addr).await?;
        }
        Commands::Ask { query, session_id } => {
            let config = Config::from_env()?;
            let stacy = Stacy::from_config(&config)?;
            let session_id = session_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let response = stacy.ask(&UserQuery::new(query, session_id)).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::BuildIndex => {
            let config = Config::from_env()?;
            let catalog = JsonCatalog::load(&config.catalog_path)?;
            let uc = BuildIndexUseCase::new(Arc::new(catalog), config.build_embedder()?);
            let report = uc.execute(&config.index_path, &config.map_path).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::ImportCsv { file, out } => {
            let reader = std::fs::File::open(&file)
                .map_err(|e| format!("cannot open {}: {e}", file.display()))?;
            let (products, report) = import_csv(reader)?;
            JsonCatalog::save(&products, &out)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            println!("Saved {} products to {}", products.len(), out.display());
        }
    }
    Ok(())
}
