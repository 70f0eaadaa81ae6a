use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stacy", about = "Retrieval-augmented in-store shopping assistant")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the /ask HTTP API
    Serve {
        /// Address to bind (host:port)
        #[arg(long, env = "STACY_BIND", default_value = "0.0.0.0:8000")]
        bind: String,
    },
    /// Ask one question and print the response JSON
    Ask {
        query: String,
        /// Session id (defaults to a fresh UUID)
        #[arg(long)]
        session_id: Option<String>,
    },
    /// Embed the catalog and write the index and product map
    BuildIndex,
    /// Convert a retailer CSV export into a catalog JSON file
    ImportCsv {
        /// CSV export to read
        file: PathBuf,
        #[arg(long, default_value = "formatted_products.json")]
        out: PathBuf,
    },
}
