//! CLI for the F1 API server.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "f1-api")]
#[command(version, about = "Read-only REST API over the Formula 1 historical dataset", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
