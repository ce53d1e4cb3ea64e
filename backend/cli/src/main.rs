mod config_cmd;
mod extract_cmd;
mod serve_cmd;
mod status_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "attam")]
#[command(about = "Attam — trame pages and admin area server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Config file (defaults to $ATTAM_CONFIG or ./attam.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Query a running server's health endpoint
    Status {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the pieces extracted from a markdown trame
    Extract {
        path: PathBuf,
        /// Print the trame as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration with secrets masked
    Config {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, config } => serve_cmd::run(config, port).await,
        Commands::Status { port } => {
            logging::init_console_logger("warn");
            status_cmd::run(port).await
        }
        Commands::Extract { path, json } => {
            logging::init_console_logger("warn");
            extract_cmd::run(&path, json)
        }
        Commands::Config { config } => {
            logging::init_console_logger("warn");
            config_cmd::run(config).await
        }
    }
}
