use anyhow::Result;
use clap::{Parser, Subcommand};

use codelink::config::{StaticConfig, init_config};
use codelink::runtime::modes::run_server;
use codelink::system::init_logging;

#[derive(Parser, Debug)]
#[command(name = "codelink", version, about = "In-memory URL shortener")]
struct Cli {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Write a sample configuration file
    GenConfig {
        #[arg(default_value = "config.example.toml")]
        path: String,
    },
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::GenConfig { path } => {
            StaticConfig::save_sample_config(&path)?;
            println!("Sample configuration written to {}", path);
            Ok(())
        }
        Command::Serve => {
            let config = init_config(cli.config.as_deref()).inspect_err(|e| {
                eprintln!("{}", e.format_colored());
            })?;
            let _guard = init_logging(&config.logging)?;
            run_server(&config).await
        }
    }
}
