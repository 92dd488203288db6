use anyhow::Result;
use clap::{Parser, Subcommand};

/// byteslide-contact - ByteSlide contact page and form relay
#[derive(Parser)]
#[command(name = "byteslide-contact")]
#[command(about = "Contact page and form-to-email relay for the ByteSlide site", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = byteslide_contact::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Initialize observability (tracing + logging)
    byteslide_contact::observability::init_observability(
        "byteslide-contact",
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => {
            // Use CLI overrides if provided, otherwise use config
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            byteslide_contact::server::serve(&config, &host, port).await
        }
    }
}
