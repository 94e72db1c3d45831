pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "docvault-api")]
#[command(about = "DocVault API - owner-scoped document retrieval and deletion")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides DOCVAULT_API_PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Create the document tables if they are missing")]
    Migrate,

    #[command(about = "Issue a session token for a user")]
    Token {
        #[arg(long, help = "User ID the token authenticates")]
        user: uuid::Uuid,
        #[arg(long, help = "Email carried in the token claims")]
        email: Option<String>,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = crate::config::config();

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => commands::serve::handle(config, port).await,
        Commands::Migrate => commands::migrate::handle(config).await,
        Commands::Token { user, email } => commands::token::handle(config, user, email, output_format),
    }
}
