pub mod commands;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "tesouraria")]
#[command(about = "Tesouraria CLI - administrative tooling for the treasury API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Provision the administrative or a tenant database")]
    Init {
        #[command(subcommand)]
        cmd: commands::init::InitCommands,
    },

    #[command(about = "Manage registered church accounts")]
    Cliente {
        #[command(subcommand)]
        cmd: commands::cliente::ClienteCommands,
    },

    #[command(about = "Manage tenant users")]
    Usuario {
        #[command(subcommand)]
        cmd: commands::usuario::UsuarioCommands,
    },

    #[command(about = "Manage tenant members")]
    Membro {
        #[command(subcommand)]
        cmd: commands::membro::MembroCommands,
    },

    #[command(about = "Check a running API server")]
    Ping {
        #[arg(
            long,
            default_value = "http://localhost:3000",
            help = "Base URL of the server"
        )]
        url: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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

    match cli.command {
        Commands::Init { cmd } => commands::init::handle(cmd, output_format).await,
        Commands::Cliente { cmd } => commands::cliente::handle(cmd, output_format).await,
        Commands::Usuario { cmd } => commands::usuario::handle(cmd, output_format).await,
        Commands::Membro { cmd } => commands::membro::handle(cmd, output_format).await,
        Commands::Ping { url } => commands::ping::handle(&url, output_format).await,
    }
}
