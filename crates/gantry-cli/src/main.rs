//! Gantry CLI - deploy artifacts to a remote application server.

mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gantry")]
#[command(about = "Deploy artifacts to a remote application server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Connection options shared by all subcommands.
///
/// Flags override values from the configuration file and environment.
#[derive(Args)]
struct ConnectionArgs {
    /// Path to a gantry.toml configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base management URL of the admin server
    #[arg(long)]
    admin_url: Option<String>,

    /// Administrator user name
    #[arg(long)]
    username: Option<String>,

    /// Administrator password
    #[arg(long)]
    password: Option<String>,

    /// Deployment target (admin server, managed server or cluster)
    #[arg(short, long)]
    target: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy an artifact and print its connection metadata
    Deploy {
        /// Path to the packaged artifact (e.g. a .war file)
        artifact: PathBuf,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Undeploy a previously deployed artifact
    Undeploy {
        /// Path to the packaged artifact used for the deploy
        artifact: PathBuf,

        #[command(flatten)]
        connection: ConnectionArgs,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), anyhow::Error> = match cli.command {
        Commands::Deploy {
            artifact,
            connection,
        } => commands::deploy::run(&artifact, &connection).await,
        Commands::Undeploy {
            artifact,
            connection,
        } => commands::undeploy::run(&artifact, &connection).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
