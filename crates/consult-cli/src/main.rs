use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod profile;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full consulting roster against a project request
    Run {
        /// Project request to analyze
        request: String,

        /// Recipient email address for report delivery
        #[arg(long)]
        to: Option<String>,

        /// Recipient display name
        #[arg(long, default_value = "Valued Client")]
        client_name: String,

        /// Model identifier override
        #[arg(short, long)]
        model: Option<String>,

        /// Workspace directory override
        #[arg(long)]
        workspace: Option<String>,
    },
    /// Create or update the consult profile
    Configure,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            request,
            to,
            client_name,
            model,
            workspace,
        } => commands::run::execute(request, to, client_name, model, workspace).await,
        Command::Configure => commands::configure::execute(),
    }
}
