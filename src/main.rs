use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use headliner::app::AppContext;
use headliner::cli::{commands, Cli, Commands};
use headliner::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("headliner=info")))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(workers) = cli.workers {
        config.pipeline.max_concurrency = workers.max(1);
    }
    if let Commands::Serve { bind: Some(bind) } = &cli.command {
        config.server.bind = bind.clone();
    }

    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Serve { .. } => {
            commands::serve(&ctx).await?;
        }
        Commands::Fetch { json, output } => {
            commands::fetch(&ctx, json, output.as_deref()).await?;
        }
    }

    Ok(())
}
