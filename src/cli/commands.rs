use std::path::Path;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::app::{AppContext, Result};
use crate::domain::Snapshot;
use crate::server;
use crate::server::render::age;

/// Refresh in the background and serve until SIGINT/SIGTERM.
pub async fn serve(ctx: &AppContext) -> Result<()> {
    let shutdown = CancellationToken::new();

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!("Shutdown signal received");
        signal_token.cancel();
    });

    let refresher = tokio::select! {
        started = ctx.refresher().start(shutdown.clone()) => started?,
        _ = shutdown.cancelled() => return Ok(()),
    };

    let served = server::serve(ctx.store.clone(), &ctx.config.server, shutdown.clone()).await;

    shutdown.cancel();
    if let Err(e) = refresher.await {
        tracing::error!("Refresher task failed: {}", e);
    }

    served
}

/// Run the pipeline once and print the result.
pub async fn fetch(ctx: &AppContext, json: bool, output: Option<&Path>) -> Result<()> {
    let snapshot = ctx.pipeline.run().await?;

    if let Some(path) = output {
        let pretty = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, pretty)?;
        eprintln!("Wrote {} items to {}", snapshot.len(), path.display());
    }

    if json {
        println!("{}", serde_json::to_string(&snapshot)?);
    } else {
        print_table(&snapshot);
    }

    Ok(())
}

fn print_table(snapshot: &Snapshot) {
    if snapshot.is_empty() {
        println!("No items");
        return;
    }

    let now = Utc::now();
    for (rank, item) in snapshot.items.iter().enumerate() {
        let domain = item
            .domain()
            .map(|d| format!(" ({})", d))
            .unwrap_or_default();
        println!("{:>3}. {}{}", rank + 1, item.display_title(), domain);
        println!(
            "     {} points by {} {} | {} comments | {}",
            item.score,
            item.by,
            age(item.created_at, now),
            item.descendants,
            item.display_url
        );
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = sigterm.recv() => {},
                _ = tokio::signal::ctrl_c() => {},
            }
        }
        Err(e) => {
            tracing::warn!("Failed to set up SIGTERM handler: {}", e);
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(windows)]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
