//! Issue Herald CLI entry point.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use issue_herald::cli::Cli;
use issue_herald::domain::ports::WatermarkStore;
use issue_herald::infrastructure::config::ConfigLoader;
use issue_herald::infrastructure::database::{DatabaseConnection, SqliteWatermarkStore};
use issue_herald::infrastructure::github::{GithubClient, GithubClientConfig};
use issue_herald::infrastructure::slack::SlackWebhook;
use issue_herald::services::SweepService;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ConfigLoader::load(cli.config.as_deref())?;
    if let Some(database) = cli.database {
        config.database.path = database;
        // The override lands after load() already validated, so check again.
        ConfigLoader::validate(&config)?;
    }

    // RUST_LOG wins over the configured level when set.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Fails fast, before any network or database work begins.
    let credentials = ConfigLoader::credentials()?;

    let db = DatabaseConnection::new(&config.database.url()).await?;
    db.migrate().await?;

    let store: Arc<dyn WatermarkStore> = Arc::new(SqliteWatermarkStore::new(db.pool().clone()));

    let source = Arc::new(GithubClient::new(GithubClientConfig {
        token: credentials.github_token,
        api_base: config.github.api_base.clone(),
        public_only: config.github.public_only,
        request_timeout_secs: config.github.request_timeout_secs,
        search_delay_ms: config.github.search_delay_ms,
    })?);

    let notifier = Arc::new(SlackWebhook::new(
        credentials.slack_webhook_url,
        Duration::from_secs(config.slack.request_timeout_secs),
        Arc::clone(&store),
    )?);

    let sweep = SweepService::new(
        source,
        notifier,
        Arc::clone(&store),
        config.github.org.clone(),
        config.slack.channel.clone(),
    );

    let report = sweep.run().await?;
    info!(
        total_repos = report.total_repos,
        quiet_repos = report.quiet_repos,
        issues_notified = report.issues_notified,
        "sweep complete"
    );

    db.close().await;
    Ok(())
}
