//! Report binary entry point.

use app::config::Config;
use app::error::AppError;
use app::{Stores, build_report, render_report};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

async fn run(config: Config) -> Result<(), AppError> {
    let stores = Stores::open(&config).await?;
    let report = build_report(&stores).await?;
    println!("{}", render_report(&report)?);
    stores.close().await
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(database = %config.database_url(), "starting point-of-sale store");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "point-of-sale store failed");
        std::process::exit(1);
    }
}
