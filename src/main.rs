//! Paladium - a terminal UI for the Paladium game API.

use paladium::{App, Config, Result, config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // The terminal belongs to the UI, so logs go to a file
    let log_dir = config::log_dir()?;
    std::fs::create_dir_all(&log_dir)?;
    let (writer, _guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, "paladium.log"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paladium=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    // Load configuration
    let config = Config::load_or_default()?;

    // Run the application
    let mut app = App::new(config)?;
    app.run().await?;

    Ok(())
}
