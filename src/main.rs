// freshbi - terminal BI dashboard for fresh-grocery e-commerce
//
// Single-screen operator dashboard: headline metrics, channel funnels,
// category breakdowns, refund analytics (all synthesized locally), plus
// a streaming Gemini-backed analyst chat.

mod chat;
mod cli;
mod config;
mod data;
mod logging;
mod pager;
mod theme;
mod tui;

use anyhow::Result;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Wire up tracing. Every path installs the TUI buffer layer (stdout
/// would garble the alternate screen); file logging adds a non-blocking
/// JSON writer on top. The returned guard must outlive the program or
/// buffered file logs are lost.
fn init_tracing(config: &Config, buffer: &LogBuffer) -> Option<WorkerGuard> {
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("freshbi={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let base = tracing_subscriber::registry()
        .with(filter)
        .with(TuiLogLayer::new(buffer.clone()));

    if !config.logging.file_enabled {
        base.init();
        return None;
    }

    let dir = &config.logging.file_dir;
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("Warning: could not create log directory {:?}: {}", dir, e);
        base.init();
        return None;
    }

    let prefix = &config.logging.file_prefix;
    let appender = match config.logging.file_rotation {
        LogRotation::Hourly => tracing_appender::rolling::hourly(dir, prefix),
        LogRotation::Daily => tracing_appender::rolling::daily(dir, prefix),
        LogRotation::Never => tracing_appender::rolling::never(dir, prefix),
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    base.with(
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false),
    )
    .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Config subcommands (--show, --reset, --edit, --path) short-circuit
    if cli::handle_cli() {
        return Ok(());
    }

    // Write the commented template on first run so options are discoverable
    Config::ensure_config_exists();

    let config = Config::from_env();
    let log_buffer = LogBuffer::new();
    let _file_guard = init_tracing(&config, &log_buffer);

    tracing::info!(
        "starting freshbi v{} (model: {}, chat {})",
        config::VERSION,
        config.model,
        if config.api_key.is_some() {
            "enabled"
        } else {
            "disabled - no credential"
        }
    );

    tui::run_tui(config, log_buffer).await
}
