//! Logging setup
//!
//! Installs the global subscriber with a console layer and a persistent
//! log file, so every capture run leaves a record in `pageshot.log`.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// File name of the persistent log, written into the configured log dir
const LOG_FILE: &str = "pageshot.log";

/// Initialize the global logger.
///
/// If RUST_LOG is set, it is used directly; otherwise the pageshot crates
/// log at the requested level with noisy dependencies held at warn.
pub fn init(level: &str, format: &str, log_dir: &Path) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::try_from_default_env().expect("Invalid RUST_LOG environment variable")
    } else {
        EnvFilter::new(format!(
            "pageshot_cli={level},\
             pageshot_capture={level},\
             headless_chrome=warn,\
             tungstenite=warn,\
             hyper=warn,\
             reqwest=warn,\
             rustls=warn",
            level = level
        ))
    };

    let console_layer = match format {
        "full" => fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
        _ => fmt::layer() // "compact" or any other value
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
    };

    // Single non-rotating file alongside the console output
    let file_appender = RollingFileAppender::new(Rotation::NEVER, log_dir, LOG_FILE);
    let file_layer = fmt::layer().with_writer(file_appender).with_ansi(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
