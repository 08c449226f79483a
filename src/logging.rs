use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogConfig;

/// Environment variable that overrides `log.file`.
pub const LOG_FILE_ENV: &str = "SCREENSTORE_LOG";

/// Initialize tracing.
///
/// The filter comes from `RUST_LOG` when set, else from `config.filter`.
/// Output goes to stderr unless a log file is configured, in which case the
/// file is created as `{path}.{timestamp}.{pid}` so concurrent runs never
/// share one.
pub fn init_tracing(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let log_path = std::env::var(LOG_FILE_ENV)
        .ok()
        .map(std::path::PathBuf::from)
        .or_else(|| config.file.clone());

    let Some(log_path) = log_path else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_timer(fmt::time::UtcTime::rfc_3339()),
            )
            .init();
        return;
    };

    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let unique_path = format!("{}.{}.{}", log_path.display(), timestamp, pid);

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}
