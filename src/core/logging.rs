//! Tracing subscriber setup for the binary

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::config::LogFormat;

/// Environment variable holding a full tracing filter directive
pub const LOG_ENV: &str = "MTRACK_LOG";

/// Build the filter: `MTRACK_LOG` wins, then `debug` when verbose, then the
/// configured level
pub fn filter(configured: &str, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { configured };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    })
}

/// Install the global subscriber, writing to stderr so command output on
/// stdout stays machine-readable. A second call is a no-op.
pub fn init(configured: &str, format: LogFormat, verbose: bool) {
    let env_filter = filter(configured, verbose);

    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
