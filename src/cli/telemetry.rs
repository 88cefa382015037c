//! Tracing setup shared by the server binary and the CLI.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Map `-v` occurrences to a default tracing level.
const fn level_for(verbosity: u8) -> tracing::Level {
    match verbosity {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity-derived default directive.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init(verbosity: u8) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(false);

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_for(verbosity).into())
        .from_env_lossy();

    let subscriber = Registry::default().with(fmt_layer).with(env_filter);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_for_maps_counts() {
        assert_eq!(level_for(0), tracing::Level::ERROR);
        assert_eq!(level_for(1), tracing::Level::WARN);
        assert_eq!(level_for(2), tracing::Level::INFO);
        assert_eq!(level_for(3), tracing::Level::DEBUG);
        assert_eq!(level_for(4), tracing::Level::TRACE);
        assert_eq!(level_for(42), tracing::Level::TRACE);
    }
}
