//! Structured logging initialisation
//!
//! The filter comes from `RUST_LOG` when set, otherwise from
//! `LoggingConfig::level` (e.g. `"info"` or `"debug,bc_core=trace"`).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bc_shared::{LogFormat, LoggingConfig};

/// Install the global tracing subscriber
///
/// Returns an error if a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Json => registry.with(fmt::layer().json().with_target(true)).try_init()?,
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init()?,
        LogFormat::Compact => registry.with(fmt::layer().compact().with_target(true)).try_init()?,
    }
    Ok(())
}
