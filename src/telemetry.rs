//! Logging setup.
//!
//! The library only emits `tracing` events. Binaries and tests install a
//! subscriber once through [`init_logging`]; `RUST_LOG` overrides the
//! default filter.

use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

static INIT: Once = Once::new();

/// Install a `fmt` subscriber filtered by `RUST_LOG`, or by
/// `default_filter` when `RUST_LOG` is unset or invalid.
///
/// Calling it again, or after another subscriber was installed, does
/// nothing.
pub fn init_logging(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = Registry::default()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr));
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging("papex_client=debug");
        init_logging("not a [valid filter");
        tracing::debug!("logging initialized");
    }
}
