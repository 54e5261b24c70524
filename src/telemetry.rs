//! Opt-in tracing setup for hosts embedding `festival-analytics`.
//!
//! The library only emits `tracing` events. Refresh failures and dropped
//! records are reported at `warn`, per-record skips at `debug`, so the
//! default filter keeps the log quiet unless data goes missing.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "festival_analytics=info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG` or [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive.
#[must_use]
pub fn init_tracing(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
