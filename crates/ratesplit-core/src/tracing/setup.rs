//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize a process-wide subscriber for programs embedding ratesplit.
///
/// Reads the `RATESPLIT_LOG` environment variable for per-module log levels,
/// e.g. `RATESPLIT_LOG=ratesplit_analysis=debug`. Falls back to
/// `ratesplit=info` when unset or invalid.
///
/// Idempotent, and a no-op if another subscriber is already installed.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("RATESPLIT_LOG")
            .unwrap_or_else(|_| EnvFilter::new("ratesplit=info"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
