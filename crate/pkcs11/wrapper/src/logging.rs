use std::sync::Once;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static LOG_INIT: Once = Once::new();

/// Install the process-wide tracing subscriber once.
///
/// `default_value` is used as the filter when `RUST_LOG` is not set,
/// e.g. `"info,cosmian_pkcs11_wrapper=debug"`.
///
/// A subscriber installed earlier by the host application is kept.
pub fn log_init(default_value: &str) {
    LOG_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_value));

        let format = tracing_subscriber::fmt::layer()
            .with_level(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_file(true)
            .with_ansi(true)
            .compact();

        if let Err(e) = tracing_subscriber::registry()
            .with(filter)
            .with(format)
            .try_init()
        {
            eprintln!("Failed to initialize logging: {e}");
        }
    });
}
