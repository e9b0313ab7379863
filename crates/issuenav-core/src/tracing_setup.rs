use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::constants::LOG_FILE_ENV;

pub fn init_tracing() {
    init_tracing_with_default("info");
}

/// Install the global subscriber.
///
/// With `ISSUENAV_LOG_FILE` set, everything at DEBUG and above is appended
/// to that file. Otherwise logs go to stderr, filtered by `RUST_LOG` or
/// `default_directive`.
pub fn init_tracing_with_default(default_directive: &str) {
    let registry = tracing_subscriber::registry();

    if let Ok(log_path) = std::env::var(LOG_FILE_ENV) {
        match OpenOptions::new().create(true).append(true).open(&log_path) {
            Ok(file) => {
                let file_layer = fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true)
                    .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG);
                registry.with(file_layer).init();
                return;
            }
            Err(e) => eprintln!("Failed to open log file {}: {}", log_path, e),
        }
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    registry
        .with(fmt::layer().with_writer(std::io::stderr).with_filter(filter))
        .init();
}
