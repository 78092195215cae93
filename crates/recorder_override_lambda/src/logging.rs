use std::sync::Once;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Installs the JSON subscriber used in Lambda.
///
/// `level` is a `tracing` filter directive such as `info` or
/// `recorder_override_lambda=debug`; an invalid directive falls back to
/// `info`. Timestamps and targets are omitted because CloudWatch records
/// ingestion time per line. Subsequent calls are no-ops.
pub fn init_logging(level: &str) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_target(false)
                    .without_time(),
            )
            .init();
    });
}
