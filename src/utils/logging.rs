use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info,habitica_rust=debug";

/// Install a console subscriber filtered by `RUST_LOG`.
///
/// Meant for binaries and examples; calling it twice is harmless.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(true),
        )
        .try_init();

    if result.is_ok() {
        tracing::debug!("Logging initialized");
    }
}
