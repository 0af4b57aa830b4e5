use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the JSON `fmt` subscriber. `RUST_LOG` wins over `log_level`.
///
/// Safe to call more than once; later calls are no-ops so test binaries can
/// initialise logging from every test.
pub fn init_tracing(service_name: &str, log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .json()
                .flatten_event(true),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(service = %service_name, "Tracing initialized");
    }
}
