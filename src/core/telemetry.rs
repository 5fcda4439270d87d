use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing for the process.
///
/// The desktop shell calls this once at startup. `RUST_LOG` wins when set;
/// `default_filter` (e.g. "gstbill=debug") is the fallback.
///
/// Returns an error string instead of panicking so a shell that initializes
/// its own subscriber first can ignore the collision.
pub fn init_tracing(default_filter: &str) -> Result<(), String> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| e.to_string())
}
