use tracing_subscriber::{fmt, EnvFilter};

/// Initializes tracing for applications embedding the SDK.
///
/// The debug flag raises the SDK's own directive to `debug`; the noisy HTTP
/// internals stay at `warn`. `RUST_LOG` still overrides everything. Calling
/// this twice is a no-op.
pub fn init_tracing(debug: bool) {
    let level = if debug { "debug" } else { "info" };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "agent_functions={level},tower_http=warn,hyper=warn,reqwest=warn"
        ))
    });

    let _ = fmt().with_env_filter(env_filter).try_init();
}
