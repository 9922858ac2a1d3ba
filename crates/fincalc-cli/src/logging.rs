use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "FINCALC_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "fincalc_core=debug,fincalc=debug"
    } else {
        "warn"
    }
}

/// Install a stderr subscriber so log lines never mix with command output.
///
/// `FINCALC_LOG` wins over `--verbose` when set and parseable.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init();
}
