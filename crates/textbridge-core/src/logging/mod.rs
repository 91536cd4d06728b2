use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log directive applied when `quiet` is set.
const QUIET_DIRECTIVE: &str = "textbridge=error";

/// Log directive applied by default.
const DEFAULT_DIRECTIVE: &str = "textbridge=info";

/// Initialize logging with optional quiet mode.
///
/// When `quiet` is true, only error-level events are emitted.
/// When `quiet` is false, info-level and above events are emitted.
/// Events go to stderr as JSON so stdout stays reserved for command output.
pub fn init_logging(quiet: bool) {
    let directive = directive_for(quiet);

    let filter = match directive.parse() {
        Ok(parsed) => EnvFilter::from_default_env().add_directive(parsed),
        Err(_) => EnvFilter::from_default_env(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();
}

fn directive_for(quiet: bool) -> &'static str {
    if quiet {
        QUIET_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    }
}
