use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with optional verbose mode.
///
/// When `verbose` is true, info-level and above events are emitted.
/// When `verbose` is false, only warning and error events are emitted
/// (default), so a normal run prints the resources being deleted and
/// nothing else.
pub fn init_logging(verbose: bool) {
    let directive = if verbose { "scour=info" } else { "scour=warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(
            EnvFilter::from_default_env()
                .add_directive(directive.parse().expect("Invalid log directive")),
        )
        .init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_init_logging() {
        // Can only install a global subscriber once per process, so the
        // actual initialization is exercised by the CLI integration tests.
    }
}
