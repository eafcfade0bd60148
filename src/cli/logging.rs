/// Logging setup: `tracing` events to stderr, filtered by verbosity or `RUST_LOG`.
use tracing_subscriber::EnvFilter;

/// Default filter directive for the given `-v` count and `-q` flag.
#[must_use]
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG`, when set, takes precedence.
pub fn init(verbose: u8, quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet))),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0, false), "info");
        assert_eq!(default_directive(1, false), "debug");
        assert_eq!(default_directive(5, false), "trace");
        assert_eq!(default_directive(0, true), "warn");
    }
}
