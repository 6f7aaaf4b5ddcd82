//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::GlobalArgs;

/// Returns the filter directive forced by `--quiet` or `--verbose`, if any.
fn forced_directive(quiet: bool, verbose: bool) -> Option<&'static str> {
    if quiet {
        Some("error")
    } else if verbose {
        Some("debug")
    } else {
        None
    }
}

/// Builds the filter: CLI flags first, then `RUST_LOG`, then the
/// configuration's `log.level`.
fn build_filter(global: &GlobalArgs) -> EnvFilter {
    match forced_directive(global.quiet, global.verbose) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&global.config.log.level)),
    }
}

/// Installs a stderr subscriber. A second call is a no-op.
pub fn init(global: &GlobalArgs) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(global))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
