//! Tracing setup for the `sentry-stack` binary.
//!
//! Logs go to stderr. Stdout carries only program output (the commands
//! printed by `--dry-run` and the `--list-dir` report) so it can be piped
//! into a shell or a file.

use crate::config::LoggingConfig;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `config.level` when set. Calling this
/// more than once leaves the first subscriber in place.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    if config.json {
        let subscriber = builder.json().finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = builder.with_target(false).finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}
