use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

pub fn logging_stdout() -> WorkerGuard {
    let (nonblocking, guard) = tracing_appender::non_blocking(std::io::stdout());
    init(nonblocking, true);
    guard
}

/// Daily rolling `relay.log.<date>` files under `dir`.
pub fn logging_file(dir: &Path) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(dir, "relay.log");
    let (nonblocking, guard) = tracing_appender::non_blocking(appender);
    init(nonblocking, false);
    guard
}

fn init(writer: NonBlocking, ansi: bool) {
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(ansi)
                .with_file(cfg!(debug_assertions))
                .with_line_number(cfg!(debug_assertions)),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .init();
}
