use std::path::Path;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install the global subscriber once.
///
/// Without a log directory, human-readable events go to stderr filtered by
/// `RUST_LOG` (default `warn`). With one, JSON lines are appended to
/// `akkhara-trace.jsonl` there, default filter `akkhara_core=debug`.
pub fn init_tracing(log_dir: Option<&Path>) {
    INIT.call_once(|| match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::never(dir, "akkhara-trace.jsonl");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            std::mem::forget(guard); // flushed on process exit

            tracing_subscriber::fmt()
                .json()
                .with_writer(non_blocking)
                .with_target(true)
                .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("akkhara_core=debug")),
                )
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                )
                .init();
        }
    });
}
