use tracing::subscriber::set_global_default;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialises a process-wide `tracing` subscriber for binaries and tests
/// embedding the connectivity engine.
///
/// The engine itself never calls this — it only emits `tracing` events.
/// Unlike the teacher's `tracer` crate, there is no OpenTelemetry exporter
/// here: the engine is an in-process batch computation with no network
/// service to trace, so a formatted stdout layer plus an `EnvFilter` is the
/// whole story.
pub fn init_tracing(log_level: Option<&str>) {
    let env_filter = EnvFilter::new(log_level.unwrap_or("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).finish();
    // Safe to call more than once in tests; ignore the "already set" error.
    let _ = set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_does_not_panic() {
        init_tracing(Some("debug"));
        init_tracing(None);
    }
}
