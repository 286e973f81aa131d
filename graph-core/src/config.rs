use graph_utils::memory::{DEFAULT_ADVISORY_BYTES, DEFAULT_HARD_LIMIT_BYTES};

/// Tunables for a single call into the engine.
///
/// Unlike the teacher's `utils::cli::CommandLineConfig`, this is not parsed
/// from process arguments — a command-line front-end is explicitly out of
/// scope for this engine (`spec.md` §1) — but the shape is the same: a
/// plain struct with a documented `Default`, passed in by the embedding
/// application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Estimated DSF memory above which a call fails with `CapacityExceeded`
    /// before any large allocation happens.
    pub hard_limit_bytes: u64,

    /// Estimated DSF memory above which a call proceeds but logs a
    /// one-time advisory, since it usually signals that `n_nodes` was set
    /// far higher than the interned, dense node count actually needs.
    pub advisory_bytes: u64,

    /// Uses the opt-in parallel union-sharding path (`spec.md` §5) instead
    /// of a single-threaded scan. Changes wall-clock only, never the
    /// resulting partition.
    pub parallel_union: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hard_limit_bytes: DEFAULT_HARD_LIMIT_BYTES,
            advisory_bytes: DEFAULT_ADVISORY_BYTES,
            parallel_union: false,
        }
    }
}
