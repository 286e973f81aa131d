/// Default hard limit on estimated DSF memory before a call fails with
/// `CapacityExceeded` (32 GiB, per `spec.md` §4.4).
pub const DEFAULT_HARD_LIMIT_BYTES: u64 = 32 * 1024 * 1024 * 1024;

/// Threshold above which a large-but-still-allowed allocation gets a
/// one-time advisory log line (8 GiB, per `spec.md` §7).
pub const DEFAULT_ADVISORY_BYTES: u64 = 8 * 1024 * 1024 * 1024;

/// Estimated bytes a DSF of `n` nodes will occupy: `parent` and `rank`
/// arrays sized by the interned, dense node count — never the caller's
/// raw `n_nodes` upper bound (`spec.md` §4.4).
pub fn estimate_dsf_bytes(n: usize) -> u64 {
    12u64.saturating_mul(n as u64)
}

/// Emits a one-time advisory for this call when the estimated allocation
/// is large but still under the hard limit. Not a process-wide dedup (the
/// engine keeps no state across calls, per `spec.md` §5) — just a single
/// log line per call that crosses the threshold, instead of one per byte
/// counted.
pub fn advise_if_large(estimated_bytes: u64, advisory_bytes: u64) {
    if estimated_bytes > advisory_bytes {
        tracing::warn!(
            estimated_bytes,
            advisory_bytes,
            "sparse node IDs produced a large dense index; proceeding with the interned \
             representation, which is the actual memory footprint"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn estimate_scales_linearly_with_n() {
        assert_eq!(estimate_dsf_bytes(0), 0);
        assert_eq!(estimate_dsf_bytes(1_000), 12_000);
    }

    #[test]
    fn estimate_saturates_instead_of_overflowing() {
        assert_eq!(estimate_dsf_bytes(usize::MAX), u64::MAX);
    }
}
