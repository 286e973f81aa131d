use rayon::ThreadPoolBuilder;
use std::sync::Once;

static INIT_THREADPOOL_ONCE: Once = Once::new();

/// Builds the global rayon threadpool once. Only needed by callers that opt
/// into the parallel union-sharding path (`spec.md` §5: "an implementation
/// is free to parallelise the union pass... but this is an optional
/// optimisation").
pub fn init_threadpool(num_threads: usize) {
    INIT_THREADPOOL_ONCE.call_once(|| {
        ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .expect("cannot build connectivity engine threadpool");
    });
}

/// Calculates a chunk size for an iterable input so it divides evenly across
/// all available rayon threads, rounding up so no thread is starved.
pub fn chunk_size(input_length: usize) -> usize {
    let num_threads = rayon::current_num_threads();
    let minimum_factor = std::cmp::min(input_length, num_threads).max(1);
    input_length.div_ceil(minimum_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn chunk_size_of_empty_input_is_zero() {
        assert_eq!(chunk_size(0), 0);
    }

    #[test]
    fn chunk_size_covers_the_whole_input() {
        let len = 97;
        let chunks = chunk_size(len);
        assert!(chunks >= 1);
        assert!(chunks * rayon::current_num_threads().max(1) >= len);
    }
}
