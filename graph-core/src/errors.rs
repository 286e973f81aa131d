use graph_types::NodeId;
use thiserror::Error;

/// All errors the engine can return. Every variant is fatal for the call
/// that produced it — the engine never returns a partial result
/// (`spec.md` §7).
///
/// Edge shape (exactly two columns, from/to) is not one of these variants:
/// `Edge` itself only ever holds a `from`/`to` pair, so `&[Edge]` already
/// enforces the shape at the type level and there is no runtime state that
/// could violate it.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("node id must be a positive integer, got {0}")]
    InvalidNodeId(i64),

    #[error(
        "n_nodes ({n_nodes}) is smaller than the largest node id seen ({max_id}); \
         remap node ids to a dense range or omit n_nodes"
    )]
    InvalidNodeRange { n_nodes: u64, max_id: NodeId },

    #[error("capacity exceeded: {reason}")]
    CapacityExceeded { reason: String },

    #[error(
        "columns must all have the same length; column {index} has length {length}, \
         expected {expected}"
    )]
    ColumnLengthMismatch {
        index: usize,
        length: usize,
        expected: usize,
    },

    #[error("min_group_size must be at least 1, got {0}")]
    InvalidMinGroupSize(usize),
}
