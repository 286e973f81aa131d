use thiserror::Error;

/// Errors raised while constructing or normalising a data-model value.
///
/// Distinct from `graph-core`'s `EngineError`: this crate only reports
/// malformed *values*, never anything about allocation or call-level shape.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum TypeError {
    #[error("node id must be a positive integer, got {0}")]
    InvalidNodeId(i64),
}
