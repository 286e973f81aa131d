use crate::errors::TypeError;
use std::fmt;

/// An external node identifier as supplied by the caller.
///
/// IDs are arbitrary, sparse 64-bit unsigned integers. Zero is rejected:
/// callers that number nodes from zero must shift by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    pub fn new(value: i64) -> Result<Self, TypeError> {
        if value <= 0 {
            return Err(TypeError::InvalidNodeId(value));
        }
        Ok(Self(value as u64))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for NodeId {
    type Error = TypeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<u64> for NodeId {
    type Error = TypeError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(TypeError::InvalidNodeId(0));
        }
        Ok(Self(value))
    }
}

/// A component identifier produced by the labeller.
///
/// In compressed mode this is a dense, canonical value in `[1, K]`. In
/// uncompressed mode it is the raw internal root index (zero-based) and is
/// only meaningful within the call that produced it — see `spec.md` §9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct ComponentId(pub u64);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
