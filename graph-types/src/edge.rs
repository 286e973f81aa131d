use crate::node::NodeId;

/// An unordered pair of external node identifiers.
///
/// Self-loops (`from == to`) are accepted and carried through to the
/// labeller, which assigns them a valid (trivially equal) label on both
/// endpoints without contributing a union (`spec.md` §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((from, to): (NodeId, NodeId)) -> Self {
        Self::new(from, to)
    }
}
