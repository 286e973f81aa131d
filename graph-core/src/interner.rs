use crate::errors::EngineError;
use ahash::AHashMap;
use graph_types::{IndexInt, NodeId};

/// Maps arbitrary external `NodeId`s to dense `[0, N)` indices during a
/// single pass over the edge list, and keeps the inverse mapping for
/// translating results back.
///
/// The forward map is keyed on `NodeId`, which is frequently a dense
/// sequential integer in practice; `ahash` is used instead of the standard
/// library's default SipHash because SipHash is tuned to resist
/// hash-flooding DoS from untrusted string keys, not to run fast over
/// already-numeric keys, and `spec.md` §4.2 calls out exactly this
/// adversarial-dense-integer case (grounded on the same reasoning the
/// teacher applies to its own integer-keyed maps — see
/// `similarity/src/hnsw/mod.rs`).
#[derive(Debug, Default)]
pub struct Interner<Ix: IndexInt> {
    forward: AHashMap<NodeId, Ix>,
    inverse: Vec<NodeId>,
}

impl<Ix: IndexInt> Interner<Ix> {
    pub fn new() -> Self {
        Self {
            forward: AHashMap::new(),
            inverse: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            forward: AHashMap::with_capacity(capacity),
            inverse: Vec::with_capacity(capacity),
        }
    }

    /// Returns the existing index for `id`, or assigns and returns the next
    /// free one. Fails with `CapacityExceeded` if assigning one more index
    /// would exceed what `Ix` can represent.
    pub fn intern(&mut self, id: NodeId) -> Result<Ix, EngineError> {
        if let Some(&index) = self.forward.get(&id) {
            return Ok(index);
        }

        let next = self.inverse.len();
        if next >= Ix::MAX_N {
            return Err(EngineError::CapacityExceeded {
                reason: format!(
                    "interned node count would exceed the {}-bit index width",
                    std::mem::size_of::<Ix>() * 8
                ),
            });
        }

        let index = Ix::from_usize(next);
        self.inverse.push(id);
        self.forward.insert(id, index);
        Ok(index)
    }

    /// Returns the index already assigned to `id`, if any, without
    /// interning it. Used by `are_connected` for query endpoints that may
    /// be unknown to the graph.
    pub fn get(&self, id: NodeId) -> Option<Ix> {
        self.forward.get(&id).copied()
    }

    pub fn size(&self) -> usize {
        self.inverse.len()
    }

    pub fn inverse(&self, index: Ix) -> NodeId {
        self.inverse[index.to_usize()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(value: u64) -> NodeId {
        NodeId::try_from(value).unwrap()
    }

    #[test]
    fn first_sight_assigns_next_free_index() {
        let mut interner: Interner<u32> = Interner::new();
        assert_eq!(interner.intern(id(100)).unwrap(), 0);
        assert_eq!(interner.intern(id(7)).unwrap(), 1);
        assert_eq!(interner.size(), 2);
    }

    #[test]
    fn repeated_id_returns_the_same_index() {
        let mut interner: Interner<u32> = Interner::new();
        let a = interner.intern(id(42)).unwrap();
        let b = interner.intern(id(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(interner.size(), 1);
    }

    #[test]
    fn ordering_follows_first_appearance_not_numeric_value() {
        let mut interner: Interner<u32> = Interner::new();
        interner.intern(id(9_000_000)).unwrap();
        interner.intern(id(1)).unwrap();
        assert_eq!(interner.inverse(0), id(9_000_000));
        assert_eq!(interner.inverse(1), id(1));
    }

    #[test]
    fn inverse_round_trips_through_intern() {
        let mut interner: Interner<u32> = Interner::new();
        let idx = interner.intern(id(22_361_810_781)).unwrap();
        assert_eq!(interner.inverse(idx), id(22_361_810_781));
    }

    #[test]
    fn unknown_id_is_not_found_without_interning() {
        let mut interner: Interner<u32> = Interner::new();
        interner.intern(id(1)).unwrap();
        assert_eq!(interner.get(id(2)), None);
    }
}
