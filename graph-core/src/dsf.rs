use graph_types::IndexInt;

/// Union-find over a dense `[0, N)` index space.
///
/// Path compression and union by rank, per `spec.md` §4.1. `find` is the
/// iterative two-pass formulation (locate the root, then re-parent every
/// node on the path) rather than the recursive one-pass version seen in
/// textbook implementations: the spec is explicit that recursion is
/// forbidden at large `N` because it risks a stack overflow, and a batch
/// connectivity engine over "hundreds of millions of edges" is exactly the
/// regime where that risk is real.
#[derive(Debug, Clone)]
pub struct Dsf<Ix: IndexInt> {
    parent: Vec<Ix>,
    rank: Vec<u8>,
    components: usize,
}

impl<Ix: IndexInt> Dsf<Ix> {
    /// Allocates `parent[i] = i`, `rank[i] = 0` for all `i in [0, n)`.
    pub fn new(n: usize) -> Self {
        let parent = (0..n).map(Ix::from_usize).collect();
        Self {
            parent,
            rank: vec![0; n],
            components: n,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets remaining. Starts at `N`, decreases by one
    /// for every successful `union`.
    pub fn components(&self) -> usize {
        self.components
    }

    /// Returns the root of `x`, compressing every node on the path to it.
    ///
    /// Two passes: the first walks to the root without mutating anything,
    /// the second re-walks the same path re-parenting each node directly
    /// to the root. Both passes are plain loops, so the stack depth is
    /// O(1) regardless of tree height.
    pub fn find(&mut self, x: Ix) -> Ix {
        debug_assert!(x.to_usize() < self.parent.len(), "index out of range");

        let mut root = x;
        while self.parent[root.to_usize()] != root {
            root = self.parent[root.to_usize()];
        }

        let mut cur = x;
        while cur != root {
            let next = self.parent[cur.to_usize()];
            self.parent[cur.to_usize()] = root;
            cur = next;
        }

        root
    }

    /// Unites the sets containing `a` and `b`. Returns `false` (no change)
    /// if they were already the same set.
    pub fn union(&mut self, a: Ix, b: Ix) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }

        let (ra_idx, rb_idx) = (ra.to_usize(), rb.to_usize());
        match self.rank[ra_idx].cmp(&self.rank[rb_idx]) {
            std::cmp::Ordering::Less => self.parent[ra_idx] = rb,
            std::cmp::Ordering::Greater => self.parent[rb_idx] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb_idx] = ra;
                self.rank[ra_idx] += 1;
            }
        }
        self.components -= 1;
        true
    }

    pub fn same(&mut self, a: Ix, b: Ix) -> bool {
        self.find(a) == self.find(b)
    }
}
