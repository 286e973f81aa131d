use std::fmt::Debug;
use std::hash::Hash;

/// An internal dense index into `[0, N)`.
///
/// The engine is generic over this so that the dense index can be stored as
/// `u32` (half the memory of `u64`) whenever the interned node count fits,
/// and widened transparently when it does not. Callers never choose which
/// one is used; the graph driver measures `N` first and picks for them.
pub trait IndexInt:
    Copy + Clone + Debug + Default + Eq + Ord + Hash + Send + Sync + 'static
{
    /// Largest value `N` (count of distinct nodes) this index width can address.
    const MAX_N: usize;

    fn from_usize(value: usize) -> Self;
    fn to_usize(self) -> usize;
}

impl IndexInt for u32 {
    const MAX_N: usize = u32::MAX as usize;

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as u32
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }
}

impl IndexInt for u64 {
    const MAX_N: usize = usize::MAX;

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as u64
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }
}
