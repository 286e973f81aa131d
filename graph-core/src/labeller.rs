use crate::dsf::Dsf;
use graph_types::{ComponentId, IndexInt};

/// Per-node component labels and component sizes produced from a finalised
/// DSF (`spec.md` §4.3).
///
/// `sizes[i]` is the size of the component identified by `component_order[i]`.
/// In compressed mode `component_order` is always `[1, 2, .., K]` in order —
/// kept explicit (rather than assumed) so uncompressed mode can reuse the
/// same struct with its non-contiguous root indices as the order instead.
#[derive(Debug, Clone)]
pub struct Labelling {
    pub node_label: Vec<ComponentId>,
    pub component_order: Vec<ComponentId>,
    pub sizes: Vec<u64>,
}

impl Labelling {
    pub fn k(&self) -> usize {
        self.component_order.len()
    }
}

/// Scans `0..N` in ascending internal-index order, flattening every node's
/// path to its root (a further compression pass, harmless since `find`
/// already compresses) and assigning labels.
///
/// Compressed labels are a pure function of the DSF state plus this scan
/// order, so they reproduce across runs and platforms given the same
/// first-appearance interning (`spec.md` §4.3 guarantee).
pub fn label<Ix: IndexInt>(dsf: &mut Dsf<Ix>, compress: bool) -> Labelling {
    let n = dsf.len();
    let mut node_label = Vec::with_capacity(n);

    if compress {
        // Root indices are always < n, so a plain Vec doubles as a dense
        // root -> label lookup instead of a hash map.
        let mut dense_label: Vec<Option<u64>> = vec![None; n];
        let mut sizes: Vec<u64> = Vec::new();
        let mut next_label: u64 = 1;

        for i in 0..n {
            let root = dsf.find(Ix::from_usize(i));
            let root_idx = root.to_usize();
            let label = match dense_label[root_idx] {
                Some(label) => label,
                None => {
                    let label = next_label;
                    next_label += 1;
                    dense_label[root_idx] = Some(label);
                    sizes.push(0);
                    label
                }
            };
            sizes[(label - 1) as usize] += 1;
            node_label.push(ComponentId(label));
        }

        let component_order = (1..next_label).map(ComponentId).collect();
        Labelling {
            node_label,
            component_order,
            sizes,
        }
    } else {
        let mut order: Vec<ComponentId> = Vec::new();
        let mut position: Vec<Option<usize>> = vec![None; n];
        let mut sizes: Vec<u64> = Vec::new();

        for i in 0..n {
            let root = dsf.find(Ix::from_usize(i));
            let root_idx = root.to_usize();
            let pos = match position[root_idx] {
                Some(pos) => pos,
                None => {
                    let pos = order.len();
                    order.push(ComponentId(root_idx as u64));
                    sizes.push(0);
                    position[root_idx] = Some(pos);
                    pos
                }
            };
            sizes[pos] += 1;
            node_label.push(ComponentId(root_idx as u64));
        }

        Labelling {
            node_label,
            component_order: order,
            sizes,
        }
    }
}

/// Translates internal edge endpoint indices into per-edge labels via a
/// single array lookup each — the "per-edge join" primitive of `spec.md`
/// §4.4, which must never require a follow-up gather in the caller.
pub fn edge_labels<Ix: IndexInt>(
    node_label: &[ComponentId],
    edge_from: &[Ix],
    edge_to: &[Ix],
) -> (Vec<ComponentId>, Vec<ComponentId>) {
    let from = edge_from.iter().map(|&i| node_label[i.to_usize()]).collect();
    let to = edge_to.iter().map(|&i| node_label[i.to_usize()]).collect();
    (from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn compressed_labels_start_at_one_and_cover_every_component() {
        let mut dsf: Dsf<u32> = Dsf::new(5);
        dsf.union(0, 1);
        dsf.union(2, 3);
        let labelling = label(&mut dsf, true);
        assert_eq!(labelling.k(), 3);
        assert_eq!(labelling.sizes.iter().sum::<u64>(), 5);
        assert_eq!(labelling.node_label[0], labelling.node_label[1]);
        assert_eq!(labelling.node_label[2], labelling.node_label[3]);
        assert_ne!(labelling.node_label[0], labelling.node_label[4]);
        for id in &labelling.node_label {
            assert!(id.0 >= 1 && id.0 <= labelling.k() as u64);
        }
    }

    #[test]
    fn compressed_label_assignment_follows_scan_order() {
        let mut dsf: Dsf<u32> = Dsf::new(3);
        dsf.union(1, 2);
        let labelling = label(&mut dsf, true);
        // node 0 is scanned first, so it gets label 1 even though it is a singleton.
        assert_eq!(labelling.node_label[0], ComponentId(1));
        assert_eq!(labelling.node_label[1], labelling.node_label[2]);
    }

    #[test]
    fn uncompressed_labels_are_raw_root_indices() {
        let mut dsf: Dsf<u32> = Dsf::new(3);
        dsf.union(1, 2);
        let labelling = label(&mut dsf, false);
        assert_eq!(labelling.node_label[0].0, 0);
        assert!(labelling.node_label[1] == labelling.node_label[2]);
    }

    #[test]
    fn empty_dsf_labels_to_nothing() {
        let mut dsf: Dsf<u32> = Dsf::new(0);
        let labelling = label(&mut dsf, true);
        assert_eq!(labelling.k(), 0);
        assert!(labelling.node_label.is_empty());
    }

    #[test]
    fn edge_labels_are_equal_on_both_endpoints_for_a_unioned_edge() {
        let mut dsf: Dsf<u32> = Dsf::new(4);
        dsf.union(0, 1);
        let labelling = label(&mut dsf, true);
        let (from, to) = edge_labels(&labelling.node_label, &[0u32], &[1u32]);
        assert_eq!(from, to);
    }
}
