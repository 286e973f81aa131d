use crate::config::EngineConfig;
use crate::dsf::Dsf;
use crate::errors::EngineError;
use crate::interner::Interner;
use crate::labeller::{self, Labelling};
use graph_types::{ComponentId, Edge, IndexInt, NodeId};
use graph_utils::memory::estimate_dsf_bytes;
use itertools::Itertools;

/// Below this interned node count a 32-bit dense index is guaranteed to fit
/// (`spec.md` §3: "32-bit when N < 2^31, otherwise 64-bit"). Conservative
/// relative to `u32::MAX` so the index width never needs to change mid-call.
const U32_INDEX_THRESHOLD: usize = 1 << 31;

/// Result of `find_connected_components`: the "summary" packaging variant.
#[derive(Debug, Clone)]
pub struct ConnectedComponents {
    /// Per-node component label, paired with the original `NodeId` it was
    /// interned from (the inverse-map translation `spec.md` §4.4 calls for).
    pub node_labels: Vec<(NodeId, ComponentId)>,
    pub sizes: Vec<u64>,
    pub k: usize,
}

/// Result of `edge_components`: the "combined"/per-edge packaging variant.
/// `edge_from_label` and `edge_to_label` are equal by construction
/// (`spec.md` §3), so only one vector is returned.
#[derive(Debug, Clone)]
pub struct EdgeComponents {
    pub edge_label: Vec<ComponentId>,
}

fn max_node_id(edges: &[Edge]) -> u64 {
    edges
        .iter()
        .map(|edge| edge.from.get().max(edge.to.get()))
        .max()
        .unwrap_or(0)
}

fn check_capacity(n: usize, config: &EngineConfig) -> Result<(), EngineError> {
    let estimated = estimate_dsf_bytes(n);
    if estimated > config.hard_limit_bytes {
        return Err(EngineError::CapacityExceeded {
            reason: format!(
                "estimated DSF allocation of {estimated} bytes for {n} nodes exceeds the \
                 configured hard limit of {} bytes",
                config.hard_limit_bytes
            ),
        });
    }
    graph_utils::memory::advise_if_large(estimated, config.advisory_bytes);
    Ok(())
}

/// Builds a DSF from a fully-interned edge list, generic over the index
/// width chosen by the caller-facing dispatch below.
fn build_dsf<Ix: IndexInt>(
    edges: &[Edge],
    config: &EngineConfig,
) -> Result<(Dsf<Ix>, Interner<Ix>, Vec<Ix>, Vec<Ix>), EngineError> {
    let mut interner: Interner<Ix> = Interner::with_capacity(edges.len());
    let mut edge_from = Vec::with_capacity(edges.len());
    let mut edge_to = Vec::with_capacity(edges.len());
    let mut is_self_loop = Vec::with_capacity(edges.len());

    for edge in edges {
        edge_from.push(interner.intern(edge.from)?);
        edge_to.push(interner.intern(edge.to)?);
        is_self_loop.push(edge.is_self_loop());
    }

    let n = interner.size();
    check_capacity(n, config)?;

    let dsf: Dsf<Ix> = if config.parallel_union {
        union_parallel(n, &edge_from, &edge_to, &is_self_loop)
    } else {
        let mut dsf = Dsf::new(n);
        for ((&from, &to), &self_loop) in edge_from
            .iter()
            .zip_eq(edge_to.iter())
            .zip_eq(is_self_loop.iter())
        {
            if !self_loop {
                dsf.union(from, to);
            }
        }
        dsf
    };

    Ok((dsf, interner, edge_from, edge_to))
}

/// Shards edges across rayon's thread pool, unions each shard into its own
/// scratch DSF, then folds the shards together (`spec.md` §5: "parallelise
/// the union pass... by sharding edges and merging DSFs"). The fold is
/// associative and commutative — each node ends up in the same merged set
/// regardless of fold order — so the result matches the sequential pass
/// exactly; only wall-clock changes.
fn union_parallel<Ix: IndexInt>(
    n: usize,
    edge_from: &[Ix],
    edge_to: &[Ix],
    is_self_loop: &[bool],
) -> Dsf<Ix> {
    use rayon::prelude::*;

    graph_utils::parallel::init_threadpool(rayon::current_num_threads());
    let chunk = graph_utils::parallel::chunk_size(edge_from.len());
    if chunk == 0 {
        return Dsf::new(n);
    }

    edge_from
        .par_chunks(chunk)
        .zip(edge_to.par_chunks(chunk))
        .zip(is_self_loop.par_chunks(chunk))
        .map(|((from_chunk, to_chunk), loop_chunk)| {
            let mut local: Dsf<Ix> = Dsf::new(n);
            for ((&a, &b), &self_loop) in from_chunk.iter().zip(to_chunk.iter()).zip(loop_chunk.iter()) {
                if !self_loop {
                    local.union(a, b);
                }
            }
            local
        })
        .reduce(|| Dsf::new(n), merge_dsf)
}

/// Folds `b`'s unions into `a`: every node that shares a root in `b` gets
/// unioned onto that root in `a`, transitively landing every such node in
/// the same set.
fn merge_dsf<Ix: IndexInt>(mut a: Dsf<Ix>, mut b: Dsf<Ix>) -> Dsf<Ix> {
    for i in 0..a.len() {
        let x = Ix::from_usize(i);
        let root = b.find(x);
        if root != x {
            a.union(x, root);
        }
    }
    a
}

fn validate_n_nodes(max_id: u64, n_nodes: Option<u64>) -> Result<(), EngineError> {
    if let Some(n_nodes) = n_nodes {
        if n_nodes < max_id {
            // max_id only reaches here derived from an edge endpoint, which
            // is already a validated, positive NodeId.
            let max_id = NodeId::try_from(max_id).expect("max_id comes from a valid NodeId");
            return Err(EngineError::InvalidNodeRange { n_nodes, max_id });
        }
    }
    Ok(())
}

fn connected_components_generic<Ix: IndexInt>(
    edges: &[Edge],
    n_nodes: Option<u64>,
    compress: bool,
    config: &EngineConfig,
) -> Result<ConnectedComponents, EngineError> {
    let max_id = max_node_id(edges);
    validate_n_nodes(max_id, n_nodes)?;

    let (mut dsf, interner, _from, _to): (Dsf<Ix>, Interner<Ix>, _, _) = build_dsf(edges, config)?;
    let labelling: Labelling = labeller::label(&mut dsf, compress);

    let node_labels = (0..interner.size())
        .map(|i| {
            let ix = Ix::from_usize(i);
            (interner.inverse(ix), labelling.node_label[i])
        })
        .collect();

    Ok(ConnectedComponents {
        node_labels,
        sizes: labelling.sizes,
        k: labelling.k(),
    })
}

fn edge_components_generic<Ix: IndexInt>(
    edges: &[Edge],
    compress: bool,
    config: &EngineConfig,
) -> Result<EdgeComponents, EngineError> {
    let (mut dsf, _interner, edge_from, edge_to): (Dsf<Ix>, Interner<Ix>, _, _) =
        build_dsf(edges, config)?;
    let labelling = labeller::label(&mut dsf, compress);
    let (edge_label, _edge_to_label) =
        labeller::edge_labels(&labelling.node_label, &edge_from, &edge_to);
    Ok(EdgeComponents { edge_label })
}

fn are_connected_generic<Ix: IndexInt>(
    edges: &[Edge],
    queries: &[(NodeId, NodeId)],
    config: &EngineConfig,
) -> Result<Vec<bool>, EngineError> {
    let mut interner: Interner<Ix> = Interner::with_capacity(edges.len() + queries.len());
    let mut edge_from = Vec::with_capacity(edges.len());
    let mut edge_to = Vec::with_capacity(edges.len());
    let mut is_self_loop = Vec::with_capacity(edges.len());
    for edge in edges {
        edge_from.push(interner.intern(edge.from)?);
        edge_to.push(interner.intern(edge.to)?);
        is_self_loop.push(edge.is_self_loop());
    }

    let n_after_edges = interner.size();
    check_capacity(n_after_edges, config)?;
    let mut dsf: Dsf<Ix> = Dsf::new(n_after_edges);
    for ((&from, &to), &self_loop) in edge_from
        .iter()
        .zip_eq(edge_to.iter())
        .zip_eq(is_self_loop.iter())
    {
        if !self_loop {
            dsf.union(from, to);
        }
    }

    // Query endpoints unseen in `edges` are singleton nodes: they get a
    // fresh index but no DSF entry to union into, so `same` on them is
    // trivially false unless the two sides are the same id.
    let mut results = Vec::with_capacity(queries.len());
    for &(a, b) in queries {
        let ia = interner.get(a);
        let ib = interner.get(b);
        let connected = match (ia, ib) {
            (Some(ia), Some(ib)) if ia.to_usize() < dsf.len() && ib.to_usize() < dsf.len() => {
                dsf.same(ia, ib)
            }
            _ => a == b,
        };
        results.push(connected);
    }
    Ok(results)
}

/// An upper bound on the distinct node count is `2 * (edges + extra
/// endpoints)`, so this is safe to check without a pre-scan of the actual
/// ids (`spec.md` §3: choose the index width before building the DSF).
fn index_threshold_is_safe(edges_len: usize, extra: usize) -> bool {
    edges_len.saturating_add(extra).saturating_mul(2) < U32_INDEX_THRESHOLD
}

/// `spec.md` §4.4: interns all endpoints, unions every non-self-loop edge,
/// and returns per-node labels plus component sizes.
#[tracing::instrument(skip(edges, config), fields(edges = edges.len()))]
pub fn find_connected_components(
    edges: &[Edge],
    n_nodes: Option<u64>,
    compress: bool,
    config: &EngineConfig,
) -> Result<ConnectedComponents, EngineError> {
    if index_threshold_is_safe(edges.len(), 0) {
        connected_components_generic::<u32>(edges, n_nodes, compress, config)
    } else {
        connected_components_generic::<u64>(edges, n_nodes, compress, config)
    }
}

/// `spec.md` §4.4: the per-edge "combined" primitive. Avoids any
/// post-computation lookup in the caller's language — labels are emitted
/// directly alongside the edges that produced them.
#[tracing::instrument(skip(edges, config), fields(edges = edges.len()))]
pub fn edge_components(
    edges: &[Edge],
    compress: bool,
    config: &EngineConfig,
) -> Result<EdgeComponents, EngineError> {
    if index_threshold_is_safe(edges.len(), 0) {
        edge_components_generic::<u32>(edges, compress, config)
    } else {
        edge_components_generic::<u64>(edges, compress, config)
    }
}

/// `spec.md` §4.4: builds a DSF over `edges ∪ queries` and answers each
/// query with `same(a, b)`. A query endpoint absent from `edges` is its
/// own singleton, per spec.
#[tracing::instrument(skip(edges, queries, config), fields(edges = edges.len(), queries = queries.len()))]
pub fn are_connected(
    edges: &[Edge],
    queries: &[(NodeId, NodeId)],
    config: &EngineConfig,
) -> Result<Vec<bool>, EngineError> {
    if index_threshold_is_safe(edges.len(), queries.len() * 2) {
        are_connected_generic::<u32>(edges, queries, config)
    } else {
        are_connected_generic::<u64>(edges, queries, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn edge(a: u64, b: u64) -> Edge {
        Edge::new(NodeId::try_from(a).unwrap(), NodeId::try_from(b).unwrap())
    }

    fn node(a: u64) -> NodeId {
        NodeId::try_from(a).unwrap()
    }

    // S1 — three components.
    #[test]
    fn three_components_have_descending_sizes_and_correct_partition() {
        let edges = vec![
            edge(1, 2),
            edge(2, 3),
            edge(5, 6),
            edge(8, 9),
            edge(9, 10),
        ];
        let result =
            find_connected_components(&edges, None, true, &EngineConfig::default()).unwrap();
        assert_eq!(result.k, 3);
        let mut sizes = result.sizes.clone();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(sizes, vec![3, 3, 2]);

        let label_of = |id: u64| {
            result
                .node_labels
                .iter()
                .find(|(n, _)| *n == node(id))
                .unwrap()
                .1
        };
        assert_eq!(label_of(1), label_of(2));
        assert_eq!(label_of(2), label_of(3));
        assert_eq!(label_of(8), label_of(9));
        assert_eq!(label_of(9), label_of(10));
        assert_eq!(label_of(5), label_of(6));
        assert_ne!(label_of(1), label_of(5));
        assert_ne!(label_of(1), label_of(8));
        assert_ne!(label_of(5), label_of(8));
    }

    // S2 — per-edge labelling.
    #[test]
    fn edge_components_group_matching_edges_together() {
        let edges = vec![
            edge(1, 2),
            edge(2, 3),
            edge(5, 6),
            edge(8, 9),
            edge(9, 10),
        ];
        let result = edge_components(&edges, true, &EngineConfig::default()).unwrap();
        assert_eq!(result.edge_label.len(), 5);
        assert_eq!(result.edge_label[0], result.edge_label[1]);
        assert_ne!(result.edge_label[1], result.edge_label[2]);
        assert_eq!(result.edge_label[3], result.edge_label[4]);
        assert_ne!(result.edge_label[2], result.edge_label[3]);
    }

    // S3 — sparse huge IDs.
    #[test]
    fn sparse_huge_ids_allocate_only_the_dense_interned_count() {
        let edges = vec![
            edge(22_361_810_781, 22_361_810_782),
            edge(22_361_810_782, 22_361_810_783),
            edge(50_000_000_001, 50_000_000_002),
        ];
        let result =
            find_connected_components(&edges, None, true, &EngineConfig::default()).unwrap();
        assert_eq!(result.k, 2);
        let mut sizes = result.sizes.clone();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(sizes, vec![3, 2]);
        assert_eq!(result.node_labels.len(), 5);
    }

    // S4 — duplicate + self-loop.
    #[test]
    fn duplicates_and_self_loops_are_idempotent() {
        let edges = vec![edge(1, 1), edge(1, 2), edge(1, 2), edge(2, 3)];
        let result =
            find_connected_components(&edges, None, true, &EngineConfig::default()).unwrap();
        assert_eq!(result.k, 1);
        assert_eq!(result.sizes, vec![3]);
    }

    #[test]
    fn are_connected_is_symmetric_and_reflexive_for_incident_nodes() {
        let edges = vec![edge(1, 2)];
        let queries = vec![(node(1), node(1)), (node(1), node(2)), (node(2), node(1))];
        let result = are_connected(&edges, &queries, &EngineConfig::default()).unwrap();
        assert_eq!(result, vec![true, true, true]);
    }

    #[test]
    fn are_connected_treats_unknown_endpoints_as_singletons() {
        let edges = vec![edge(1, 2)];
        let queries = vec![(node(1), node(99)), (node(99), node(99))];
        let result = are_connected(&edges, &queries, &EngineConfig::default()).unwrap();
        assert_eq!(result, vec![false, true]);
    }

    #[test]
    fn empty_edge_list_yields_no_components() {
        let result =
            find_connected_components(&[], None, true, &EngineConfig::default()).unwrap();
        assert_eq!(result.k, 0);
        assert!(result.node_labels.is_empty());
    }

    #[test]
    fn n_nodes_smaller_than_max_id_is_rejected() {
        let edges = vec![edge(1, 10)];
        let err = find_connected_components(&edges, Some(5), true, &EngineConfig::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidNodeRange { .. }));
    }

    #[test]
    fn capacity_exceeded_is_reported_before_any_large_allocation() {
        let edges = vec![edge(1, 2)];
        let tiny_config = EngineConfig {
            hard_limit_bytes: 1,
            ..EngineConfig::default()
        };
        let err = find_connected_components(&edges, None, true, &tiny_config).unwrap_err();
        assert!(matches!(err, EngineError::CapacityExceeded { .. }));
    }

    #[test]
    fn uncompressed_labels_equal_raw_root_indices_within_a_call() {
        let edges = vec![edge(1, 2), edge(3, 4)];
        let result =
            find_connected_components(&edges, None, false, &EngineConfig::default()).unwrap();
        assert_eq!(result.k, 2);
    }

    #[test]
    fn parallel_union_pass_finds_the_same_partition_as_the_sequential_one() {
        let edges = vec![
            edge(1, 2),
            edge(2, 3),
            edge(5, 6),
            edge(8, 9),
            edge(9, 10),
            edge(11, 12),
        ];
        let sequential =
            find_connected_components(&edges, None, true, &EngineConfig::default()).unwrap();
        let parallel_config = EngineConfig {
            parallel_union: true,
            ..EngineConfig::default()
        };
        let parallel =
            find_connected_components(&edges, None, true, &parallel_config).unwrap();
        assert_eq!(sequential.k, parallel.k);

        let mut sequential_sizes = sequential.sizes.clone();
        let mut parallel_sizes = parallel.sizes.clone();
        sequential_sizes.sort_unstable();
        parallel_sizes.sort_unstable();
        assert_eq!(sequential_sizes, parallel_sizes);
    }
}
