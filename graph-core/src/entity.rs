use crate::dsf::Dsf;
use crate::errors::EngineError;
use ahash::AHashMap;
use graph_types::ColumnValue;

/// Canonical strings ignored by `group_id` unless overridden (`spec.md` §4.5).
pub const DEFAULT_INCOMPARABLES: &[&str] = &["", "NA", "NULL", "Unknown"];

#[derive(Debug, Clone)]
pub struct EntityResolutionRequest<'a> {
    pub columns: &'a [Vec<ColumnValue>],
    pub incomparables: &'a [String],
    pub case_sensitive: bool,
    pub min_group_size: usize,
    /// Gates `value_map` (`spec.md` §6): set when the caller wants to see
    /// which values drove each merge, left unset to skip the bookkeeping.
    pub return_details: bool,
}

/// Result of `group_id`: per-row group labels plus, when requested, the
/// values that drove each merge (`spec.md` §4.5 packaging).
#[derive(Debug, Clone)]
pub struct EntityResolution {
    pub group_ids: Vec<u64>,
    pub n_groups: usize,
    pub group_sizes: Vec<u64>,
    /// Canonical value -> rows that shared it, kept only for values that
    /// actually joined two or more rows. Empty unless `return_details` was
    /// set on the request.
    pub value_map: AHashMap<String, Vec<usize>>,
}

fn row_count(columns: &[Vec<ColumnValue>]) -> Result<usize, EngineError> {
    let expected = columns.iter().find(|c| !c.is_empty()).map(Vec::len);
    let expected = match expected {
        Some(expected) => expected,
        None => return Ok(0),
    };
    for (index, column) in columns.iter().enumerate() {
        if !column.is_empty() && column.len() != expected {
            return Err(EngineError::ColumnLengthMismatch {
                index,
                length: column.len(),
                expected,
            });
        }
    }
    Ok(expected)
}

fn normalise(value: &ColumnValue, case_sensitive: bool) -> String {
    let canonical = value.canonical();
    if case_sensitive {
        canonical
    } else {
        canonical.to_ascii_lowercase()
    }
}

/// Groups the rows of `request.columns` by shared (canonicalised) values,
/// via a bipartite record/value union-find built over a transient
/// value -> first-seen-row map, per `spec.md` §4.5.
///
/// `incomparables` and the values under comparison are normalised the same
/// way (case-folding, if requested, applies to both), so a caller cannot
/// defeat the incomparables set just by changing case.
#[tracing::instrument(skip(request), fields(columns = request.columns.len()))]
pub fn group_id(request: &EntityResolutionRequest) -> Result<EntityResolution, EngineError> {
    if request.min_group_size < 1 {
        return Err(EngineError::InvalidMinGroupSize(request.min_group_size));
    }

    let r = row_count(request.columns)?;

    let incomparables: ahash::AHashSet<String> = request
        .incomparables
        .iter()
        .map(|s| normalise(&ColumnValue::Str(s.clone()), request.case_sensitive))
        .collect();

    let mut dsf: Dsf<u32> = Dsf::new(r);
    let mut first_seen_row: AHashMap<String, usize> = AHashMap::new();
    let mut value_map: AHashMap<String, Vec<usize>> = AHashMap::new();

    for column in request.columns {
        for (row, value) in column.iter().enumerate() {
            let canonical = normalise(value, request.case_sensitive);
            if canonical.is_empty() || incomparables.contains(&canonical) {
                continue;
            }

            match first_seen_row.get(&canonical) {
                None => {
                    first_seen_row.insert(canonical, row);
                }
                Some(&first_row) => {
                    dsf.union(first_row as u32, row as u32);
                    if request.return_details {
                        let rows = value_map.entry(canonical).or_insert_with(|| vec![first_row]);
                        rows.push(row);
                    }
                }
            }
        }
    }

    if request.return_details {
        value_map.retain(|_, rows| rows.len() >= 2);
    }

    let mut root_size: Vec<u64> = vec![0; r];
    for row in 0..r {
        let root = dsf.find(row as u32) as usize;
        root_size[root] += 1;
    }

    let mut group_ids = vec![0u64; r];
    let mut root_label: AHashMap<u32, u64> = AHashMap::new();
    let mut group_sizes: Vec<u64> = Vec::new();
    let mut next_label: u64 = 1;

    for row in 0..r {
        let root = dsf.find(row as u32);
        if root_size[root as usize] < request.min_group_size as u64 {
            continue;
        }
        let label = *root_label.entry(root).or_insert_with(|| {
            let label = next_label;
            next_label += 1;
            group_sizes.push(root_size[root as usize]);
            label
        });
        group_ids[row] = label;
    }

    Ok(EntityResolution {
        group_ids,
        n_groups: group_sizes.len(),
        group_sizes,
        value_map,
    })
}
