use std::collections::BTreeSet;

/// How the `all_unique_*` operations turn raw enumerations into distinct results.
///
/// Raw enumerators report one result per index-path, so the same values can
/// show up several times. When the raw list is capped, those duplicates can
/// push distinct results out of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationMode {
    /// Ask the raw enumerator for `limit * oversample` results, then dedupe,
    /// sort and truncate. Cheap, but may return fewer than `limit` distinct
    /// sequences even when more exist.
    BestEffort { oversample: usize },
    /// Build the smallest `limit` distinct sequences directly, keeping at
    /// most `limit` candidates per intermediate step. Always returns the
    /// first `limit` distinct sequences.
    Exact,
}

impl EnumerationMode {
    /// The raw limit a best-effort run asks for. Exact runs do not cap a raw
    /// enumeration, so they report `usize::MAX`.
    pub fn raw_limit(&self, limit: usize) -> usize {
        match *self {
            EnumerationMode::BestEffort { oversample } => limit.saturating_mul(oversample),
            EnumerationMode::Exact => usize::MAX,
        }
    }
}

/// Deduplicates `raw` by value, sorts ascending (element-wise) and keeps the
/// first `limit` sequences.
///
/// # Examples
///
/// ```
/// use subsequences::cs::dynamic::distinct::distinct_sorted;
///
/// let raw = vec![vec![1, 3], vec![1, 2], vec![1, 3]];
/// assert_eq!(distinct_sorted(raw, 10), vec![vec![1, 2], vec![1, 3]]);
/// ```
pub fn distinct_sorted<I>(raw: I, limit: usize) -> Vec<Vec<i64>>
where
    I: IntoIterator<Item = Vec<i64>>,
{
    if limit == 0 {
        return Vec::new();
    }

    let unique: BTreeSet<Vec<i64>> = raw.into_iter().collect();
    unique.into_iter().take(limit).collect()
}
