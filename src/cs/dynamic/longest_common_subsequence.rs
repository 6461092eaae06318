use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use log::{debug, trace};
use ndarray::Array2;

use crate::cs::dynamic::distinct::{distinct_sorted, EnumerationMode};
use crate::error::{Error, Result};

/// Raw enumeration bound used by [`number_of_lcs`].
pub const NUMBER_OF_LCS_CAP: usize = 1000;

/// Oversampling factor used by [`all_unique_lcs`].
pub const LCS_OVERSAMPLE: usize = 2;

/// The `(n + 1) x (m + 1)` table of LCS lengths for every prefix pair.
///
/// Row 0 and column 0 are zero, cells never decrease moving right or down,
/// and the bottom-right cell holds the LCS length of the full sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcsMatrix {
    table: Array2<usize>,
}

impl LcsMatrix {
    pub fn rows(&self) -> usize {
        self.table.nrows()
    }

    pub fn cols(&self) -> usize {
        self.table.ncols()
    }

    /// LCS length of `a[..i]` and `b[..j]`, or `None` outside the table.
    pub fn get(&self, i: usize, j: usize) -> Option<usize> {
        self.table.get((i, j)).copied()
    }

    /// LCS length of the full sequences.
    pub fn length(&self) -> usize {
        self.table[[self.rows() - 1, self.cols() - 1]]
    }

    pub fn as_array(&self) -> &Array2<usize> {
        &self.table
    }
}

/// Builds the LCS table of `a` and `b`.
///
/// # Examples
///
/// ```
/// use subsequences::cs::dynamic::longest_common_subsequence::build_lcs_matrix;
///
/// let matrix = build_lcs_matrix(&[1, 2, 3], &[1, 3, 2]);
/// assert_eq!((matrix.rows(), matrix.cols()), (4, 4));
/// assert_eq!(matrix.length(), 2);
/// ```
pub fn build_lcs_matrix(a: &[i64], b: &[i64]) -> LcsMatrix {
    let n = a.len();
    let m = b.len();

    let mut dp = Array2::<usize>::zeros((n + 1, m + 1));

    for i in 1..=n {
        for j in 1..=m {
            if a[i - 1] == b[j - 1] {
                dp[[i, j]] = dp[[i - 1, j - 1]] + 1;
            } else {
                dp[[i, j]] = dp[[i - 1, j]].max(dp[[i, j - 1]]);
            }
        }
    }

    LcsMatrix { table: dp }
}

/// Returns the length of the longest common subsequence of `a` and `b`.
///
/// # Examples
///
/// ```
/// use subsequences::cs::dynamic::longest_common_subsequence::lcs_length;
///
/// assert_eq!(lcs_length(&[1, 2, 3, 4, 1], &[3, 4, 1, 2, 1, 3]), 3);
/// ```
pub fn lcs_length(a: &[i64], b: &[i64]) -> usize {
    build_lcs_matrix(a, b).length()
}

/// Counts the longest common subsequences found by the raw enumeration,
/// capped at [`NUMBER_OF_LCS_CAP`].
///
/// This counts index-paths, not values: `[1, 1]` against `[1]` reports 2.
/// Callers that need value-distinct sequences should use [`all_unique_lcs_with`].
///
/// # Examples
///
/// ```
/// use subsequences::cs::dynamic::longest_common_subsequence::number_of_lcs;
///
/// assert_eq!(number_of_lcs(&[1, 2, 3], &[1, 3, 2]), 2);
/// assert_eq!(number_of_lcs(&[1, 1], &[1]), 2);
/// ```
pub fn number_of_lcs(a: &[i64], b: &[i64]) -> usize {
    all_lcs(a, b, NUMBER_OF_LCS_CAP).len()
}

/// Enumerates up to `limit` longest common subsequences of `a` and `b`.
///
/// The result may hold the same values more than once when they come from
/// different positions. Sequences are ordered by the first-occurrence index
/// in `a` of each of their elements.
///
/// When `limit` cuts the search short, the sequences returned are the ones
/// the breadth-first backtracking completes first, not necessarily the
/// smallest ones.
///
/// # Examples
///
/// ```
/// use subsequences::cs::dynamic::longest_common_subsequence::all_lcs;
///
/// assert_eq!(all_lcs(&[1, 2, 3], &[1, 3, 2], 10), vec![vec![1, 2], vec![1, 3]]);
/// assert!(all_lcs(&[], &[1, 2], 10).is_empty());
/// ```
pub fn all_lcs(a: &[i64], b: &[i64], limit: usize) -> Vec<Vec<i64>> {
    if limit == 0 {
        return Vec::new();
    }

    let matrix = build_lcs_matrix(a, b);
    let mut results = backtrack(a, b, &matrix.table, limit);
    order_by_first_occurrence(a, &mut results);
    results
}

/// Same as [`all_lcs`] but reuses a table built by [`build_lcs_matrix`].
///
/// Fails with [`Error::InvalidArgument`] if the table was not built for
/// sequences of these lengths.
pub fn all_lcs_with_matrix(
    a: &[i64],
    b: &[i64],
    matrix: &LcsMatrix,
    limit: usize,
) -> Result<Vec<Vec<i64>>> {
    if matrix.rows() != a.len() + 1 || matrix.cols() != b.len() + 1 {
        return Err(Error::invalid_argument(format!(
            "matrix is {}x{} but the sequences need {}x{}",
            matrix.rows(),
            matrix.cols(),
            a.len() + 1,
            b.len() + 1
        )));
    }
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut results = backtrack(a, b, &matrix.table, limit);
    order_by_first_occurrence(a, &mut results);
    Ok(results)
}

/// Returns up to `limit` value-distinct longest common subsequences, sorted
/// ascending.
///
/// Runs the raw enumeration with `limit * LCS_OVERSAMPLE` results before
/// deduplicating, so it can come back with fewer than `limit` sequences
/// when many index-paths share the same values. Use
/// [`all_unique_lcs_with`] and [`EnumerationMode::Exact`] for a complete
/// answer.
///
/// # Examples
///
/// ```
/// use subsequences::cs::dynamic::longest_common_subsequence::all_unique_lcs;
///
/// assert_eq!(all_unique_lcs(&[1, 2, 3], &[1, 3, 2], 10), vec![vec![1, 2], vec![1, 3]]);
/// ```
pub fn all_unique_lcs(a: &[i64], b: &[i64], limit: usize) -> Vec<Vec<i64>> {
    all_unique_lcs_with(
        a,
        b,
        limit,
        EnumerationMode::BestEffort {
            oversample: LCS_OVERSAMPLE,
        },
    )
}

/// Returns up to `limit` value-distinct longest common subsequences, sorted
/// ascending, using the given enumeration mode.
pub fn all_unique_lcs_with(
    a: &[i64],
    b: &[i64],
    limit: usize,
    mode: EnumerationMode,
) -> Vec<Vec<i64>> {
    if limit == 0 {
        return Vec::new();
    }

    let matrix = build_lcs_matrix(a, b);
    match mode {
        EnumerationMode::BestEffort { .. } => distinct_sorted(
            backtrack(a, b, &matrix.table, mode.raw_limit(limit)),
            limit,
        ),
        EnumerationMode::Exact => smallest_distinct(a, b, &matrix.table, limit),
    }
}

/// A partial solution: the prefixes `a[..i]` and `b[..j]` are still open and
/// `suffix` holds the chosen elements, last one first.
struct State {
    i: usize,
    j: usize,
    suffix: Vec<i64>,
}

/// Breadth-first walk of the table from the bottom-right corner.
///
/// Each state scans candidate matches `x` from `i` down to 1 and, inside,
/// `y` from `j` down to 1. That order decides which completions come out
/// first, which matters once `limit` truncates the output.
///
/// No more than `limit` states are admitted per depth. Every incomplete
/// state has at least one successor, so the first `limit` completions only
/// ever descend from the first `limit` states of each depth.
fn backtrack(a: &[i64], b: &[i64], dp: &Array2<usize>, limit: usize) -> Vec<Vec<i64>> {
    let (n, m) = (a.len(), b.len());
    let lcs_len = dp[[n, m]];
    debug!("lcs backtrack: n={n} m={m} length={lcs_len} limit={limit}");

    if lcs_len == 0 || limit == 0 {
        return Vec::new();
    }

    let mut admitted = vec![0_usize; lcs_len + 1];
    let mut queue = VecDeque::new();
    queue.push_back(State {
        i: n,
        j: m,
        suffix: Vec::new(),
    });
    admitted[0] = 1;

    let mut results = Vec::new();

    while results.len() < limit {
        let Some(state) = queue.pop_front() else {
            break;
        };

        if state.suffix.len() == lcs_len {
            let mut path = state.suffix;
            path.reverse();
            results.push(path);
            continue;
        }

        let needed = lcs_len - state.suffix.len();
        let depth = state.suffix.len() + 1;

        'scan: for x in (1..=state.i).rev() {
            for y in (1..=state.j).rev() {
                if a[x - 1] != b[y - 1] || dp[[x, y]] != needed {
                    continue;
                }
                if admitted[depth] >= limit {
                    break 'scan;
                }

                let mut suffix = Vec::with_capacity(depth);
                suffix.extend_from_slice(&state.suffix);
                suffix.push(a[x - 1]);

                trace!("lcs enqueue: ({}, {}) depth={depth}", x - 1, y - 1);
                admitted[depth] += 1;
                queue.push_back(State {
                    i: x - 1,
                    j: y - 1,
                    suffix,
                });
            }
        }
    }

    debug!("lcs backtrack: {} sequences collected", results.len());
    results
}

/// The smallest `limit` distinct longest common subsequences, ascending.
///
/// Fills the table of answers for every prefix pair row by row, keeping two
/// rows. A cell whose last elements match extends every answer of its
/// diagonal neighbour by that element; otherwise it takes the answers of
/// whichever of its upper and left neighbours share its length, merged.
/// Both steps preserve order among equal-length sequences, so cutting every
/// cell to `limit` never loses one of the final answers.
fn smallest_distinct(a: &[i64], b: &[i64], dp: &Array2<usize>, limit: usize) -> Vec<Vec<i64>> {
    let (n, m) = (a.len(), b.len());
    debug!(
        "lcs distinct: n={n} m={m} length={} limit={limit}",
        dp[[n, m]]
    );

    if dp[[n, m]] == 0 || limit == 0 {
        return Vec::new();
    }

    let empty: Rc<Vec<Vec<i64>>> = Rc::new(vec![Vec::new()]);
    let mut prev = vec![Rc::clone(&empty); m + 1];

    for i in 1..=n {
        let mut row = Vec::with_capacity(m + 1);
        row.push(Rc::clone(&empty));

        for j in 1..=m {
            let length = dp[[i, j]];
            let cell = if length == 0 {
                Rc::clone(&empty)
            } else if a[i - 1] == b[j - 1] {
                Rc::new(
                    prev[j - 1]
                        .iter()
                        .map(|prefix| {
                            let mut seq = Vec::with_capacity(length);
                            seq.extend_from_slice(prefix);
                            seq.push(a[i - 1]);
                            seq
                        })
                        .collect(),
                )
            } else if dp[[i - 1, j]] == length && dp[[i, j - 1]] == length {
                Rc::new(merge_smallest(&prev[j], &row[j - 1], limit))
            } else if dp[[i - 1, j]] == length {
                Rc::clone(&prev[j])
            } else {
                Rc::clone(&row[j - 1])
            };
            row.push(cell);
        }
        prev = row;
    }

    let results = prev[m].as_ref().clone();
    debug!("lcs distinct: {} sequences collected", results.len());
    results
}

/// Merges two ascending, duplicate-free lists, keeping the first `limit`.
fn merge_smallest(left: &[Vec<i64>], right: &[Vec<i64>], limit: usize) -> Vec<Vec<i64>> {
    let mut merged = Vec::with_capacity(limit.min(left.len() + right.len()));
    let mut left = left.iter().peekable();
    let mut right = right.iter().peekable();

    while merged.len() < limit {
        let order = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l.cmp(r),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => break,
        };
        let next = match order {
            Ordering::Less => left.next(),
            Ordering::Greater => right.next(),
            Ordering::Equal => {
                right.next();
                left.next()
            }
        };
        if let Some(seq) = next {
            merged.push(seq.clone());
        }
    }
    merged
}

/// Sorts by the index in `a` where each element first appears. Stable, so
/// sequences with the same key keep their discovery order.
fn order_by_first_occurrence(a: &[i64], results: &mut [Vec<i64>]) {
    let mut first_seen: HashMap<i64, usize> = HashMap::with_capacity(a.len());
    for (index, &value) in a.iter().enumerate() {
        first_seen.entry(value).or_insert(index);
    }

    results.sort_by_cached_key(|seq| {
        seq.iter()
            .map(|value| first_seen.get(value).copied().unwrap_or(usize::MAX))
            .collect::<Vec<_>>()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_lcs_matrix() {
        let matrix = build_lcs_matrix(&[1, 2, 3], &[1, 3, 2]);
        assert_eq!(matrix.rows(), 4);
        assert_eq!(matrix.cols(), 4);
        assert_eq!(matrix.length(), 2);
        assert_eq!(matrix.get(1, 1), Some(1));
        assert_eq!(matrix.get(3, 2), Some(2));
        assert_eq!(matrix.get(4, 0), None);

        let table = matrix.as_array();
        for i in 0..matrix.rows() {
            assert_eq!(table[[i, 0]], 0);
        }
        for j in 0..matrix.cols() {
            assert_eq!(table[[0, j]], 0);
        }
        for i in 1..matrix.rows() {
            for j in 1..matrix.cols() {
                assert!(table[[i, j]] >= table[[i - 1, j]]);
                assert!(table[[i, j]] >= table[[i, j - 1]]);
            }
        }
    }

    #[test]
    fn test_build_lcs_matrix_empty() {
        let matrix = build_lcs_matrix(&[], &[1, 2]);
        assert_eq!((matrix.rows(), matrix.cols()), (1, 3));
        assert_eq!(matrix.length(), 0);
        assert!(matrix.as_array().iter().all(|&cell| cell == 0));

        let matrix = build_lcs_matrix(&[], &[]);
        assert_eq!((matrix.rows(), matrix.cols()), (1, 1));
        assert_eq!(matrix.length(), 0);
    }

    #[test]
    fn test_lcs_length() {
        assert_eq!(lcs_length(&[], &[]), 0);
        assert_eq!(lcs_length(&[1, 2, 3], &[]), 0);
        assert_eq!(lcs_length(&[1, 2, 3], &[4, 5, 6]), 0);
        assert_eq!(lcs_length(&[1, 2, 3, 2, 4, 1, 2], &[2, 4, 3, 1, 2, 1]), 4);
        assert_eq!(lcs_length(&[-1, 0, -1], &[0, -1]), 2);
    }

    #[test]
    fn test_all_lcs_basic() {
        let a = [1, 2, 3];
        let b = [1, 3, 2];
        assert_eq!(all_lcs(&a, &b, 10), vec![vec![1, 2], vec![1, 3]]);
        assert_eq!(number_of_lcs(&a, &b), 2);
        assert_eq!(all_unique_lcs(&a, &b, 10), vec![vec![1, 2], vec![1, 3]]);
    }

    #[test]
    fn test_all_lcs_empty_input() {
        assert!(all_lcs(&[], &[1, 2], 10).is_empty());
        assert!(all_unique_lcs(&[], &[1, 2], 10).is_empty());
        assert!(all_lcs(&[1, 2], &[3, 4], 10).is_empty());
        assert_eq!(number_of_lcs(&[], &[1, 2]), 0);
    }

    #[test]
    fn test_zero_limit() {
        assert!(all_lcs(&[1, 2, 3], &[1, 3, 2], 0).is_empty());
        assert!(all_unique_lcs(&[1, 2, 3], &[1, 3, 2], 0).is_empty());
        assert!(all_unique_lcs_with(&[1, 2, 3], &[1, 3, 2], 0, EnumerationMode::Exact).is_empty());
    }

    #[test]
    fn test_truncation_follows_scan_order() {
        // [1, 3] completes before [1, 2]: the scan starts at the last
        // element of `a`, which is 3.
        assert_eq!(all_lcs(&[1, 2, 3], &[1, 3, 2], 1), vec![vec![1, 3]]);
    }

    #[test]
    fn test_duplicate_values_from_distinct_positions() {
        assert_eq!(all_lcs(&[1, 1], &[1], 10), vec![vec![1], vec![1]]);
        assert_eq!(number_of_lcs(&[1, 1], &[1]), 2);
        assert_eq!(all_unique_lcs(&[1, 1], &[1], 10), vec![vec![1]]);
    }

    #[test]
    fn test_best_effort_can_miss_distinct_results() {
        let a = [1, 1, 1, 2, 3];
        let b = [1, 3, 2];

        assert_eq!(number_of_lcs(&a, &b), 6);
        assert_eq!(
            all_lcs(&a, &b, 10),
            vec![
                vec![1, 2],
                vec![1, 2],
                vec![1, 2],
                vec![1, 3],
                vec![1, 3],
                vec![1, 3]
            ]
        );

        // Oversampling to two raw results only ever sees [1, 3].
        assert_eq!(all_unique_lcs(&a, &b, 1), vec![vec![1, 3]]);
        assert_eq!(
            all_unique_lcs_with(&a, &b, 1, EnumerationMode::Exact),
            vec![vec![1, 2]]
        );
        assert_eq!(
            all_unique_lcs_with(&a, &b, 10, EnumerationMode::Exact),
            vec![vec![1, 2], vec![1, 3]]
        );
    }

    #[test]
    fn test_cap_does_not_change_prefix() {
        let a = [1, 2, 1, 3, 2, 1, 3];
        let b = [3, 1, 2, 1, 3, 1];
        let full = backtrack(&a, &b, build_lcs_matrix(&a, &b).as_array(), usize::MAX);
        for limit in 1..full.len() {
            let capped = backtrack(&a, &b, build_lcs_matrix(&a, &b).as_array(), limit);
            assert_eq!(capped[..], full[..limit]);
        }
    }

    #[test]
    fn test_exact_mode_stays_bounded_on_many_ties() {
        // Swapped pairs against a sorted run: 2^30 distinct LCSs.
        let a: Vec<i64> = (0..30).flat_map(|k| [2 * k + 1, 2 * k]).collect();
        let b: Vec<i64> = (0..60).collect();
        let evens: Vec<i64> = (0..30).map(|k| 2 * k).collect();

        let mut second = evens.clone();
        second[29] = 59;
        let mut third = evens.clone();
        third[28] = 57;

        assert_eq!(
            all_unique_lcs_with(&a, &b, 3, EnumerationMode::Exact),
            vec![evens, second, third]
        );
    }

    #[test]
    fn test_merge_smallest() {
        let left = vec![vec![1, 2], vec![1, 4], vec![2, 3]];
        let right = vec![vec![1, 3], vec![1, 4], vec![3, 3]];
        assert_eq!(
            merge_smallest(&left, &right, 4),
            vec![vec![1, 2], vec![1, 3], vec![1, 4], vec![2, 3]]
        );
        assert_eq!(merge_smallest(&left, &[], 2), vec![vec![1, 2], vec![1, 4]]);
        assert!(merge_smallest(&[], &[], 5).is_empty());
    }

    #[test]
    fn test_results_are_common_subsequences() {
        let a = [3, 1, 4, 1, 5, 9, 2, 6];
        let b = [2, 7, 1, 8, 2, 8, 1, 8, 4, 5];
        let length = lcs_length(&a, &b);
        for seq in all_lcs(&a, &b, 100) {
            assert_eq!(seq.len(), length);
            assert!(is_subsequence(&seq, &a));
            assert!(is_subsequence(&seq, &b));
        }
    }

    #[test]
    fn test_all_lcs_with_matrix() {
        let a = [1, 2, 3];
        let b = [1, 3, 2];
        let matrix = build_lcs_matrix(&a, &b);
        assert_eq!(
            all_lcs_with_matrix(&a, &b, &matrix, 10).unwrap(),
            all_lcs(&a, &b, 10)
        );
        assert!(matches!(
            all_lcs_with_matrix(&a, &b[..2], &matrix, 10),
            Err(Error::InvalidArgument(_))
        ));
    }

    /// A helper to verify that `subseq` is a subsequence of `s`.
    fn is_subsequence(subseq: &[i64], s: &[i64]) -> bool {
        let mut it = s.iter();
        subseq.iter().all(|x| it.any(|y| y == x))
    }
}
