use log::debug;
use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::cs::dynamic::distinct::{distinct_sorted, EnumerationMode};
use crate::cs::dynamic::mask::Mask;
use crate::error::Result;

/// Oversampling factor used by [`all_unique_lis`].
pub const LIS_OVERSAMPLE: usize = 10;

/// Returns the length of the longest strictly increasing subsequence among
/// the elements of `sequence` selected by `mask`.
///
/// # Examples
///
/// ```
/// use subsequences::cs::dynamic::longest_increasing_subsequence::length_of_lis;
/// use subsequences::cs::dynamic::mask::Mask;
///
/// let arr = vec![10, 9, 2, 5, 3, 7, 101, 18];
/// assert_eq!(length_of_lis(&arr, &Mask::all(arr.len())).unwrap(), 4);
/// // One possible LIS is [2, 5, 7, 101]
/// ```
pub fn length_of_lis(sequence: &[i64], mask: &Mask) -> Result<usize> {
    let allowed = mask.select(sequence)?;
    let length = tails_length(&allowed);
    debug!("lis length: {} allowed, length {length}", allowed.len());
    Ok(length)
}

/// Counts the maximum-length strictly increasing subsequences among the
/// elements selected by `mask`.
///
/// Subsequences are counted by position, so equal values at different
/// positions count separately.
///
/// # Examples
///
/// ```
/// use num_bigint::BigUint;
/// use subsequences::cs::dynamic::longest_increasing_subsequence::number_of_lis;
/// use subsequences::cs::dynamic::mask::Mask;
///
/// // [1, 2, 5] and [1, 2, 4]
/// let count = number_of_lis(&[3, 1, 2, 5, 4], &Mask::all(5)).unwrap();
/// assert_eq!(count, BigUint::from(2u32));
/// ```
pub fn number_of_lis(sequence: &[i64], mask: &Mask) -> Result<BigUint> {
    let allowed = mask.select(sequence)?;
    if allowed.is_empty() {
        return Ok(BigUint::zero());
    }

    let n = allowed.len();
    // lengths[i] = length of the longest increasing subsequence ending at i
    // counts[i] = number of those subsequences
    let mut lengths = vec![1_usize; n];
    let mut counts = vec![BigUint::one(); n];

    for i in 0..n {
        let (before, rest) = counts.split_at_mut(i);
        let current = &mut rest[0];
        for j in 0..i {
            if allowed[j] < allowed[i] {
                if lengths[j] + 1 > lengths[i] {
                    lengths[i] = lengths[j] + 1;
                    *current = before[j].clone();
                } else if lengths[j] + 1 == lengths[i] {
                    *current += &before[j];
                }
            }
        }
    }

    let longest = lengths.iter().copied().max().unwrap_or(0);
    let total: BigUint = counts
        .iter()
        .zip(&lengths)
        .filter(|&(_, &length)| length == longest)
        .map(|(count, _)| count)
        .sum();

    debug!("lis count: {n} allowed, length {longest}, count {total}");
    Ok(total)
}

/// Enumerates up to `limit` maximum-length strictly increasing subsequences,
/// sorted ascending.
///
/// One sequence is reported per index-path, so equal values at different
/// positions can produce repeated sequences.
///
/// # Examples
///
/// ```
/// use subsequences::cs::dynamic::longest_increasing_subsequence::all_lis;
/// use subsequences::cs::dynamic::mask::Mask;
///
/// let all = all_lis(&[5, 4, 3], &Mask::all(3), 10).unwrap();
/// assert_eq!(all, vec![vec![3], vec![4], vec![5]]);
/// ```
pub fn all_lis(sequence: &[i64], mask: &Mask, limit: usize) -> Result<Vec<Vec<i64>>> {
    let allowed = mask.select(sequence)?;
    Ok(backtrack(&allowed, limit, false))
}

/// Returns up to `limit` value-distinct maximum-length strictly increasing
/// subsequences, sorted ascending.
///
/// Enumerates `limit * LIS_OVERSAMPLE` raw sequences before deduplicating,
/// so heavy repetition can leave it short of `limit`. Use
/// [`all_unique_lis_with`] and [`EnumerationMode::Exact`] for a complete
/// answer.
///
/// # Examples
///
/// ```
/// use subsequences::cs::dynamic::longest_increasing_subsequence::all_unique_lis;
/// use subsequences::cs::dynamic::mask::Mask;
///
/// let unique = all_unique_lis(&[3, 1, 2, 5, 4], &Mask::all(5), 10).unwrap();
/// assert_eq!(unique, vec![vec![1, 2, 4], vec![1, 2, 5]]);
/// ```
pub fn all_unique_lis(sequence: &[i64], mask: &Mask, limit: usize) -> Result<Vec<Vec<i64>>> {
    all_unique_lis_with(
        sequence,
        mask,
        limit,
        EnumerationMode::BestEffort {
            oversample: LIS_OVERSAMPLE,
        },
    )
}

/// Returns up to `limit` value-distinct maximum-length strictly increasing
/// subsequences, sorted ascending, using the given enumeration mode.
pub fn all_unique_lis_with(
    sequence: &[i64],
    mask: &Mask,
    limit: usize,
    mode: EnumerationMode,
) -> Result<Vec<Vec<i64>>> {
    let allowed = mask.select(sequence)?;
    if limit == 0 {
        return Ok(Vec::new());
    }

    Ok(match mode {
        EnumerationMode::BestEffort { .. } => {
            distinct_sorted(backtrack(&allowed, mode.raw_limit(limit), false), limit)
        }
        EnumerationMode::Exact => backtrack(&allowed, limit, true),
    })
}

/// Patience-sorting length: `tails[k]` is the smallest value that ends an
/// increasing subsequence of length `k + 1`.
fn tails_length(numbers: &[i64]) -> usize {
    let mut tails: Vec<i64> = Vec::with_capacity(numbers.len());

    for &num in numbers {
        // Leftmost tail >= num. An equal tail is overwritten, never extended,
        // which keeps the subsequence strictly increasing.
        let pos = tails.partition_point(|&tail| tail < num);
        if pos == tails.len() {
            tails.push(num);
        } else {
            tails[pos] = num;
        }
    }
    tails.len()
}

/// `lengths[i]` is the length of the longest increasing subsequence of
/// `allowed` ending at `i`.
fn lengths_ending_at(allowed: &[i64]) -> Vec<usize> {
    let mut lengths = vec![1_usize; allowed.len()];
    for i in 0..allowed.len() {
        for j in 0..i {
            if allowed[j] < allowed[i] {
                lengths[i] = lengths[i].max(lengths[j] + 1);
            }
        }
    }
    lengths
}

/// Reconstructs maximum-length increasing subsequences.
///
/// `arena[i]` holds the subsequences ending at `i`, built once from the
/// entries of its predecessors: every `j < i` with a smaller value and
/// `lengths[j] == lengths[i] - 1`. Entries are kept sorted and cut to
/// `limit`. Extending equal-length sequences by the same element keeps
/// their order, so the smallest `limit` endings at `i` always come from the
/// smallest `limit` endings at each predecessor.
fn backtrack(allowed: &[i64], limit: usize, merge_duplicates: bool) -> Vec<Vec<i64>> {
    if allowed.is_empty() || limit == 0 {
        return Vec::new();
    }

    let lengths = lengths_ending_at(allowed);
    let longest = lengths.iter().copied().max().unwrap_or(0);
    debug!(
        "lis backtrack: {} allowed, length {longest}, limit {limit}, merge {merge_duplicates}",
        allowed.len()
    );

    let mut arena: Vec<Vec<Vec<i64>>> = Vec::with_capacity(allowed.len());
    for (i, &value) in allowed.iter().enumerate() {
        let mut endings = Vec::new();
        if lengths[i] == 1 {
            endings.push(vec![value]);
        } else {
            for j in 0..i {
                if allowed[j] < value && lengths[j] + 1 == lengths[i] {
                    endings.extend(arena[j].iter().map(|prefix| {
                        let mut seq = Vec::with_capacity(lengths[i]);
                        seq.extend_from_slice(prefix);
                        seq.push(value);
                        seq
                    }));
                }
            }
        }
        keep_smallest(&mut endings, limit, merge_duplicates);
        arena.push(endings);
    }

    let mut results = Vec::new();
    for (endings, &length) in arena.into_iter().zip(&lengths) {
        if length == longest {
            results.extend(endings);
        }
    }
    keep_smallest(&mut results, limit, merge_duplicates);

    debug!("lis backtrack: {} sequences collected", results.len());
    results
}

fn keep_smallest(sequences: &mut Vec<Vec<i64>>, limit: usize, merge_duplicates: bool) {
    sequences.sort();
    if merge_duplicates {
        sequences.dedup();
    }
    sequences.truncate(limit);
}
