use bitvec::prelude::*;

use crate::error::{Error, Result};

/// A 0/1 selector running parallel to a sequence.
///
/// Only the positions whose bit is set take part in the longest increasing
/// subsequence computations.
///
/// # Examples
///
/// ```
/// use subsequences::cs::dynamic::mask::Mask;
///
/// let mask = Mask::try_from(&[1u8, 0, 1][..]).unwrap();
/// assert_eq!(mask.select(&[7, 8, 9]).unwrap(), vec![7, 9]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mask {
    bits: BitVec,
}

impl Mask {
    /// A mask of `len` entries that allows every position.
    pub fn all(len: usize) -> Self {
        Self {
            bits: BitVec::repeat(true, len),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Whether position `index` is selected. Out of range positions are not.
    pub fn allows(&self, index: usize) -> bool {
        self.bits.get(index).map(|bit| *bit).unwrap_or(false)
    }

    /// Number of selected positions.
    pub fn count_allowed(&self) -> usize {
        self.bits.count_ones()
    }

    /// Returns the elements of `sequence` selected by this mask, in order.
    ///
    /// Fails with [`Error::InvalidArgument`] when the mask and the sequence
    /// differ in length; nothing is truncated or padded.
    pub fn select(&self, sequence: &[i64]) -> Result<Vec<i64>> {
        if self.bits.len() != sequence.len() {
            return Err(Error::invalid_argument(format!(
                "mask has {} entries but the sequence has {}",
                self.bits.len(),
                sequence.len()
            )));
        }

        Ok(sequence
            .iter()
            .zip(self.bits.iter().by_vals())
            .filter_map(|(&value, allowed)| allowed.then_some(value))
            .collect())
    }

    fn from_binary<T: Copy + Into<i64>>(values: &[T]) -> Result<Self> {
        let mut bits = BitVec::with_capacity(values.len());
        for (position, &value) in values.iter().enumerate() {
            let value: i64 = value.into();
            match value {
                0 => bits.push(false),
                1 => bits.push(true),
                other => {
                    return Err(Error::invalid_argument(format!(
                        "mask value {other} at position {position} is not 0 or 1"
                    )))
                }
            }
        }
        Ok(Self { bits })
    }
}

impl TryFrom<&[u8]> for Mask {
    type Error = Error;

    /// Builds a mask from 0/1 values. Any other value is rejected.
    fn try_from(values: &[u8]) -> Result<Self> {
        Self::from_binary(values)
    }
}

impl TryFrom<&[i64]> for Mask {
    type Error = Error;

    fn try_from(values: &[i64]) -> Result<Self> {
        Self::from_binary(values)
    }
}

impl FromIterator<bool> for Mask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}
