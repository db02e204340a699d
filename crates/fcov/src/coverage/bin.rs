//! Bin descriptors and the functions that build them.
//!
//! Builders are pure: they turn a value, a value set, a numeric range or a
//! value sequence into unregistered [`BinDescriptor`]s. Every builder returns
//! a `Vec` so descriptors from different builders can be concatenated before
//! they are handed to [`CoveragePoint::add_bins`](super::CoveragePoint::add_bins).
//!
//! ```
//! use fcov::{bin, bin_range, bin_transition};
//!
//! let mut bins = bin(0);
//! bins.extend(bin_range(1, 10, 2)?);
//! bins.extend(bin_transition(&[1, 2, 3])?);
//! assert_eq!(bins.len(), 4);
//! # Ok::<(), fcov::FcovError>(())
//! ```

use crate::result::{FcovError, FcovResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest number of single-value bins a per-value enumeration may produce
pub const MAX_ENUMERATED_BINS: u128 = 1 << 16;

/// Widest field `bin_vector` will enumerate
pub const MAX_VECTOR_WIDTH: u32 = 16;

/// Kind of a bin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinKind {
    /// Discrete set of values
    Value,
    /// Discrete values excluded from coverage
    ValueIgnore,
    /// Discrete values that must never occur
    ValueIllegal,
    /// Inclusive numeric interval
    Range,
    /// Interval excluded from coverage
    RangeIgnore,
    /// Interval that must never occur
    RangeIllegal,
    /// Ordered sequence observed consecutively
    Transition,
}

impl BinKind {
    /// Whether bins of this kind take part in sampling and hit counting
    #[must_use]
    pub const fn is_sampleable(self) -> bool {
        matches!(self, Self::Value | Self::Range | Self::Transition)
    }

    /// Whether this is an ignore kind
    #[must_use]
    pub const fn is_ignore(self) -> bool {
        matches!(self, Self::ValueIgnore | Self::RangeIgnore)
    }

    /// Whether this is an illegal kind
    #[must_use]
    pub const fn is_illegal(self) -> bool {
        matches!(self, Self::ValueIllegal | Self::RangeIllegal)
    }

    /// Whether the values describe an inclusive `[min, max]` interval
    #[must_use]
    pub const fn is_range(self) -> bool {
        matches!(self, Self::Range | Self::RangeIgnore | Self::RangeIllegal)
    }
}

impl fmt::Display for BinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Value => "Value",
            Self::ValueIgnore => "ValueIgnore",
            Self::ValueIllegal => "ValueIllegal",
            Self::Range => "Range",
            Self::RangeIgnore => "RangeIgnore",
            Self::RangeIllegal => "RangeIllegal",
            Self::Transition => "Transition",
        };
        f.write_str(name)
    }
}

/// Unregistered bin: a kind plus its values
///
/// Range kinds store exactly `[min, max]`. Transition bins store the
/// sequence in observation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinDescriptor {
    kind: BinKind,
    values: Vec<i64>,
}

impl BinDescriptor {
    fn new(kind: BinKind, values: Vec<i64>) -> Self {
        Self { kind, values }
    }

    fn range(kind: BinKind, min: i64, max: i64) -> FcovResult<Self> {
        if min > max {
            return Err(FcovError::InvalidRange { min, max });
        }
        Ok(Self::new(kind, vec![min, max]))
    }

    /// Bin kind
    #[must_use]
    pub const fn kind(&self) -> BinKind {
        self.kind
    }

    /// Stored values
    #[must_use]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Number of stored values
    #[must_use]
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Interval bounds for range kinds
    #[must_use]
    pub fn range_bounds(&self) -> Option<(i64, i64)> {
        match (self.kind.is_range(), self.values.as_slice()) {
            (true, &[min, max]) => Some((min, max)),
            _ => None,
        }
    }

    /// Whether a single observed value lies in this bin's set or interval
    ///
    /// Transition bins never contain a single value; they match sequences.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        if let Some((min, max)) = self.range_bounds() {
            return (min..=max).contains(&value);
        }
        match self.kind {
            BinKind::Transition => false,
            _ => self.values.contains(&value),
        }
    }
}

impl fmt::Display for BinDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_ignore() {
            f.write_str("IGN")?;
        } else if self.kind.is_illegal() {
            f.write_str("ILL")?;
        }
        if let Some((min, max)) = self.range_bounds() {
            return write!(f, "({min} to {max})");
        }
        let sep = if self.kind == BinKind::Transition {
            "->"
        } else {
            ", "
        };
        let body = self
            .values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(sep);
        write!(f, "({body})")
    }
}

/// Number of integers in `[min, max]`
fn span(min: i64, max: i64) -> u128 {
    (i128::from(max) - i128::from(min) + 1) as u128
}

fn check_enumeration(count: u128) -> FcovResult<()> {
    if count > MAX_ENUMERATED_BINS {
        return Err(FcovError::EnumerationTooLarge {
            count,
            limit: MAX_ENUMERATED_BINS,
        });
    }
    Ok(())
}

/// One `Value` bin holding a single value
#[must_use]
pub fn bin(value: i64) -> Vec<BinDescriptor> {
    vec![BinDescriptor::new(BinKind::Value, vec![value])]
}

/// One `Value` bin holding every value of the set
pub fn bin_values(values: &[i64]) -> FcovResult<Vec<BinDescriptor>> {
    if values.is_empty() {
        return Err(FcovError::EmptyBin {
            kind: BinKind::Value,
        });
    }
    Ok(vec![BinDescriptor::new(BinKind::Value, values.to_vec())])
}

/// Bins over the inclusive range `[min, max]`
///
/// With `num_bins == 0` every integer in the range becomes its own `Value`
/// bin. Otherwise the range is split into `num_bins` `Range` bins of width
/// `span / num_bins`; the last bin absorbs the division remainder and always
/// ends at `max`. A range holding fewer values than `num_bins` collapses to a
/// single `Range` bin.
///
/// ```
/// use fcov::bin_range;
///
/// let bins = bin_range(0, 10, 2)?;
/// assert_eq!(bins[0].range_bounds(), Some((0, 4)));
/// assert_eq!(bins[1].range_bounds(), Some((5, 10)));
/// # Ok::<(), fcov::FcovError>(())
/// ```
pub fn bin_range(min: i64, max: i64, num_bins: u32) -> FcovResult<Vec<BinDescriptor>> {
    if min > max {
        return Err(FcovError::InvalidRange { min, max });
    }
    let span = span(min, max);

    if num_bins == 0 {
        check_enumeration(span)?;
        return Ok((min..=max)
            .map(|value| BinDescriptor::new(BinKind::Value, vec![value]))
            .collect());
    }

    let num_bins = u128::from(num_bins);
    if span < num_bins || num_bins == 1 {
        return Ok(vec![BinDescriptor::new(BinKind::Range, vec![min, max])]);
    }
    check_enumeration(num_bins)?;

    let width = (span / num_bins) as i128;
    let base = i128::from(min);
    let bins = (0..num_bins as i128)
        .map(|i| {
            let lo = base + i * width;
            let hi = if i == num_bins as i128 - 1 {
                i128::from(max)
            } else {
                lo + width - 1
            };
            // lo and hi stay inside [min, max]
            BinDescriptor::new(BinKind::Range, vec![lo as i64, hi as i64])
        })
        .collect();
    Ok(bins)
}

/// One `Value` bin per encoding of a `width_bits` wide field
pub fn bin_vector(width_bits: u32) -> FcovResult<Vec<BinDescriptor>> {
    if width_bits == 0 || width_bits > MAX_VECTOR_WIDTH {
        return Err(FcovError::invalid_argument(format!(
            "vector width must be 1..={MAX_VECTOR_WIDTH} bits, got {width_bits}"
        )));
    }
    bin_range(0, (1_i64 << width_bits) - 1, 0)
}

/// One `Transition` bin over the ordered sequence
pub fn bin_transition(sequence: &[i64]) -> FcovResult<Vec<BinDescriptor>> {
    if sequence.is_empty() {
        return Err(FcovError::EmptyBin {
            kind: BinKind::Transition,
        });
    }
    Ok(vec![BinDescriptor::new(
        BinKind::Transition,
        sequence.to_vec(),
    )])
}

/// One `ValueIgnore` bin
#[must_use]
pub fn ignore_bin(value: i64) -> Vec<BinDescriptor> {
    vec![BinDescriptor::new(BinKind::ValueIgnore, vec![value])]
}

/// One `RangeIgnore` bin over `[min, max]`
pub fn ignore_bin_range(min: i64, max: i64) -> FcovResult<Vec<BinDescriptor>> {
    Ok(vec![BinDescriptor::range(BinKind::RangeIgnore, min, max)?])
}

/// One `ValueIllegal` bin
#[must_use]
pub fn illegal_bin(value: i64) -> Vec<BinDescriptor> {
    vec![BinDescriptor::new(BinKind::ValueIllegal, vec![value])]
}

/// One `RangeIllegal` bin over `[min, max]`
pub fn illegal_bin_range(min: i64, max: i64) -> FcovResult<Vec<BinDescriptor>> {
    Ok(vec![BinDescriptor::range(BinKind::RangeIllegal, min, max)?])
}
