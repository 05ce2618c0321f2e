use std::fmt::Display;
use std::ops::Range;

use crate::num::PrimInt;
#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::Dissolve;
use eyre::{eyre, Result};
use impl_tools::autoimpl;

/// Interval is a half-open region [start, end) in sequence coordinates.
/// Empty intervals (start == end) and intervals with negative length (start > end) are prohibited.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Dissolve)]
pub struct Interval<Idx: PrimInt> {
    start: Idx,
    end: Idx,
}

/// Trait for types that can be generally viewed as half-open intervals [start, end).
#[autoimpl(for <T: trait + ?Sized> &T, Box<T>)]
#[allow(clippy::len_without_is_empty)]
pub trait IntervalOp {
    type Idx: PrimInt;

    /// Start position of the interval-like object.
    fn start(&self) -> Self::Idx;

    /// End position of the interval-like object.
    fn end(&self) -> Self::Idx;

    /// Length of the interval-like object.
    fn len(&self) -> Self::Idx {
        self.end() - self.start()
    }

    /// Check if the interval-like object contains a given position.
    fn contains(&self, pos: Self::Idx) -> bool {
        self.start() <= pos && pos < self.end()
    }

    /// Check if the interval-like object overlaps the half-open span [start, end).
    /// Touching spans do not overlap.
    fn overlaps(&self, start: Self::Idx, end: Self::Idx) -> bool {
        self.start() < end && start < self.end()
    }
}

impl<T: PrimInt> IntervalOp for Interval<T> {
    type Idx = T;

    #[inline(always)]
    fn start(&self) -> Self::Idx {
        self.start
    }
    #[inline(always)]
    fn end(&self) -> Self::Idx {
        self.end
    }
}

impl<Idx: PrimInt> Interval<Idx> {
    pub fn new(start: Idx, end: Idx) -> Result<Self> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(eyre!("Invalid interval: start >= end"))
        }
    }

    /// Interval of `radius` positions on both sides of the `center` boundary, i.e. [center - radius, center + radius).
    /// The result is clamped to `bounds`. Returns None if nothing is left after clamping.
    pub fn around(center: Idx, radius: Idx, bounds: &Self) -> Option<Self> {
        let start = center.saturating_sub(radius).max(bounds.start);
        let end = center.saturating_add(radius).min(bounds.end);
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }
}

impl<Idx: PrimInt + Display> Display for Interval<Idx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl<Idx: PrimInt> PartialEq<Range<Idx>> for Interval<Idx> {
    fn eq(&self, other: &Range<Idx>) -> bool {
        self.start == other.start && self.end == other.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct() {
        assert!(Interval::new(1, 2).is_ok());
        assert!(Interval::new(1, 1).is_err());
        assert!(Interval::new(2, 1).is_err());
        assert_eq!(Interval::new(3, 8).unwrap(), 3..8);
    }

    #[test]
    fn test_dissolve() {
        let (start, end) = Interval::new(3, 8).unwrap().dissolve();
        assert_eq!((start, end), (3, 8));
    }

    #[test]
    fn test_len_and_contains() {
        let interval = Interval::new(2usize, 6).unwrap();
        assert_eq!(interval.len(), 4);
        assert!(!interval.contains(1));
        assert!(interval.contains(2));
        assert!(interval.contains(5));
        assert!(!interval.contains(6));
    }

    #[test]
    fn test_overlaps() {
        let interval = Interval::new(2usize, 6).unwrap();
        // Exact match and partial overlaps
        assert!(interval.overlaps(2, 6));
        assert!(interval.overlaps(0, 3));
        assert!(interval.overlaps(5, 9));
        assert!(interval.overlaps(0, 10));
        // Touching spans
        assert!(!interval.overlaps(0, 2));
        assert!(!interval.overlaps(6, 8));
    }

    #[test]
    fn test_around() {
        let bounds = Interval::new(0usize, 20).unwrap();
        assert_eq!(Interval::around(10, 3, &bounds), Some(Interval::new(7, 13).unwrap()));
        assert_eq!(Interval::around(1, 3, &bounds), Some(Interval::new(0, 4).unwrap()));
        assert_eq!(Interval::around(19, 3, &bounds), Some(Interval::new(16, 20).unwrap()));
        assert_eq!(Interval::around(10, 0, &bounds), None);
        assert_eq!(Interval::around(25, 2, &bounds), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::new(2usize, 6).unwrap().to_string(), "[2, 6)");
    }
}
