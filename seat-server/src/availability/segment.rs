//! Validated boarding-to-alighting spans.

use std::fmt;

use super::overlap::segments_overlap;
use crate::domain::Ordinal;

/// Error returned when a segment's start is not before its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid segment: start {start} is not before end {end}")]
pub struct InvalidSegment {
    pub start: Ordinal,
    pub end: Ordinal,
}

/// A half-open `[start, end)` span of ordinals on one route.
///
/// `start < end` holds for every value of this type: `Segment::new` is the
/// only way to build one, so overlap checks never re-validate it.
///
/// # Examples
///
/// ```
/// use seat_server::availability::Segment;
/// use seat_server::domain::Ordinal;
///
/// let cairo_minya = Segment::new(Ordinal(0), Ordinal(3)).unwrap();
/// let minya_asyut = Segment::new(Ordinal(3), Ordinal(4)).unwrap();
///
/// // Adjacent segments share a stop but not a seat-span
/// assert!(!cairo_minya.overlaps(&minya_asyut));
///
/// // Zero-length and reversed segments do not exist
/// assert!(Segment::new(Ordinal(2), Ordinal(2)).is_err());
/// assert!(Segment::new(Ordinal(3), Ordinal(1)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    start: Ordinal,
    end: Ordinal,
}

impl Segment {
    pub fn new(start: Ordinal, end: Ordinal) -> Result<Self, InvalidSegment> {
        if start >= end {
            return Err(InvalidSegment { start, end });
        }
        Ok(Self { start, end })
    }

    /// Boarding position.
    pub fn start(&self) -> Ordinal {
        self.start
    }

    /// Alighting position.
    pub fn end(&self) -> Ordinal {
        self.end
    }

    /// Returns true if both segments need the seat over some leg.
    pub fn overlaps(&self, other: &Segment) -> bool {
        segments_overlap(self.start, self.end, other.start, other.end)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: usize, end: usize) -> Segment {
        Segment::new(Ordinal(start), Ordinal(end)).unwrap()
    }

    #[test]
    fn rejects_empty_and_reversed() {
        assert_eq!(
            Segment::new(Ordinal(2), Ordinal(2)).unwrap_err(),
            InvalidSegment {
                start: Ordinal(2),
                end: Ordinal(2)
            }
        );
        assert!(Segment::new(Ordinal(4), Ordinal(0)).is_err());
    }

    #[test]
    fn accessors() {
        let s = seg(1, 3);
        assert_eq!(s.start(), Ordinal(1));
        assert_eq!(s.end(), Ordinal(3));
        assert_eq!(s.to_string(), "[1, 3)");
    }

    #[test]
    fn nested_overlaps() {
        assert!(seg(0, 3).overlaps(&seg(1, 2)));
        assert!(seg(1, 2).overlaps(&seg(0, 3)));
    }

    #[test]
    fn identical_overlaps() {
        assert!(seg(0, 3).overlaps(&seg(0, 3)));
    }

    #[test]
    fn partial_overlaps() {
        assert!(seg(0, 2).overlaps(&seg(1, 4)));
        assert!(seg(1, 4).overlaps(&seg(0, 2)));
    }

    #[test]
    fn adjacent_does_not_overlap() {
        assert!(!seg(0, 3).overlaps(&seg(3, 4)));
        assert!(!seg(3, 4).overlaps(&seg(0, 3)));
    }

    #[test]
    fn disjoint_does_not_overlap() {
        assert!(!seg(0, 1).overlaps(&seg(2, 4)));
    }

    #[test]
    fn error_display() {
        let err = InvalidSegment {
            start: Ordinal(3),
            end: Ordinal(1),
        };
        assert_eq!(err.to_string(), "invalid segment: start 3 is not before end 1");
    }
}
