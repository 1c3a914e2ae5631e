use std::fmt::{self, Display};

use crate::errors::AnnotationError;
use crate::models::Strand;

/// Represent a stranded range on a chromosome, from [start, end)
/// Inclusive start, exclusive of end, 0-based.
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenomicInterval {
    pub chrom: String,
    pub start: u32,
    pub end: u32,
    pub strand: Strand,
}

impl GenomicInterval {
    ///
    /// Create a new interval, rejecting empty or inverted ranges.
    ///
    pub fn new(
        chrom: impl Into<String>,
        start: u32,
        end: u32,
        strand: Strand,
    ) -> Result<Self, AnnotationError> {
        let chrom = chrom.into();
        if start >= end {
            return Err(AnnotationError::InvalidRange { chrom, start, end });
        }
        Ok(GenomicInterval {
            chrom,
            start,
            end,
            strand,
        })
    }
}

impl Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}({})", self.chrom, self.start, self.end, self.strand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_new_interval() {
        let iv = GenomicInterval::new("chr1", 10, 20, Strand::Plus).unwrap();
        assert_eq!((iv.start, iv.end), (10, 20));
        assert_eq!(iv.to_string(), "chr1:10-20(+)");
    }

    #[rstest]
    #[case(10, 10)]
    #[case(20, 10)]
    fn test_rejects_empty_or_inverted(#[case] start: u32, #[case] end: u32) {
        let res = GenomicInterval::new("chr1", start, end, Strand::Minus);
        assert!(matches!(res, Err(AnnotationError::InvalidRange { .. })));
    }
}
