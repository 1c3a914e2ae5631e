use celseq_core::models::{GenomicInterval, Strand};

use crate::label_set::LabelSet;

/// Read-only overlap lookup, the contract a read counter relies on.
pub trait LabelQuery: Send + Sync {
    /// Union of the labels of every run overlapping [start, end) on the
    /// given chromosome and strand. Unknown regions yield an empty set.
    fn query(&self, chrom: &str, strand: Strand, start: u32, end: u32) -> LabelSet;

    fn query_interval(&self, interval: &GenomicInterval) -> LabelSet {
        self.query(
            &interval.chrom,
            interval.strand,
            interval.start,
            interval.end,
        )
    }
}
