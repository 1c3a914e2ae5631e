//! Genome-wide, strand-aware interval-label index.
//!
//! This module provides [`IntervalLabelIndex`], which keeps one
//! [`StepMap`](crate::StepMap) per chromosome and strand bucket and answers
//! overlap queries across the whole genome.
//!
//! # Examples
//!
//! ```
//! use celseq_core::models::Strand;
//! use celseq_overlaprs::{IntervalLabelIndex, LabelQuery, LabelSet, StrandMode};
//!
//! let mut index = IntervalLabelIndex::new(StrandMode::Stranded);
//! index.insert("chr1", Strand::Plus, 0, 100, "A").unwrap();
//! index.insert("chr1", Strand::Plus, 50, 150, "B").unwrap();
//!
//! assert_eq!(index.query("chr1", Strand::Plus, 60, 70), LabelSet::from_iter(["A", "B"]));
//! // the minus strand is a separate coordinate space
//! assert!(index.query("chr1", Strand::Minus, 60, 70).is_empty());
//! ```

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use celseq_core::errors::AnnotationError;
use celseq_core::models::{GenomicInterval, Strand};
use serde::{Deserialize, Serialize};

use crate::label_set::LabelSet;
use crate::step_map::StepMap;
use crate::traits::LabelQuery;

/// Whether plus and minus strand features live in separate coordinate spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrandMode {
    /// `+` and `-` are indexed independently.
    Stranded,
    /// Strand is ignored; everything lands in one space per chromosome.
    Unstranded,
}

impl StrandMode {
    pub fn is_stranded(&self) -> bool {
        matches!(self, StrandMode::Stranded)
    }

    /// The buckets a query on `strand` reads from.
    ///
    /// In stranded mode a query of unknown strand looks at both strands.
    fn buckets(&self, strand: Strand) -> &'static [Strand] {
        match (self, strand) {
            (StrandMode::Unstranded, _) => &[Strand::Unknown],
            (StrandMode::Stranded, Strand::Plus) => &[Strand::Plus],
            (StrandMode::Stranded, Strand::Minus) => &[Strand::Minus],
            (StrandMode::Stranded, Strand::Unknown) => &[Strand::Plus, Strand::Minus],
        }
    }
}

impl From<bool> for StrandMode {
    fn from(stranded: bool) -> Self {
        if stranded {
            StrandMode::Stranded
        } else {
            StrandMode::Unstranded
        }
    }
}

impl Display for StrandMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrandMode::Stranded => write!(f, "stranded"),
            StrandMode::Unstranded => write!(f, "unstranded"),
        }
    }
}

/// A genome-wide index mapping coordinates to the set of labels overlapping
/// them.
///
/// Insertions are unions: a position carries every label ever inserted over
/// it. Buckets are created on demand; the index only grows.
///
/// # Examples
///
/// See the [module-level documentation](self) for usage examples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalLabelIndex {
    chroms: BTreeMap<String, BTreeMap<Strand, StepMap>>,
    strand_mode: StrandMode,
}

impl IntervalLabelIndex {
    pub fn new(strand_mode: StrandMode) -> Self {
        IntervalLabelIndex {
            chroms: BTreeMap::new(),
            strand_mode,
        }
    }

    pub fn strand_mode(&self) -> StrandMode {
        self.strand_mode
    }

    /// Union `label` into every position of [start, end) on `chrom`/`strand`.
    ///
    /// # Errors
    ///
    /// [`AnnotationError::InvalidRange`] if `start >= end`,
    /// [`AnnotationError::EmptyLabel`] if `label` is empty and
    /// [`AnnotationError::UnstrandedFeature`] if a stranded index is given a
    /// feature of unknown strand. The index is left untouched on error.
    pub fn insert(
        &mut self,
        chrom: &str,
        strand: Strand,
        start: u32,
        end: u32,
        label: &str,
    ) -> Result<(), AnnotationError> {
        if start >= end {
            return Err(AnnotationError::InvalidRange {
                chrom: chrom.to_string(),
                start,
                end,
            });
        }
        if label.is_empty() {
            return Err(AnnotationError::EmptyLabel {
                chrom: chrom.to_string(),
                start,
                end,
            });
        }

        if self.strand_mode.is_stranded() && !strand.is_known() {
            return Err(AnnotationError::UnstrandedFeature {
                chrom: chrom.to_string(),
                start,
                end,
            });
        }

        let bucket = match self.strand_mode {
            StrandMode::Unstranded => Strand::Unknown,
            StrandMode::Stranded => strand,
        };
        self.chroms
            .entry(chrom.to_string())
            .or_default()
            .entry(bucket)
            .or_default()
            .insert(start, end, label);

        Ok(())
    }

    pub fn insert_interval(
        &mut self,
        interval: &GenomicInterval,
        label: &str,
    ) -> Result<(), AnnotationError> {
        self.insert(
            &interval.chrom,
            interval.strand,
            interval.start,
            interval.end,
            label,
        )
    }

    /// Like [`LabelQuery::query`], but tells apart a region that is simply
    /// empty from a chromosome or strand bucket that was never populated.
    pub fn try_query(
        &self,
        chrom: &str,
        strand: Strand,
        start: u32,
        end: u32,
    ) -> Result<LabelSet, AnnotationError> {
        let buckets = self
            .chroms
            .get(chrom)
            .ok_or_else(|| AnnotationError::UnknownChromosome(chrom.to_string()))?;

        let mut hits = LabelSet::new();
        let mut found = false;
        for bucket in self.strand_mode.buckets(strand) {
            if let Some(steps) = buckets.get(bucket) {
                found = true;
                hits.union_with(&steps.query(start, end));
            }
        }

        if !found {
            return Err(AnnotationError::UnknownStrandBucket {
                chrom: chrom.to_string(),
                strand: strand.as_char(),
            });
        }

        Ok(hits)
    }

    /// Labeled runs of one bucket as `(start, end, labels)`.
    ///
    /// `strand` is ignored for unstranded indexes. Yields nothing for an
    /// unknown chromosome or bucket.
    pub fn runs<'a>(
        &'a self,
        chrom: &str,
        strand: Strand,
    ) -> Box<dyn Iterator<Item = (u32, u32, &'a LabelSet)> + 'a> {
        let bucket = match self.strand_mode {
            StrandMode::Unstranded => Strand::Unknown,
            StrandMode::Stranded => strand,
        };
        match self.chroms.get(chrom).and_then(|b| b.get(&bucket)) {
            Some(steps) => Box::new(steps.runs()),
            None => Box::new(std::iter::empty()),
        }
    }

    /// Chromosomes with at least one inserted feature, in sorted order.
    pub fn chromosomes(&self) -> impl Iterator<Item = &str> {
        self.chroms.keys().map(String::as_str)
    }

    /// Total number of labeled runs over all buckets.
    pub fn n_runs(&self) -> usize {
        self.chroms
            .values()
            .flat_map(|buckets| buckets.values())
            .map(StepMap::n_runs)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chroms.is_empty()
    }

    /// Fold another index into this one, e.g. a shard built separately for a
    /// different set of chromosomes.
    ///
    /// Every run of `other` is unioned in, so overlapping shards are merged
    /// correctly too.
    pub fn merge(&mut self, other: IntervalLabelIndex) -> Result<(), AnnotationError> {
        if other.strand_mode != self.strand_mode {
            return Err(AnnotationError::IncompatibleStrandMode(
                other.strand_mode.to_string(),
                self.strand_mode.to_string(),
            ));
        }

        for (chrom, buckets) in other.chroms {
            let target = self.chroms.entry(chrom).or_default();
            for (bucket, steps) in buckets {
                let into = target.entry(bucket).or_default();
                for (start, end, labels) in steps.runs() {
                    for label in labels.iter() {
                        into.insert(start, end, label);
                    }
                }
            }
        }

        Ok(())
    }
}

impl LabelQuery for IntervalLabelIndex {
    fn query(&self, chrom: &str, strand: Strand, start: u32, end: u32) -> LabelSet {
        self.try_query(chrom, strand, start, end)
            .unwrap_or_default()
    }
}
