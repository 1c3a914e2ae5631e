//! Strand-aware interval-label index for annotation models.
//!
//! Stores, per chromosome and strand bucket, a partition of the coordinate
//! axis into maximal runs of positions sharing the same set of feature labels.
//! Labels are unioned in as features are inserted, in any order, and overlap
//! queries return the union of every label touching the query range.
//!
//! ## Quick Start
//!
//! ```rust
//! use celseq_core::models::Strand;
//! use celseq_overlaprs::{IntervalLabelIndex, LabelQuery, StrandMode};
//!
//! let mut index = IntervalLabelIndex::new(StrandMode::Unstranded);
//! index.insert("chr1", Strand::Plus, 1000, 2000, "BRCA1").unwrap();
//! index.insert("chr1", Strand::Minus, 1500, 2500, "NBR2").unwrap();
//!
//! let hits = index.query("chr1", Strand::Plus, 1800, 1900);
//! let genes: Vec<&str> = hits.iter().collect();
//! assert_eq!(genes, vec!["BRCA1", "NBR2"]);
//! ```
//!
//! ## Performance
//!
//! Each bucket is a [`StepMap`], a `BTreeMap` keyed by run start. An insertion
//! locates its boundaries by predecessor lookup and only touches the runs it
//! overlaps, so unsorted annotation files are handled without re-scanning.

/// Run-length set storage for one coordinate axis.
///
/// See [`StepMap`] for details.
pub mod step_map;

/// Label sets attached to runs.
pub mod label_set;

/// Genome-wide, strand-aware index.
///
/// See the [`label_index`] module for details.
pub mod label_index;

/// Query trait used by index consumers.
pub mod traits;

// re-exports
pub use self::label_index::{IntervalLabelIndex, StrandMode};
pub use self::label_set::LabelSet;
pub use self::step_map::StepMap;
pub use self::traits::LabelQuery;
