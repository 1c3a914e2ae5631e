//! Annotation models for CEL-Seq2 style read counting.
//!
//! Reads a GTF/GFF annotation, indexes every feature of the chosen type under
//! the chosen attribute (e.g. exons under `gene_id`), and derives the list of
//! labels that quantification reports:
//!
//! - the [`IntervalLabelIndex`](celseq_overlaprs::IntervalLabelIndex) answers
//!   "which features overlap this read?"
//! - the exported gene list restricts reporting to, for instance,
//!   `protein_coding` and `lincRNA` genes, while reads are still assigned
//!   against the full annotation
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use celseq_annotation::{try_build_model, GtfReader, ModelOptions};
//!
//! let options = ModelOptions {
//!     gene_biotypes: ["protein_coding".to_string()].into(),
//!     ..Default::default()
//! };
//!
//! let reader = GtfReader::from_path(Path::new("genes.gtf.gz")).unwrap();
//! let model = try_build_model(reader, &options).unwrap();
//! model.save_bin("annotation.bin").unwrap();
//! ```

pub mod consts;
pub mod errors;
pub mod gtf;
pub mod ingest;
pub mod model;
pub mod options;

// re-exports
pub use errors::ModelIoError;
pub use gtf::GtfReader;
pub use ingest::{build_model, try_build_model};
pub use model::AnnotationModel;
pub use options::ModelOptions;
