//! Core models shared by the celseq crates.
//!
//! Holds the genomic interval, strand and annotation record types consumed by
//! the interval-label index and the annotation ingestor, plus the error type
//! they share and a small gz-aware reader utility.

pub mod errors;
pub mod models;
pub mod utils;

pub use errors::AnnotationError;
