pub mod interval;
pub mod record;
pub mod strand;

// re-export for cleaner imports
pub use self::interval::GenomicInterval;
pub use self::record::AnnotationRecord;
pub use self::strand::Strand;
