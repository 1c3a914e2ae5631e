use thiserror::Error;

/// Errors raised while reading annotation records and building the
/// interval-label index.
#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("Invalid range {chrom}:{start}-{end}: start must be strictly less than end")]
    InvalidRange { chrom: String, start: u32, end: u32 },

    #[error("Refusing to insert an empty label at {chrom}:{start}-{end}")]
    EmptyLabel { chrom: String, start: u32, end: u32 },

    #[error("Record at {chrom}:{start}-{end} is missing required attribute '{attribute}'")]
    MissingAttribute {
        attribute: String,
        chrom: String,
        start: u32,
        end: u32,
    },

    #[error("Feature at {chrom}:{start}-{end} has no strand but the index is stranded")]
    UnstrandedFeature { chrom: String, start: u32, end: u32 },

    #[error("Unknown chromosome: {0}")]
    UnknownChromosome(String),

    #[error("Unknown strand bucket '{strand}' on chromosome {chrom}")]
    UnknownStrandBucket { chrom: String, strand: char },

    #[error("Error parsing annotation record at line {line}: {reason}")]
    RecordParseError { line: usize, reason: String },

    #[error("Cannot merge a {0} index into a {1} index")]
    IncompatibleStrandMode(String, String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
