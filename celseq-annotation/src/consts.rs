pub const DEFAULT_FEATURE_ATTRIBUTE: &str = "gene_id";
pub const DEFAULT_FEATURE_TYPE: &str = "exon";

/// Attributes starting with this prefix are treated as gene-level.
pub const GENE_ATTRIBUTE_PREFIX: &str = "gene";
pub const BIOTYPE_ATTRIBUTE: &str = "gene_biotype";

/// Log progress every this many records.
pub const PROGRESS_INTERVAL: usize = 100_000;

/// Magic bytes for the annotation model cache: "CSAM".
pub const MODEL_MAGIC: [u8; 4] = *b"CSAM";
pub const MODEL_FORMAT_VERSION: u32 = 1;
