use std::collections::BTreeSet;
use std::path::Path;

use celseq_overlaprs::StrandMode;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_FEATURE_ATTRIBUTE, DEFAULT_FEATURE_TYPE, GENE_ATTRIBUTE_PREFIX};
use crate::errors::ModelIoError;

/// Parameters controlling which records are indexed and which labels are
/// exported.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```
/// use celseq_annotation::ModelOptions;
///
/// let options = ModelOptions::from_toml_str(r#"
///     feature_attribute = "gene_name"
///     gene_biotypes = ["protein_coding", "lincRNA"]
/// "#).unwrap();
///
/// assert_eq!(options.feature_type, "exon");
/// assert!(options.stranded);
/// assert_eq!(options.gene_biotypes.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOptions {
    /// Attribute whose value becomes the label, e.g. `gene_id`.
    pub feature_attribute: String,
    /// Only records of this type (third GTF column) are used, e.g. `exon`.
    pub feature_type: String,
    /// `gene_biotype` values allowed into the exported list. Empty means no
    /// filter.
    pub gene_biotypes: BTreeSet<String>,
    /// Keep plus and minus strands in separate coordinate spaces.
    pub stranded: bool,
    /// Whether `feature_attribute` is a gene-level attribute, which enables
    /// biotype filtering. `None` infers it from the `gene` name prefix.
    pub gene_level: Option<bool>,
}

impl Default for ModelOptions {
    fn default() -> Self {
        ModelOptions {
            feature_attribute: DEFAULT_FEATURE_ATTRIBUTE.to_string(),
            feature_type: DEFAULT_FEATURE_TYPE.to_string(),
            gene_biotypes: BTreeSet::new(),
            stranded: true,
            gene_level: None,
        }
    }
}

impl ModelOptions {
    pub fn is_gene_level(&self) -> bool {
        self.gene_level
            .unwrap_or_else(|| self.feature_attribute.starts_with(GENE_ATTRIBUTE_PREFIX))
    }

    pub fn strand_mode(&self) -> StrandMode {
        StrandMode::from(self.stranded)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ModelIoError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelIoError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("gene_id", None, true)]
    #[case("gene_name", None, true)]
    #[case("exon_id", None, false)]
    #[case("transcript_id", None, false)]
    #[case("Gene_id", None, false)]
    #[case("locus", Some(true), true)]
    #[case("gene_id", Some(false), false)]
    fn test_gene_level(
        #[case] attribute: &str,
        #[case] gene_level: Option<bool>,
        #[case] expected: bool,
    ) {
        let options = ModelOptions {
            feature_attribute: attribute.to_string(),
            gene_level,
            ..Default::default()
        };
        assert_eq!(options.is_gene_level(), expected);
    }

    #[rstest]
    fn test_empty_toml_gives_defaults() {
        let options = ModelOptions::from_toml_str("").unwrap();
        assert_eq!(options, ModelOptions::default());
        assert_eq!(options.strand_mode(), StrandMode::Stranded);
    }

    #[rstest]
    fn test_toml_overrides() {
        let options = ModelOptions::from_toml_str(
            r#"
            feature_type = "CDS"
            stranded = false
            gene_level = true
            "#,
        )
        .unwrap();
        assert_eq!(options.feature_type, "CDS");
        assert_eq!(options.strand_mode(), StrandMode::Unstranded);
        assert_eq!(options.gene_level, Some(true));
        assert_eq!(options.feature_attribute, "gene_id");
    }

    #[rstest]
    fn test_bad_toml_is_config_error() {
        let res = ModelOptions::from_toml_str("stranded = \"maybe\"");
        assert!(matches!(res, Err(ModelIoError::Config(_))));
    }

    #[rstest]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.toml");
        std::fs::write(&path, "gene_biotypes = [\"protein_coding\"]\n").unwrap();

        let options = ModelOptions::from_toml_file(&path).unwrap();
        assert!(options.gene_biotypes.contains("protein_coding"));
    }
}
