use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use celseq_core::models::Strand;
use celseq_overlaprs::{IntervalLabelIndex, LabelQuery, LabelSet};
use serde::{Deserialize, Serialize};

use crate::consts::{MODEL_FORMAT_VERSION, MODEL_MAGIC};
use crate::errors::ModelIoError;
use crate::options::ModelOptions;

/// The output of an annotation build: the interval-label index used for
/// counting and the sorted list of labels that get reported.
///
/// Quantification uses every indexed feature, but only the exported ones are
/// attributed reads in the final table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationModel {
    features: IntervalLabelIndex,
    exported_genes: Vec<String>,
    options: ModelOptions,
}

impl AnnotationModel {
    /// `exported_genes` must already be sorted and deduplicated.
    pub(crate) fn new(
        features: IntervalLabelIndex,
        exported_genes: Vec<String>,
        options: ModelOptions,
    ) -> Self {
        debug_assert!(exported_genes.windows(2).all(|w| w[0] < w[1]));
        AnnotationModel {
            features,
            exported_genes,
            options,
        }
    }

    pub fn features(&self) -> &IntervalLabelIndex {
        &self.features
    }

    /// Exported labels, sorted and without duplicates.
    pub fn exported_genes(&self) -> &[String] {
        &self.exported_genes
    }

    /// The options this model was built with.
    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    pub fn is_exported(&self, label: &str) -> bool {
        self.exported_genes
            .binary_search_by(|g| g.as_str().cmp(label))
            .is_ok()
    }

    /// Serialize the model to a binary cache file.
    ///
    /// Format: 4 magic bytes, a little-endian `u32` format version, then the
    /// bincode encoding of the model.
    pub fn save_bin<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelIoError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(&MODEL_MAGIC)?;
        writer.write_all(&MODEL_FORMAT_VERSION.to_le_bytes())?;
        bincode::serialize_into(&mut writer, self)?;
        writer.flush()?;

        Ok(())
    }

    /// Deserialize a model written by [`AnnotationModel::save_bin`].
    pub fn load_bin<P: AsRef<Path>>(path: P) -> Result<Self, ModelIoError> {
        let mut reader = BufReader::new(File::open(path.as_ref())?);

        let invalid = || {
            ModelIoError::InvalidModelFile(format!(
                "{} is not an annotation model, regenerate it with 'celseq cook'",
                path.as_ref().display()
            ))
        };

        let mut header = [0u8; 8];
        if let Err(e) = reader.read_exact(&mut header) {
            return Err(match e.kind() {
                ErrorKind::UnexpectedEof => invalid(),
                _ => e.into(),
            });
        }
        if header[..4] != MODEL_MAGIC {
            return Err(invalid());
        }

        let mut version = [0u8; 4];
        version.copy_from_slice(&header[4..]);
        let version = u32::from_le_bytes(version);
        if version != MODEL_FORMAT_VERSION {
            return Err(ModelIoError::UnsupportedVersion(version));
        }

        Ok(bincode::deserialize_from(reader)?)
    }
}

impl LabelQuery for AnnotationModel {
    fn query(&self, chrom: &str, strand: Strand, start: u32, end: u32) -> LabelSet {
        self.features.query(chrom, strand, start, end)
    }
}
