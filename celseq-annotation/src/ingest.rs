use std::collections::BTreeSet;

use celseq_core::errors::AnnotationError;
use celseq_core::models::AnnotationRecord;
use celseq_overlaprs::IntervalLabelIndex;
use log::{debug, info};

use crate::consts::{BIOTYPE_ATTRIBUTE, PROGRESS_INTERVAL};
use crate::model::AnnotationModel;
use crate::options::ModelOptions;

///
/// Build an annotation model from a stream of records.
///
/// Each record of type `options.feature_type` has its `options.feature_attribute`
/// value (trimmed) unioned into the index over the record's interval, and is
/// added to the exported list when it passes the biotype filter.
///
/// # Errors
///
/// The first [`AnnotationError::MissingAttribute`],
/// [`AnnotationError::InvalidRange`] or [`AnnotationError::UnstrandedFeature`]
/// (a `.` strand feature while `options.stranded` is set) aborts the build; no
/// partial model is returned.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use celseq_annotation::{build_model, ModelOptions};
/// use celseq_core::models::{AnnotationRecord, GenomicInterval, Strand};
/// use celseq_overlaprs::LabelQuery;
///
/// let exon = AnnotationRecord::new(
///     "exon",
///     GenomicInterval::new("chr1", 100, 200, Strand::Plus).unwrap(),
///     HashMap::from([("gene_id".to_string(), "G1".to_string())]),
/// );
///
/// let model = build_model(vec![exon], &ModelOptions::default()).unwrap();
///
/// assert_eq!(model.exported_genes(), ["G1".to_string()]);
/// assert!(model.query("chr1", Strand::Plus, 150, 160).contains("G1"));
/// ```
pub fn build_model<I>(
    records: I,
    options: &ModelOptions,
) -> Result<AnnotationModel, AnnotationError>
where
    I: IntoIterator<Item = AnnotationRecord>,
{
    try_build_model(records.into_iter().map(Ok), options)
}

///
/// Same as [`build_model`], for streams that can fail part way, such as a
/// [`GtfReader`](crate::GtfReader). The first stream error aborts the build.
///
pub fn try_build_model<I>(
    records: I,
    options: &ModelOptions,
) -> Result<AnnotationModel, AnnotationError>
where
    I: IntoIterator<Item = Result<AnnotationRecord, AnnotationError>>,
{
    let mut features = IntervalLabelIndex::new(options.strand_mode());
    let mut exported_genes: BTreeSet<String> = BTreeSet::new();
    let gene_level = options.is_gene_level();

    let mut n_records: usize = 0;
    let mut n_features: usize = 0;

    for record in records {
        let record = record?;

        n_records += 1;
        if n_records % PROGRESS_INTERVAL == 0 {
            debug!("Processed {} annotation records", n_records);
        }

        if record.feature_type != options.feature_type {
            continue;
        }

        let label = record
            .attribute(&options.feature_attribute)
            .map(str::trim)
            .ok_or_else(|| AnnotationError::MissingAttribute {
                attribute: options.feature_attribute.clone(),
                chrom: record.interval.chrom.clone(),
                start: record.interval.start,
                end: record.interval.end,
            })?;

        features.insert_interval(&record.interval, label)?;
        n_features += 1;

        if is_exported(&record, gene_level, &options.gene_biotypes)
            && !exported_genes.contains(label)
        {
            exported_genes.insert(label.to_string());
        }
    }

    info!(
        "Processed {} annotation records: {} '{}' features indexed, {} exported labels",
        n_records,
        n_features,
        options.feature_type,
        exported_genes.len()
    );

    Ok(AnnotationModel::new(
        features,
        exported_genes.into_iter().collect(),
        options.clone(),
    ))
}

/// Non gene-level labels are always reported; gene-level ones only when no
/// biotype filter is set or their `gene_biotype` is allowed.
fn is_exported(record: &AnnotationRecord, gene_level: bool, biotypes: &BTreeSet<String>) -> bool {
    if !gene_level || biotypes.is_empty() {
        return true;
    }
    record
        .attribute(BIOTYPE_ATTRIBUTE)
        .is_some_and(|biotype| biotypes.contains(biotype))
}
