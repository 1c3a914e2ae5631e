use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use celseq_annotation::{GtfReader, ModelOptions, try_build_model};
use celseq_core::utils::get_dynamic_reader_w_stdin;

/// Start from the config file (or defaults) and apply command-line overrides.
pub fn resolve_options(matches: &ArgMatches) -> Result<ModelOptions> {
    let mut options = match matches.get_one::<String>("config") {
        Some(path) => ModelOptions::from_toml_file(path)
            .with_context(|| format!("Failed to load model options from {}", path))?,
        None => ModelOptions::default(),
    };

    if let Some(attr) = matches.get_one::<String>("feature-attr") {
        options.feature_attribute = attr.clone();
    }
    if let Some(feature_type) = matches.get_one::<String>("feature-type") {
        options.feature_type = feature_type.clone();
    }
    if let Some(gene_types) = matches.get_many::<String>("gene-types") {
        options.gene_biotypes = gene_types
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if matches.get_flag("strandless") {
        options.stranded = false;
    }

    Ok(options)
}

pub fn run_cook(matches: &ArgMatches) -> Result<()> {
    let gff_file = matches
        .get_one::<String>("gff-file")
        .expect("A path to a GTF/GFF file is required.");
    let dumpto = matches
        .get_one::<String>("dumpto")
        .expect("dumpto has a default value");

    let options = resolve_options(matches)?;
    info!("Cooking annotation model with {:?}", options);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg} ({per_sec})")
            .unwrap()
            .tick_strings(&["-", "\\", "|", "/"]),
    );
    spinner.set_message(format!("Processing {}...", gff_file));

    let start = Instant::now();
    let reader = GtfReader::new(get_dynamic_reader_w_stdin(gff_file)?);
    let mut processed: u64 = 0;
    let records = reader.inspect(|_| {
        processed += 1;
        if processed % 100_000 == 0 {
            spinner.set_message(format!("Processed {} lines of GFF", processed));
        }
        spinner.inc(1);
    });

    let model = try_build_model(records, &options)
        .with_context(|| format!("Failed to build annotation model from {}", gff_file))?;
    spinner.finish_and_clear();

    eprintln!(
        "Indexed {} runs on {} chromosomes, exporting {} genes ({:.1}s)",
        model.features().n_runs(),
        model.features().chromosomes().count(),
        model.exported_genes().len(),
        start.elapsed().as_secs_f64()
    );

    eprintln!("Saving annotation model: {}", dumpto);
    model
        .save_bin(Path::new(dumpto))
        .with_context(|| format!("Failed to save annotation model to {}", dumpto))?;

    let size = std::fs::metadata(dumpto).map(|m| m.len()).unwrap_or(0);
    eprintln!("  wrote {} ({:.1} MB)", dumpto, size as f64 / 1_048_576.0);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cook::cli::create_cook_cli;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn matches_from(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["cook", "--gff-file", "genes.gtf"];
        argv.extend_from_slice(args);
        create_cook_cli().try_get_matches_from(argv).unwrap()
    }

    #[rstest]
    fn test_defaults() {
        let options = resolve_options(&matches_from(&[])).unwrap();
        assert_eq!(options, ModelOptions::default());
    }

    #[rstest]
    fn test_flag_overrides() {
        let options = resolve_options(&matches_from(&[
            "--feature-attr",
            "gene_name",
            "--feature-type",
            "CDS",
            "--gene-types",
            "protein_coding,lincRNA",
            "--strandless",
        ]))
        .unwrap();

        assert_eq!(options.feature_attribute, "gene_name");
        assert_eq!(options.feature_type, "CDS");
        assert!(!options.stranded);
        assert_eq!(
            options.gene_biotypes.into_iter().collect::<Vec<_>>(),
            vec!["lincRNA".to_string(), "protein_coding".to_string()]
        );
    }

    #[rstest]
    fn test_flags_take_precedence_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("opts.toml");
        std::fs::write(&config, "feature_attribute = \"exon_id\"\nstranded = false\n").unwrap();

        let options = resolve_options(&matches_from(&[
            "--config",
            config.to_str().unwrap(),
            "--feature-attr",
            "gene_id",
        ]))
        .unwrap();

        assert_eq!(options.feature_attribute, "gene_id");
        assert!(!options.stranded);
    }

    #[rstest]
    fn test_cook_writes_loadable_model() {
        let gtf = concat!(env!("CARGO_MANIFEST_DIR"), "/../tests/data/annotation/small.gtf");
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("annotation.bin");

        let matches = create_cook_cli()
            .try_get_matches_from([
                "cook",
                "--gff-file",
                gtf,
                "--gene-types",
                "protein_coding",
                "--dumpto",
                out.to_str().unwrap(),
            ])
            .unwrap();
        run_cook(&matches).unwrap();

        let model = celseq_annotation::AnnotationModel::load_bin(&out).unwrap();
        assert_eq!(model.exported_genes(), ["G1".to_string(), "G3".to_string()]);
    }
}
