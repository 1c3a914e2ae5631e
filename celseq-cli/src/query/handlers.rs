use std::io::{self, BufWriter, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;

use celseq_annotation::AnnotationModel;
use celseq_core::models::Strand;

/// Write one line per overlapping label: `label<TAB>exported|hidden`.
pub fn write_hits<W: Write>(
    model: &AnnotationModel,
    chrom: &str,
    strand: Strand,
    start: u32,
    end: u32,
    out: &mut W,
) -> Result<usize> {
    if start >= end {
        anyhow::bail!("Invalid query range {}:{}-{}", chrom, start, end);
    }

    let hits = model.features().try_query(chrom, strand, start, end);
    let hits = match hits {
        Ok(hits) => hits,
        Err(e) => {
            log::warn!("{}", e);
            return Ok(0);
        }
    };

    for label in hits.iter() {
        let status = if model.is_exported(label) {
            "exported"
        } else {
            "hidden"
        };
        writeln!(out, "{}\t{}", label, status)?;
    }

    Ok(hits.len())
}

pub fn run_query(matches: &ArgMatches) -> Result<()> {
    let model_path = matches
        .get_one::<String>("model")
        .expect("A path to an annotation model is required.");
    let chrom = matches
        .get_one::<String>("chrom")
        .expect("A chromosome is required.");
    let start = *matches.get_one::<u32>("start").expect("start is required");
    let end = *matches.get_one::<u32>("end").expect("end is required");
    let strand = matches
        .get_one::<String>("strand")
        .map(|s| Strand::from_str(s).unwrap_or_default())
        .unwrap_or_default();

    let model = AnnotationModel::load_bin(model_path)
        .with_context(|| format!("Failed to load annotation model from {}", model_path))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_hits(&model, chrom, strand, start, end, &mut out)?;
    out.flush()?;

    Ok(())
}
