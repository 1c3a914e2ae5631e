use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

/// Open an annotation file for buffered reading.
///
/// Files ending in `.gz` are decompressed on the fly; multi-member archives
/// (as written by `bgzip`) are read to the end.
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open annotation file {}", path.display()))?;

    let source: Box<dyn Read> = if path.extension() == Some(OsStr::new("gz")) {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };

    Ok(BufReader::new(source))
}

/// Same as [`get_dynamic_reader`], except that `-` reads the annotation
/// from stdin, so `zcat genes.gtf.gz | celseq cook --gff-file -` works.
pub fn get_dynamic_reader_w_stdin(path: &str) -> Result<BufReader<Box<dyn Read>>> {
    match path {
        "-" => Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>)),
        _ => get_dynamic_reader(Path::new(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, Write};

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_reads_plain_and_gzipped_files() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("anno.gtf");
        let gz = dir.path().join("anno.gtf.gz");

        std::fs::write(&plain, "line1\nline2\n").unwrap();

        let mut enc = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        enc.write_all(b"line1\nline2\n").unwrap();
        enc.finish().unwrap();

        for path in [plain, gz] {
            let lines: Vec<String> = get_dynamic_reader(&path)
                .unwrap()
                .lines()
                .map(|l| l.unwrap())
                .collect();
            assert_eq!(lines, vec!["line1".to_string(), "line2".to_string()]);
        }
    }

    #[rstest]
    fn test_missing_file_has_context() {
        let err = get_dynamic_reader(Path::new("does/not/exist.gtf")).err().expect("expected error");
        assert!(format!("{}", err).contains("Failed to open annotation file"));
    }
}
