//! Streaming reader for GTF and GFF3 annotation files.
//!
//! Records are produced lazily, one line at a time. Coordinates are converted
//! from the 1-based, inclusive convention of GTF/GFF to 0-based half-open
//! intervals.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::Path;

use anyhow::Result;
use celseq_core::errors::AnnotationError;
use celseq_core::models::{AnnotationRecord, GenomicInterval, Strand};
use celseq_core::utils::get_dynamic_reader;

const N_COLUMNS: usize = 9;
const FASTA_DIRECTIVE: &str = "##FASTA";

/// Iterator over the feature lines of a GTF/GFF file.
///
/// Comment and blank lines are skipped; reading stops at a `##FASTA`
/// directive. The first malformed line yields an error and ends iteration.
pub struct GtfReader<R: BufRead> {
    lines: Lines<R>,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> GtfReader<R> {
    pub fn new(reader: R) -> Self {
        GtfReader {
            lines: reader.lines(),
            line_no: 0,
            done: false,
        }
    }
}

impl GtfReader<BufReader<Box<dyn Read>>> {
    ///
    /// Open a plain or gzip'd (`.gz`) annotation file.
    ///
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(GtfReader::new(get_dynamic_reader(path)?))
    }
}

impl<R: BufRead> Iterator for GtfReader<R> {
    type Item = Result<AnnotationRecord, AnnotationError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            };
            self.line_no += 1;

            let line = line.trim_end_matches('\r');
            if line.starts_with(FASTA_DIRECTIVE) {
                self.done = true;
                break;
            }
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let record = parse_line(line, self.line_no);
            if record.is_err() {
                self.done = true;
            }
            return Some(record);
        }
        None
    }
}

/// Parse one tab-separated feature line.
pub fn parse_line(line: &str, line_no: usize) -> Result<AnnotationRecord, AnnotationError> {
    let parse_err = |reason: String| AnnotationError::RecordParseError {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = line.splitn(N_COLUMNS, '\t').collect();
    if fields.len() < N_COLUMNS {
        return Err(parse_err(format!(
            "expected {} tab-separated columns, found {}",
            N_COLUMNS,
            fields.len()
        )));
    }

    let start: u32 = fields[3]
        .trim()
        .parse()
        .map_err(|e| parse_err(format!("invalid start '{}': {}", fields[3], e)))?;
    let end: u32 = fields[4]
        .trim()
        .parse()
        .map_err(|e| parse_err(format!("invalid end '{}': {}", fields[4], e)))?;
    if start == 0 {
        return Err(parse_err("start coordinate must be 1-based".to_string()));
    }

    let strand = Strand::from_char(fields[6].trim().chars().next().unwrap_or('.'));

    // 1-based inclusive -> 0-based half-open: only the start moves
    let interval = GenomicInterval::new(fields[0], start - 1, end, strand)?;

    let attributes = parse_attributes(fields[8]).map_err(parse_err)?;

    Ok(AnnotationRecord::new(fields[2], interval, attributes))
}

/// Parse the attribute column.
///
/// Handles GTF (`gene_id "G1"; gene_biotype "lincRNA";`) and GFF3
/// (`ID=exon1;Parent=tx1`) styles. Semicolons inside double quotes belong to
/// the value. Surrounding quotes are stripped; when a key repeats, the last
/// value wins. An attribute with unbalanced quotes is an error.
pub fn parse_attributes(column: &str) -> Result<HashMap<String, String>, String> {
    let mut attributes = HashMap::new();

    for part in split_unquoted(column) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if part.matches('"').count() % 2 != 0 {
            return Err(format!("unbalanced quotes in attribute '{}'", part));
        }

        let pair = match part.split_once('=') {
            Some((key, value)) if !key.contains(char::is_whitespace) => Some((key, value)),
            _ => part.split_once(char::is_whitespace),
        };

        if let Some((key, value)) = pair {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            attributes.insert(key.trim().to_string(), value.to_string());
        }
    }

    Ok(attributes)
}

/// Split on `;` outside double quotes.
fn split_unquoted(column: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut begin = 0;

    for (i, c) in column.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                parts.push(&column[begin..i]);
                begin = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&column[begin..]);

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Cursor;

    const GTF: &str = "#!genome-build GRCh38\n\
        chr1\tensembl\tgene\t11\t100\t.\t+\t.\tgene_id \"G1\"; gene_biotype \"protein_coding\";\n\
        chr1\tensembl\texon\t11\t50\t.\t+\t.\tgene_id \"G1\"; exon_id \"E1\"; gene_biotype \"protein_coding\";\n\
        \n\
        chr2\tensembl\texon\t1\t1\t.\t-\t.\tgene_id \"G2\"; gene_biotype \"lincRNA\";\n";

    fn read_all(text: &str) -> Vec<Result<AnnotationRecord, AnnotationError>> {
        GtfReader::new(Cursor::new(text.to_string())).collect()
    }

    #[rstest]
    fn test_reads_gtf_records() {
        let records: Vec<AnnotationRecord> =
            read_all(GTF).into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 3);

        let exon = &records[1];
        assert_eq!(exon.feature_type, "exon");
        assert_eq!(
            exon.interval,
            GenomicInterval::new("chr1", 10, 50, Strand::Plus).unwrap()
        );
        assert_eq!(exon.attribute("gene_id"), Some("G1"));
        assert_eq!(exon.attribute("exon_id"), Some("E1"));

        // a single-base feature becomes a width-1 interval
        let last = &records[2];
        assert_eq!(last.interval.start, 0);
        assert_eq!(last.interval.end, 1);
        assert_eq!(last.interval.strand, Strand::Minus);
    }

    #[rstest]
    fn test_stops_at_fasta_directive() {
        let text = format!("{}##FASTA\n>chr1\nACGT\n", GTF);
        assert_eq!(read_all(&text).len(), 3);
    }

    #[rstest]
    #[case("chr1\tsrc\texon\t10\t20\t.\t+\t.", "columns")]
    #[case("chr1\tsrc\texon\tten\t20\t.\t+\t.\tgene_id \"G1\"", "invalid start")]
    #[case("chr1\tsrc\texon\t10\t-5\t.\t+\t.\tgene_id \"G1\"", "invalid end")]
    #[case("chr1\tsrc\texon\t0\t20\t.\t+\t.\tgene_id \"G1\"", "1-based")]
    fn test_malformed_lines(#[case] line: &str, #[case] reason: &str) {
        let res = read_all(line);
        assert_eq!(res.len(), 1);
        match &res[0] {
            Err(AnnotationError::RecordParseError { line, reason: r }) => {
                assert_eq!(*line, 1);
                assert!(r.contains(reason), "unexpected reason: {}", r);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[rstest]
    fn test_inverted_coordinates_are_invalid_range() {
        let res = read_all("chr1\tsrc\texon\t20\t10\t.\t+\t.\tgene_id \"G1\"\n");
        assert!(matches!(
            res[0],
            Err(AnnotationError::InvalidRange { start: 19, end: 10, .. })
        ));
    }

    #[rstest]
    fn test_iteration_ends_after_error() {
        let text = "chr1\tsrc\texon\tbad\t20\t.\t+\t.\tgene_id \"G1\"\n\
            chr1\tsrc\texon\t10\t20\t.\t+\t.\tgene_id \"G1\"\n";
        let res = read_all(text);
        assert_eq!(res.len(), 1);
        assert!(res[0].is_err());
    }

    #[rstest]
    #[case("gene_id \"G1\"; gene_name \"ABC\";", &[("gene_id", "G1"), ("gene_name", "ABC")])]
    #[case("ID=exon1;Parent=tx1;gene_id=G7", &[("ID", "exon1"), ("Parent", "tx1"), ("gene_id", "G7")])]
    #[case("gene_id \"a=b\"; level 2", &[("gene_id", "a=b"), ("level", "2")])]
    #[case("tag \"basic\"; tag \"CCDS\";", &[("tag", "CCDS")])]
    #[case("gene_id \" G1 \";", &[("gene_id", " G1 ")])]
    #[case(" ; ;", &[])]
    #[case(
        "gene_id \"G1\"; note \"see; gene_id G2\"; gene_biotype \"protein_coding\";",
        &[("gene_id", "G1"), ("note", "see; gene_id G2"), ("gene_biotype", "protein_coding")]
    )]
    #[case("Name=\"a;b\";ID=x", &[("Name", "a;b"), ("ID", "x")])]
    fn test_parse_attributes(#[case] column: &str, #[case] expected: &[(&str, &str)]) {
        let expected: HashMap<String, String> = expected
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(parse_attributes(column).unwrap(), expected);
    }

    #[rstest]
    #[case("gene_id \"G1; gene_biotype \"lincRNA\";")]
    #[case("gene_id \"G1\"; note \"open;")]
    #[case("gene_id G1\";")]
    fn test_unbalanced_quotes_are_rejected(#[case] column: &str) {
        let err = parse_attributes(column).unwrap_err();
        assert!(err.contains("unbalanced quotes"), "unexpected reason: {}", err);
    }

    #[rstest]
    fn test_unbalanced_quotes_fail_the_line() {
        let text = "chr1\tsrc\texon\t10\t20\t.\t+\t.\tgene_id \"G1\"\n\
            chr1\tsrc\texon\t30\t40\t.\t+\t.\tgene_id \"G2; exon_id \"E2\"\n";
        let res = read_all(text);
        assert_eq!(res.len(), 2);
        assert!(res[0].is_ok());
        assert!(matches!(
            res[1],
            Err(AnnotationError::RecordParseError { line: 2, .. })
        ));
    }
}
