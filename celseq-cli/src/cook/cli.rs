use clap::{Arg, ArgAction, Command};

pub const COOK_CMD: &str = "cook";

pub fn create_cook_cli() -> Command {
    Command::new(COOK_CMD)
        .about("Build an annotation model (feature index + exported genes) from a GTF/GFF file.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("gff-file")
                .long("gff-file")
                .required(true)
                .help("Path to the GTF/GFF annotation (optionally .gz), or '-' for stdin"),
        )
        .arg(
            Arg::new("feature-attr")
                .long("feature-attr")
                .required(false)
                .help("Attribute whose value labels each feature, e.g. \"gene_id\" (default: gene_id)"),
        )
        .arg(
            Arg::new("feature-type")
                .long("feature-type")
                .required(false)
                .help("Feature type (3rd column) making up a gene, e.g. \"exon\" (default: exon)"),
        )
        .arg(
            Arg::new("gene-types")
                .long("gene-types")
                .required(false)
                .value_delimiter(',')
                .num_args(1..)
                .help("gene_biotype values to export, e.g. protein_coding,lincRNA (default: all)"),
        )
        .arg(
            Arg::new("strandless")
                .long("strandless")
                .action(ArgAction::SetTrue)
                .help("Ignore strand: plus and minus features share one coordinate space"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .required(false)
                .help("TOML file with model options; command-line flags take precedence"),
        )
        .arg(
            Arg::new("dumpto")
                .long("dumpto")
                .short('o')
                .default_value("annotation.bin")
                .help("File path to save the annotation model"),
        )
}
