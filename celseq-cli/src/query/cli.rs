use clap::{Arg, Command, value_parser};

pub const QUERY_CMD: &str = "query";

pub fn create_query_cli() -> Command {
    Command::new(QUERY_CMD)
        .about("Look up the features overlapping a region in a saved annotation model.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("model")
                .long("model")
                .short('m')
                .required(true)
                .help("Annotation model written by 'celseq cook'"),
        )
        .arg(
            Arg::new("chrom")
                .long("chrom")
                .required(true)
                .help("Chromosome name"),
        )
        .arg(
            Arg::new("start")
                .long("start")
                .required(true)
                .value_parser(value_parser!(u32))
                .help("0-based start (inclusive)"),
        )
        .arg(
            Arg::new("end")
                .long("end")
                .required(true)
                .value_parser(value_parser!(u32))
                .help("0-based end (exclusive)"),
        )
        .arg(
            Arg::new("strand")
                .long("strand")
                .default_value(".")
                .allow_hyphen_values(true)
                .help("Strand of the query: +, - or . for either"),
        )
}
