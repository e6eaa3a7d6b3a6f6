use clap::{Arg, Command, value_parser};

pub const NEAREST_CMD: &str = "nearest";

pub fn create_nearest_cli() -> Command {
    Command::new(NEAREST_CMD)
        .about("Rank samples by embedding distance to one experiment.")
        .arg(
            Arg::new("embeddings")
                .long("embeddings")
                .required(true)
                .help("Embedding TSV, one row per sample"),
        )
        .arg(
            Arg::new("metadata")
                .long("metadata")
                .required(true)
                .help("Metadata TSV, first column is the sample id"),
        )
        .arg(
            Arg::new("experiment")
                .long("experiment")
                .required(true)
                .help("Sample id to rank the others against"),
        )
        .arg(
            Arg::new("metric")
                .long("metric")
                .required(false)
                .default_value("correlation")
                .help("Distance metric: correlation, cosine or euclidean"),
        )
        .arg(
            Arg::new("sigma-sq")
                .long("sigma-sq")
                .required(false)
                .value_parser(value_parser!(f64))
                .help("Variance of the Gaussian score (default: estimated from the distances)"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .required(true)
                .help("Output TSV (.gz to compress)"),
        )
}
