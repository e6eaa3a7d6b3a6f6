use clap::{Arg, ArgAction, Command, value_parser};

pub const RP_BATCH_CMD: &str = "rp-batch";

pub fn create_rp_batch_cli() -> Command {
    Command::new(RP_BATCH_CMD)
        .about("Compute the gene x sample RP matrix of many peak files in parallel.")
        .arg(
            Arg::new("beds")
                .long("beds")
                .required(true)
                .num_args(1..)
                .help("Peak files, one per sample; column order follows this list"),
        )
        .arg(
            Arg::new("genome")
                .long("genome")
                .required(false)
                .help("Genome build: hg38 or mm10 (default: hg38)"),
        )
        .arg(
            Arg::new("decay")
                .long("decay")
                .required(false)
                .value_parser(value_parser!(f64))
                .help("Distance in bp over which a peak's contribution halves (default: 10000)"),
        )
        .arg(
            Arg::new("workers")
                .long("workers")
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Number of worker threads (default: available cores)"),
        )
        .arg(
            Arg::new("assets-dir")
                .long("assets-dir")
                .required(false)
                .help("Directory with <genome>.len and <genome>_refseq_TSS.bed (default: $TFSAGE_ASSETS)"),
        )
        .arg(
            Arg::new("strict-bounds")
                .long("strict-bounds")
                .action(ArgAction::SetTrue)
                .help("Fail on peaks outside the genome instead of scoring them"),
        )
        .arg(
            Arg::new("no-progress")
                .long("no-progress")
                .action(ArgAction::SetTrue)
                .help("Hide the progress bar"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .required(false)
                .help("TOML file with RP settings; flags override it"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .required(true)
                .help("Output matrix TSV (.gz to compress)"),
        )
}
