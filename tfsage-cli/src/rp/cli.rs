use clap::{Arg, ArgAction, Command, value_parser};

pub const RP_CMD: &str = "rp";

pub fn create_rp_cli() -> Command {
    Command::new(RP_CMD)
        .about("Compute the regulatory potential of every gene for one peak file.")
        .arg(
            Arg::new("bed")
                .long("bed")
                .required(true)
                .help("Peak file (BED, optionally gzipped)"),
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
            Arg::new("config")
                .long("config")
                .required(false)
                .help("TOML file with RP settings; flags override it"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .required(false)
                .help("Output TSV of gene, score (default: stdout)"),
        )
}
