use clap::{Arg, Command};

pub const EMBED_CMD: &str = "embed";

pub fn create_embed_cli() -> Command {
    Command::new(EMBED_CMD)
        .about("Embed the samples of an RP matrix with an R integration script.")
        .arg(
            Arg::new("rp-matrix")
                .long("rp-matrix")
                .required(true)
                .help("RP matrix TSV from rp-batch"),
        )
        .arg(
            Arg::new("metadata")
                .long("metadata")
                .required(true)
                .help("Metadata TSV, first column is the sample id"),
        )
        .arg(
            Arg::new("script")
                .long("script")
                .required(true)
                .help("Embedding script (embed.R)"),
        )
        .arg(
            Arg::new("align-key")
                .long("align-key")
                .required(false)
                .default_value("Assay")
                .help("Metadata column the samples are integrated across"),
        )
        .arg(
            Arg::new("method")
                .long("method")
                .required(false)
                .default_value("FastMNNIntegration")
                .help("CCAIntegration, HarmonyIntegration, JointPCAIntegration, RPCAIntegration, FastMNNIntegration or none"),
        )
        .arg(
            Arg::new("interpreter")
                .long("interpreter")
                .required(false)
                .default_value("Rscript")
                .help("Program used to run the script"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .required(true)
                .help("Output embedding TSV (.gz to compress)"),
        )
}
