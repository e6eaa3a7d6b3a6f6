use clap::{Arg, ArgAction, Command, value_parser};

pub const TEST_SAMPLES_CMD: &str = "test-samples";

pub fn create_test_samples_cli() -> Command {
    Command::new(TEST_SAMPLES_CMD)
        .about("Label positive (target) and negative (query-only) regions for evaluation.")
        .arg(
            Arg::new("query")
                .long("query")
                .required(true)
                .help("Candidate regions, e.g. a synthesized peak set"),
        )
        .arg(
            Arg::new("target")
                .long("target")
                .required(true)
                .help("Ground-truth regions"),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .required(false)
                .default_value("200")
                .value_parser(value_parser!(u32))
                .help("Re-center every sample to this width in bp"),
        )
        .arg(
            Arg::new("keep-width")
                .long("keep-width")
                .action(ArgAction::SetTrue)
                .conflicts_with("width")
                .help("Keep the original coordinates instead of re-centering"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .required(true)
                .help("Output TSV (.gz to compress)"),
        )
}
