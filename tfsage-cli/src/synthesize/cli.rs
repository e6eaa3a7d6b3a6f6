use clap::{Arg, ArgAction, Command, value_parser};

pub const SYNTHESIZE_CMD: &str = "synthesize";

pub fn create_synthesize_cli() -> Command {
    Command::new(SYNTHESIZE_CMD)
        .about("Combine peak files into consensus intervals scored by (weighted) support. With --width or --weighted the intervals are also standardized.")
        .arg(
            Arg::new("beds")
                .long("beds")
                .required(true)
                .num_args(1..)
                .help("Input peak files"),
        )
        .arg(
            Arg::new("weights")
                .long("weights")
                .required(false)
                .value_delimiter(',')
                .value_parser(value_parser!(f64))
                .help("Comma-separated weight per input file (default: equal weights)"),
        )
        .arg(
            Arg::new("merge-distance")
                .long("merge-distance")
                .required(false)
                .value_parser(value_parser!(u32))
                .help("Largest gap in bp still merged into one interval (default: 0)"),
        )
        .arg(
            Arg::new("report-original-peaks")
                .long("report-original-peaks")
                .action(ArgAction::SetTrue)
                .help("Add one row per original peak contributing to each interval"),
        )
        .arg(
            Arg::new("weighted")
                .long("weighted")
                .action(ArgAction::SetTrue)
                .help("Standardize with weighted midpoints (needs --weights; implies --report-original-peaks)"),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .required(false)
                .value_parser(value_parser!(u32))
                .help("Standardize intervals to this width in bp"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .required(false)
                .help("TOML file with synthesis settings; flags override it"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .required(true)
                .help("Output TSV (.gz to compress)"),
        )
}
