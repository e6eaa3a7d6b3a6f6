use clap::{Arg, Command};

pub const DOWNLOAD_CMD: &str = "download";

pub fn create_download_cli() -> Command {
    Command::new(DOWNLOAD_CMD)
        .about("Download and sort the peaks of an ENCODE or ChIP-Atlas experiment.")
        .arg(
            Arg::new("id")
                .long("id")
                .required(true)
                .help("ENCODE file accession (ENCFF...) or ChIP-Atlas id (SRX....05)"),
        )
        .arg(
            Arg::new("genome")
                .long("genome")
                .required(false)
                .default_value("hg38")
                .help("Genome build, used for ChIP-Atlas only"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .required(true)
                .help("Output BED file (.gz to compress)"),
        )
}
