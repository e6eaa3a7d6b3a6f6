mod download;
mod embed;
mod nearest;
mod rp;
mod rp_batch;
mod synthesize;
mod test_samples;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use tracing_subscriber::{EnvFilter, fmt};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "tfsage";
    pub const BIN_NAME: &str = "tfsage";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Transcription factor binding site prediction from regulatory potential, sample embeddings and consensus peak synthesis.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More logging (-v debug, -vv trace); RUST_LOG is used otherwise"),
        )
        .subcommand(rp::cli::create_rp_cli())
        .subcommand(rp_batch::cli::create_rp_batch_cli())
        .subcommand(synthesize::cli::create_synthesize_cli())
        .subcommand(test_samples::cli::create_test_samples_cli())
        .subcommand(nearest::cli::create_nearest_cli())
        .subcommand(embed::cli::create_embed_cli())
        .subcommand(download::cli::create_download_cli())
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        //
        // REGULATORY POTENTIAL
        //
        Some((rp::cli::RP_CMD, matches)) => {
            rp::handlers::run_rp(matches)?;
        }
        Some((rp_batch::cli::RP_BATCH_CMD, matches)) => {
            rp_batch::handlers::run_rp_batch(matches)?;
        }

        //
        // SYNTHESIS
        //
        Some((synthesize::cli::SYNTHESIZE_CMD, matches)) => {
            synthesize::handlers::run_synthesize(matches)?;
        }
        Some((test_samples::cli::TEST_SAMPLES_CMD, matches)) => {
            test_samples::handlers::run_test_samples(matches)?;
        }

        //
        // SEARCH
        //
        Some((nearest::cli::NEAREST_CMD, matches)) => {
            nearest::handlers::run_nearest(matches)?;
        }
        Some((embed::cli::EMBED_CMD, matches)) => {
            embed::handlers::run_embed(matches)?;
        }

        //
        // DOWNLOAD
        //
        Some((download::cli::DOWNLOAD_CMD, matches)) => {
            download::handlers::run_download(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
