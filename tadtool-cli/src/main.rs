mod index;
mod inputs;
mod subset;
mod tads;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use log::LevelFilter;

use tadtool_index::IndexAlgorithm;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "tadtool";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Vaquerizas lab")
        .about("Boundary indices and TAD calling for Hi-C contact matrices.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug messages (RUST_LOG takes precedence)"),
        )
        .subcommand(index::cli::create_insulation_cli())
        .subcommand(index::cli::create_directionality_cli())
        .subcommand(tads::cli::create_tads_cli())
        .subcommand(subset::cli::create_subset_cli())
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
        }
        Err(_) => {
            let level = match verbose {
                true => LevelFilter::Debug,
                false => LevelFilter::Info,
            };
            builder.filter_level(level);
        }
    }
    builder.init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        //
        // INDICES
        //
        Some((index::cli::INSULATION_CMD, matches)) => {
            index::handlers::run_index(matches, IndexAlgorithm::Insulation)?;
        }
        Some((index::cli::DIRECTIONALITY_CMD, matches)) => {
            index::handlers::run_index(matches, IndexAlgorithm::Directionality)?;
        }

        //
        // TAD CALLING
        //
        Some((tads::cli::TADS_CMD, matches)) => {
            tads::handlers::run_tads(matches)?;
        }

        //
        // SUBSETTING
        //
        Some((subset::cli::SUBSET_CMD, matches)) => {
            subset::handlers::run_subset(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
