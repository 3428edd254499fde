use clap::{Arg, Command, value_parser};

use crate::inputs::{chromosome_arg, config_arg, format_arg, index_option_args, regions_arg};

pub const TADS_CMD: &str = "tads";
pub const DEFAULT_OUT: &str = "tads.bed";

pub fn create_tads_cli() -> Command {
    Command::new(TADS_CMD)
        .author("Vaquerizas lab")
        .about("Call TADs from an index curve at one window size and cutoff.")
        .arg(regions_arg())
        .arg(
            Arg::new("matrix")
                .required_unless_present("index-array")
                .help("Contact matrix: .npy, dense text or sparse edge list"),
        )
        .arg(
            Arg::new("index-array")
                .long("index-array")
                .conflicts_with_all([
                    "matrix",
                    "format",
                    "chromosome",
                    "normalisation-window",
                    "aggregation",
                    "log2",
                ])
                .help("Precomputed index array (.npy with a .windows file) instead of a matrix"),
        )
        .arg(
            Arg::new("algorithm")
                .long("algorithm")
                .short('a')
                .value_parser(["insulation", "normalised_insulation", "directionality"])
                .help("Index used to call boundaries [default: insulation]"),
        )
        .arg(
            Arg::new("window-size")
                .long("window-size")
                .short('w')
                .value_parser(value_parser!(u64))
                .help("Window size in bp [default: smallest window size of the config file]"),
        )
        .arg(
            Arg::new("cutoff")
                .long("cutoff")
                .value_parser(value_parser!(f64))
                .allow_negative_numbers(true)
                .help("Boundary cutoff"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("TAD output file"),
        )
        .arg(format_arg())
        .arg(config_arg())
        .arg(chromosome_arg())
        .args(index_option_args())
}
