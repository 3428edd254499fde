use clap::{Arg, ArgAction, Command};

use crate::inputs::{
    chromosome_arg, config_arg, format_arg, index_option_args, matrix_arg, regions_arg,
    window_args,
};

pub const INSULATION_CMD: &str = "insulation";
pub const DIRECTIONALITY_CMD: &str = "directionality";

fn create_index_cli(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .author("Vaquerizas lab")
        .about(about)
        .arg(regions_arg())
        .arg(matrix_arg())
        .args(window_args())
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output prefix; one <prefix>_<window>.txt file is written per window size"),
        )
        .arg(
            Arg::new("npy")
                .long("npy")
                .help("Also save the full index array as .npy (window sizes go to a .windows file)"),
        )
        .arg(format_arg())
        .arg(config_arg())
        .arg(chromosome_arg())
        .args(index_option_args())
}

pub fn create_insulation_cli() -> Command {
    create_index_cli(
        INSULATION_CMD,
        "Compute the insulation index of every bin for a sweep of window sizes.",
    )
    .arg(
        Arg::new("normalise")
            .long("normalise")
            .action(ArgAction::SetTrue)
            .help("Divide by the local background (normalised insulation index)"),
    )
}

pub fn create_directionality_cli() -> Command {
    create_index_cli(
        DIRECTIONALITY_CMD,
        "Compute the directionality index of every bin for a sweep of window sizes.",
    )
}
