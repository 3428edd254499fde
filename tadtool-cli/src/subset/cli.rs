use clap::{Arg, Command};

use crate::inputs::{format_arg, matrix_arg, regions_arg};

pub const SUBSET_CMD: &str = "subset";
pub const DEFAULT_REGIONS_OUT: &str = "subset_regions.bed";
pub const DEFAULT_MATRIX_OUT: &str = "subset_matrix.txt";

pub fn create_subset_cli() -> Command {
    Command::new(SUBSET_CMD)
        .author("Vaquerizas lab")
        .about("Cut the regions and matrix down to a genomic sub-range (chrom:start-end).")
        .arg(regions_arg())
        .arg(matrix_arg())
        .arg(
            Arg::new("region")
                .required(true)
                .help("Sub-range to keep, e.g. chr1:1,000,000-2,000,000"),
        )
        .arg(
            Arg::new("output-regions")
                .long("output-regions")
                .help("Region list output"),
        )
        .arg(
            Arg::new("output-matrix")
                .long("output-matrix")
                .help("Matrix output; sparse input stays sparse, otherwise dense text"),
        )
        .arg(format_arg())
}
