use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use tadtool_core::models::GenomicRegion;
use tadtool_index::{IndexAlgorithm, IndexArray, call_tads, compute_data_array};
use tadtool_io::write_tads;

use super::cli::DEFAULT_OUT;
use crate::inputs::{index_config, load_config, load_contact_matrix, load_regions, spinner};

pub fn run_tads(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;

    let algorithm = match matches.get_one::<String>("algorithm") {
        Some(algorithm) => IndexAlgorithm::from_str(algorithm)?,
        None => config.algorithm.unwrap_or(IndexAlgorithm::Insulation),
    };

    let window_size = match matches.get_one::<u64>("window-size") {
        Some(window_size) => *window_size,
        None => config
            .window_sizes
            .as_ref()
            .and_then(|sizes| sizes.iter().min().copied())
            .context("No window size given (use --window-size or a config file)")?,
    };

    let cutoff = match matches.get_one::<f64>("cutoff") {
        Some(cutoff) => *cutoff,
        None => config
            .cutoff
            .context("No cutoff given (use --cutoff or a config file)")?,
    };

    let default_out = DEFAULT_OUT.to_string();
    let output = matches.get_one::<String>("output").unwrap_or(&default_out);

    let region_set = load_regions(matches)?;

    let (curve, regions): (Vec<f64>, Vec<GenomicRegion>) =
        match matches.get_one::<String>("index-array") {
            Some(path) => {
                let array = IndexArray::read_npy(Path::new(path), region_set.len())
                    .with_context(|| format!("Failed to load index array {}", path))?;
                info!(
                    "Loaded index array {} with window sizes {:?}",
                    path,
                    array.window_sizes()
                );
                (array.require_curve(window_size)?, region_set.regions)
            }
            None => {
                let index_config = index_config(matches, &config)?;
                let (matrix, regions) = load_contact_matrix(matches, &region_set)?;

                let pb = spinner(format!("Computing {} index at {} bp", algorithm, window_size));
                let array =
                    compute_data_array(&matrix, &regions, algorithm, &[window_size], &index_config)?;
                pb.finish_with_message(format!("Computed {} index", algorithm));

                (array.require_curve(window_size)?, regions)
            }
        };

    let tads = call_tads(algorithm, &curve, cutoff, &regions)?;
    info!(
        "Called {} TADs ({} index, window size {}, cutoff {})",
        tads.len(),
        algorithm,
        window_size,
        cutoff
    );

    write_tads(Path::new(output), &tads)
        .with_context(|| format!("Failed to write TADs to {}", output))?;
    info!("Wrote {}", output);

    Ok(())
}
