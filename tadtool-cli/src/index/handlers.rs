use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use tadtool_index::{IndexAlgorithm, compute_data_array};
use tadtool_io::write_index_values;

use crate::inputs::{index_config, load_config, load_contact_matrix, load_regions, spinner, window_sizes};

///
/// `<prefix>_<window>.txt`, next to the prefix.
///
pub fn curve_path(prefix: &Path, window_size: u64) -> PathBuf {
    let file_name = prefix
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    prefix.with_file_name(format!("{}_{}.txt", file_name, window_size))
}

pub fn run_index(matches: &ArgMatches, algorithm: IndexAlgorithm) -> Result<()> {
    // insulation --normalise switches to the normalised variant
    let algorithm = match algorithm {
        IndexAlgorithm::Insulation if matches.get_flag("normalise") => {
            IndexAlgorithm::NormalisedInsulation
        }
        other => other,
    };

    let config = load_config(matches)?;
    let index_config = index_config(matches, &config)?;
    let window_sizes = window_sizes(matches, &config)?;

    let default_out = algorithm.to_string();
    let prefix = PathBuf::from(matches.get_one::<String>("output").unwrap_or(&default_out));

    let regions = load_regions(matches)?;
    let (matrix, regions) = load_contact_matrix(matches, &regions)?;

    let pb = spinner(format!(
        "Computing {} index for {} window sizes",
        algorithm,
        window_sizes.len()
    ));
    let array = compute_data_array(
        &matrix,
        &regions,
        algorithm,
        window_sizes.as_slice(),
        &index_config,
    )?;
    pb.finish_with_message(format!("Computed {} index", algorithm));

    for (window_size, curve) in array.window_sizes().iter().zip(array.data().rows()) {
        let path = curve_path(&prefix, *window_size);
        write_index_values(&path, &regions, &curve.to_vec())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    if let Some(npy) = matches.get_one::<String>("npy") {
        let npy = Path::new(npy);
        array.write_npy(npy)?;
        info!("Wrote index array to {}", npy.display());
    }

    Ok(())
}
