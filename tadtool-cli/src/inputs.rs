use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, value_parser};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use tadtool_core::models::{ContactMatrix, GenomicRegion, RegionSet};
use tadtool_index::{Aggregation, IndexConfig, TadToolConfig};
use tadtool_io::{
    MatrixFormat, WindowSizes, detect_format, load_chromosome_matrix, load_matrix_with_format,
};

pub fn regions_arg() -> Arg {
    Arg::new("regions")
        .required(true)
        .help("Region list (chromosome, start, end[, name]) indexing the matrix rows")
}

pub fn matrix_arg() -> Arg {
    Arg::new("matrix")
        .required(true)
        .help("Contact matrix: .npy, dense text or sparse edge list")
}

pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_parser(["npy", "dense", "sparse"])
        .help("Matrix format; detected from the file if omitted")
}

pub fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .help("TOML file with default algorithm, window sizes, cutoff and index options")
}

pub fn chromosome_arg() -> Arg {
    Arg::new("chromosome")
        .long("chromosome")
        .help("Only process regions of this chromosome")
}

pub fn index_option_args() -> Vec<Arg> {
    vec![
        Arg::new("normalisation-window")
            .long("normalisation-window")
            .value_parser(value_parser!(u64))
            .help("Background window (bp, each side) for the normalised insulation index"),
        Arg::new("aggregation")
            .long("aggregation")
            .value_parser(["mean", "median"])
            .help("How insulation blocks are summarised [default: mean]"),
        Arg::new("log2")
            .long("log2")
            .action(ArgAction::SetTrue)
            .help("log2-transform the normalised insulation index"),
    ]
}

pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn load_config(matches: &ArgMatches) -> Result<TadToolConfig> {
    match matches.get_one::<String>("config") {
        Some(path) => {
            let config = TadToolConfig::try_from(Path::new(path))
                .with_context(|| format!("Failed to read config file {}", path))?;
            info!("Using config file {}", path);
            Ok(config)
        }
        None => Ok(TadToolConfig::default()),
    }
}

///
/// Index options from the command line, falling back to the config file.
///
pub fn index_config(matches: &ArgMatches, config: &TadToolConfig) -> Result<IndexConfig> {
    let mut index_config = config.index.clone();

    if let Some(window) = matches.get_one::<u64>("normalisation-window") {
        index_config.normalisation_window = Some(*window);
    }
    if let Some(aggregation) = matches.get_one::<String>("aggregation") {
        index_config.aggregation = Aggregation::from_str(aggregation)?;
    }
    if matches.get_flag("log2") {
        index_config.log2 = true;
    }

    Ok(index_config)
}

pub fn load_regions(matches: &ArgMatches) -> Result<RegionSet> {
    let path = matches
        .get_one::<String>("regions")
        .expect("A path to a region list is required.");

    let regions = RegionSet::try_from(Path::new(path))
        .with_context(|| format!("Failed to read regions from {}", path))?;
    info!("Loaded {} regions from {}", regions.len(), path);

    Ok(regions)
}

pub fn matrix_format(matches: &ArgMatches, path: &Path) -> Result<MatrixFormat> {
    match matches.get_one::<String>("format") {
        Some(format) => Ok(MatrixFormat::from_str(format)?),
        None => Ok(detect_format(path)?),
    }
}

///
/// Load the matrix and mask empty bins. With `--chromosome`, only that
/// chromosome's block is loaded and the returned regions are cut to match.
///
pub fn load_contact_matrix(
    matches: &ArgMatches,
    regions: &RegionSet,
) -> Result<(ContactMatrix, Vec<GenomicRegion>)> {
    let path = PathBuf::from(
        matches
            .get_one::<String>("matrix")
            .expect("A path to a contact matrix is required."),
    );

    let pb = spinner(format!("Loading matrix {}", path.display()));

    let (data, regions) = match matches.get_one::<String>("chromosome") {
        Some(chromosome) => {
            let format = matches
                .get_one::<String>("format")
                .map(|format| MatrixFormat::from_str(format))
                .transpose()?;
            let data = load_chromosome_matrix(
                &path,
                &regions.regions,
                chromosome,
                regions.index_converter.as_ref(),
                format,
            )
            .with_context(|| format!("Failed to load {} from {}", chromosome, path.display()))?;
            let regions: Vec<GenomicRegion> = regions
                .regions
                .iter()
                .filter(|r| &r.chr == chromosome)
                .cloned()
                .collect();
            (data, regions)
        }
        None => {
            let format = matrix_format(matches, &path)?;
            let data = load_matrix_with_format(
                &path,
                format,
                regions.len(),
                regions.index_converter.as_ref(),
                true,
            )
            .with_context(|| format!("Failed to load {} matrix {}", format, path.display()))?;
            (data, regions.regions.clone())
        }
    };

    let matrix = ContactMatrix::masked(data)?;
    pb.finish_with_message(format!(
        "Loaded {} x {} matrix ({} masked bins)",
        matrix.dim(),
        matrix.dim(),
        matrix.masked_count()
    ));

    Ok((matrix, regions))
}

///
/// Window sizes from `--window-sizes`, `--window-range` or `--window-file`,
/// falling back to the config file.
///
pub fn window_sizes(matches: &ArgMatches, config: &TadToolConfig) -> Result<WindowSizes> {
    if let Some(values) = matches.get_many::<u64>("window-sizes") {
        let values: Vec<u64> = values.copied().collect();
        return Ok(WindowSizes::from_values(&values)?);
    }

    if let Some(range) = matches.get_many::<u64>("window-range") {
        let range: Vec<u64> = range.copied().collect();
        if let [start, stop, step] = range.as_slice() {
            return Ok(WindowSizes::from_range(*start, *stop, *step)?);
        }
        anyhow::bail!("--window-range needs START STOP STEP");
    }

    if let Some(path) = matches.get_one::<String>("window-file") {
        return Ok(WindowSizes::from_file(Path::new(path))?);
    }

    match &config.window_sizes {
        Some(values) => Ok(WindowSizes::from_values(values)?),
        None => anyhow::bail!(
            "No window sizes given (use --window-sizes, --window-range, --window-file or a config file)"
        ),
    }
}

pub fn window_args() -> Vec<Arg> {
    vec![
        Arg::new("window-sizes")
            .long("window-sizes")
            .short('w')
            .num_args(1..)
            .value_parser(value_parser!(u64))
            .conflicts_with_all(["window-range", "window-file"])
            .help("Window sizes in bp"),
        Arg::new("window-range")
            .long("window-range")
            .num_args(3)
            .value_names(["START", "STOP", "STEP"])
            .value_parser(value_parser!(u64))
            .conflicts_with("window-file")
            .help("Window sizes START, START + STEP, ... below STOP"),
        Arg::new("window-file")
            .long("window-file")
            .help("File of whitespace-separated window sizes"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::write;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::index::cli::create_insulation_cli;

    fn chromosome_matches(format: Option<&str>) -> (tempfile::TempDir, ArgMatches) {
        let tempdir = tempfile::tempdir().unwrap();
        let regions_path = tempdir.path().join("regions.bed");
        let matrix_path = tempdir.path().join("dense.txt");
        write(&regions_path, "chr1\t0\t100\nchr1\t100\t200\nchr2\t0\t100\n").unwrap();
        write(&matrix_path, "1\t5\t0\n5\t1\t3\n0\t3\t1\n").unwrap();

        let mut args = vec![
            "insulation".to_string(),
            regions_path.display().to_string(),
            matrix_path.display().to_string(),
            "--chromosome".to_string(),
            "chr1".to_string(),
        ];
        if let Some(format) = format {
            args.extend(["--format".to_string(), format.to_string()]);
        }
        let matches = create_insulation_cli().try_get_matches_from(args).unwrap();
        (tempdir, matches)
    }

    #[rstest]
    fn test_chromosome_matrix_sniffs_narrow_dense_as_edges() {
        let (_tempdir, matches) = chromosome_matches(None);
        let regions = load_regions(&matches).unwrap();

        assert!(load_contact_matrix(&matches, &regions).is_err());
    }

    #[rstest]
    fn test_chromosome_matrix_honours_format() {
        let (_tempdir, matches) = chromosome_matches(Some("dense"));
        let regions = load_regions(&matches).unwrap();

        let (matrix, chr1) = load_contact_matrix(&matches, &regions).unwrap();
        assert_eq!(matrix.dim(), 2);
        assert_eq!(chr1.len(), 2);
        assert_eq!(matrix.get(0, 1), Some(5.0));
    }
}
