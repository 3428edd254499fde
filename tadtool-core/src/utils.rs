use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::errors::{TadError, TadResult};
use crate::models::GenomicRegion;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> TadResult<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).map_err(|e| {
        TadError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to open file {:?}: {}", path, e),
        ))
    })?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

///
/// Is this line a comment or blank, and therefore not data?
///
pub fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

///
/// Parse a `chrom:start-end` query string into a [GenomicRegion].
///
pub fn parse_region_string(text: &str) -> TadResult<GenomicRegion> {
    text.parse::<GenomicRegion>()
}
