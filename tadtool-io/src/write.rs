use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use ndarray::Array2;
use ndarray_npy::write_npy;

use tadtool_core::models::{Edge, GenomicRegion, RegionSet};
use tadtool_core::{TadError, TadResult};

///
/// Buffered file writer, gzip-compressed for `.gz` paths.
///
/// Call [DynamicWriter::finish] when done; it writes the gzip trailer and
/// flushes the file.
///
pub enum DynamicWriter {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl DynamicWriter {
    pub fn finish(self) -> std::io::Result<()> {
        match self {
            DynamicWriter::Plain(mut writer) => writer.flush(),
            DynamicWriter::Gzip(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for DynamicWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            DynamicWriter::Plain(writer) => writer.write(buf),
            DynamicWriter::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            DynamicWriter::Plain(writer) => writer.flush(),
            DynamicWriter::Gzip(encoder) => encoder.flush(),
        }
    }
}

///
/// Open a buffered writer, gzip-compressed if the path ends in `.gz`.
/// Parent directories are created as needed.
///
pub fn get_dynamic_writer(path: &Path) -> std::io::Result<DynamicWriter> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = BufWriter::new(File::create(path)?);
    let is_gzipped = path.extension().is_some_and(|ext| ext == "gz");

    Ok(match is_gzipped {
        true => DynamicWriter::Gzip(GzEncoder::new(file, Compression::default())),
        false => DynamicWriter::Plain(file),
    })
}

pub trait BedWrite {
    ///
    /// Write regions to disk as a tab-delimited region list
    /// (`chromosome start end [name]`, 0-based start).
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_bed<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()>;
}

impl BedWrite for [GenomicRegion] {
    fn write_bed<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let mut writer = get_dynamic_writer(path.as_ref())?;
        for region in self {
            writeln!(writer, "{}", region.as_string())?;
        }
        writer.finish()
    }
}

impl BedWrite for RegionSet {
    fn write_bed<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        self.regions.as_slice().write_bed(path)
    }
}

///
/// Write one index curve as `chromosome start end . value` lines.
///
/// Undefined values are written as `NaN`.
///
pub fn write_index_values(path: &Path, regions: &[GenomicRegion], values: &[f64]) -> TadResult<()> {
    if regions.len() != values.len() {
        return Err(TadError::Dimension(format!(
            "{} index values for {} regions",
            values.len(),
            regions.len()
        )));
    }

    let mut writer = get_dynamic_writer(path)?;
    for (region, value) in regions.iter().zip(values) {
        writeln!(
            writer,
            "{}\t{}\t{}\t.\t{}",
            region.chr,
            region.start.saturating_sub(1),
            region.end,
            value
        )?;
    }
    writer.finish()?;

    Ok(())
}

///
/// Write called domains as `chromosome start end` lines.
///
pub fn write_tads(path: &Path, tads: &[GenomicRegion]) -> TadResult<()> {
    let mut writer = get_dynamic_writer(path)?;
    for tad in tads {
        writeln!(writer, "{}\t{}\t{}", tad.chr, tad.start.saturating_sub(1), tad.end)?;
    }
    writer.finish()?;

    Ok(())
}

///
/// Write a matrix as tab-delimited text, one row per line.
///
pub fn write_dense_matrix(path: &Path, matrix: &Array2<f64>) -> TadResult<()> {
    let mut writer = get_dynamic_writer(path)?;
    for row in matrix.rows() {
        let line = row
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<String>>()
            .join("\t");
        writeln!(writer, "{}", line)?;
    }
    writer.finish()?;

    Ok(())
}

///
/// Write edges as `row col weight` lines with zero-based ids.
///
pub fn write_sparse_edges(path: &Path, edges: &[Edge]) -> TadResult<()> {
    let mut writer = get_dynamic_writer(path)?;
    for edge in edges {
        writeln!(writer, "{}\t{}\t{}", edge.row, edge.col, edge.weight)?;
    }
    writer.finish()?;

    Ok(())
}

///
/// Write a 2-D array (matrix or index array) as `.npy`.
///
pub fn write_npy_array(path: &Path, array: &Array2<f64>) -> TadResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_npy(path, array)
        .map_err(|e| TadError::Format(format!("Failed to write npy file {:?}: {}", path, e)))
}
