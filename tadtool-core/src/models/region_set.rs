use std::fmt::{self, Display};
use std::io::BufRead;
use std::path::{Path, PathBuf};

use fxhash::FxHashMap;
use log::warn;

use crate::errors::{TadError, TadResult};
use crate::models::GenomicRegion;
use crate::utils::get_dynamic_reader;

///
/// Maps region names to their row/column index in the contact matrix.
///
/// Only built when the region list carries a name column; sparse matrices
/// that refer to bins by name resolve their ids through it.
///
#[derive(Clone, Debug, Default)]
pub struct IndexConverter {
    name_to_index: FxHashMap<String, usize>,
}

impl IndexConverter {
    ///
    /// Build a converter from the names of a region list. Regions without a
    /// name are not addressable. Returns `None` if no region is named.
    ///
    pub fn from_regions(regions: &[GenomicRegion]) -> Option<Self> {
        let mut name_to_index: FxHashMap<String, usize> = FxHashMap::default();

        for (index, region) in regions.iter().enumerate() {
            if let Some(name) = &region.name {
                if name_to_index.contains_key(name) {
                    warn!(
                        "Duplicate region name '{}' at row {}, keeping first occurrence",
                        name, index
                    );
                    continue;
                }
                name_to_index.insert(name.clone(), index);
            }
        }

        match name_to_index.is_empty() {
            true => None,
            false => Some(IndexConverter { name_to_index }),
        }
    }

    ///
    /// Resolve a region name to its matrix index.
    ///
    pub fn index_of(&self, name: &str) -> TadResult<usize> {
        self.name_to_index
            .get(name)
            .copied()
            .ok_or_else(|| TadError::Lookup(format!("Unknown region name: {}", name)))
    }

    pub fn len(&self) -> usize {
        self.name_to_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_to_index.is_empty()
    }
}

///
/// Row range `[first, last]` (inclusive) occupied by one chromosome in a region list.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChromosomeBounds {
    pub chr: String,
    pub first: usize,
    pub last: usize,
}

impl ChromosomeBounds {
    ///
    /// Number of bins in the block; never zero.
    ///
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }
}

///
/// An ordered list of regions, matching the row order of a contact matrix.
///
#[derive(Clone, Debug)]
pub struct RegionSet {
    pub regions: Vec<GenomicRegion>,
    pub index_converter: Option<IndexConverter>,
    pub path: Option<PathBuf>,
}

///
/// Parse one region list line (`chromosome start end [name]`, 0-based start).
///
fn parse_region_line(line: &str, line_number: usize) -> TadResult<GenomicRegion> {
    let parts: Vec<&str> = line.split('\t').map(|s| s.trim()).collect();

    if parts.len() < 3 {
        return Err(TadError::Format(format!(
            "Line {}: expected at least 3 tab-delimited fields, found {}",
            line_number,
            parts.len()
        )));
    }

    let start: u64 = parts[1].parse().map_err(|_| {
        TadError::Format(format!(
            "Line {}: error in parsing start position: {:?}",
            line_number, parts[1]
        ))
    })?;
    let end: u64 = parts[2].parse().map_err(|_| {
        TadError::Format(format!(
            "Line {}: error in parsing end position: {:?}",
            line_number, parts[2]
        ))
    })?;

    if start >= end {
        return Err(TadError::Format(format!(
            "Line {}: region start is not smaller than its end: {:?}",
            line_number, parts
        )));
    }

    let mut region = GenomicRegion::new(parts[0], start + 1, end)?;
    region.name = parts
        .get(3)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    Ok(region)
}

///
/// Read an ordered region list and, if a name column is present, its
/// [IndexConverter].
///
/// # Arguments
/// - reader: any buffered source of tab-delimited region lines
///
pub fn parse_region_list<R: BufRead>(
    reader: R,
) -> TadResult<(Vec<GenomicRegion>, Option<IndexConverter>)> {
    let mut regions: Vec<GenomicRegion> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty()
            || trimmed.starts_with('#')
            || trimmed.starts_with("track")
            || trimmed.starts_with("browser")
        {
            continue;
        }

        regions.push(parse_region_line(trimmed, i + 1)?);
    }

    let index_converter = IndexConverter::from_regions(&regions);

    Ok((regions, index_converter))
}

///
/// Find the maximal contiguous run of regions overlapping `target`.
///
/// Returns the overlapping regions and the inclusive, zero-based row bounds
/// of that run in `regions`.
///
pub fn select_subrange(
    regions: &[GenomicRegion],
    target: &GenomicRegion,
) -> TadResult<(Vec<GenomicRegion>, usize, usize)> {
    let start_index = regions
        .iter()
        .position(|r| r.overlaps(target))
        .ok_or_else(|| {
            TadError::Range(format!("Region {} does not overlap any input region", target))
        })?;

    let mut end_index = start_index;
    while end_index + 1 < regions.len() && regions[end_index + 1].overlaps(target) {
        end_index += 1;
    }

    Ok((
        regions[start_index..=end_index].to_vec(),
        start_index,
        end_index,
    ))
}

///
/// Split a region list into its contiguous chromosome blocks.
///
/// Fails if a chromosome reappears after another one started, since
/// chromosome blocks must not be interleaved.
///
pub fn chromosome_bounds(regions: &[GenomicRegion]) -> TadResult<Vec<ChromosomeBounds>> {
    let mut bounds: Vec<ChromosomeBounds> = Vec::new();

    for (i, region) in regions.iter().enumerate() {
        match bounds.last_mut() {
            Some(current) if current.chr == region.chr => current.last = i,
            _ => {
                if bounds.iter().any(|b| b.chr == region.chr) {
                    return Err(TadError::Format(format!(
                        "Regions of chromosome {} are not contiguous (row {})",
                        region.chr, i
                    )));
                }
                bounds.push(ChromosomeBounds {
                    chr: region.chr.clone(),
                    first: i,
                    last: i,
                });
            }
        }
    }

    Ok(bounds)
}

impl TryFrom<&Path> for RegionSet {
    type Error = TadError;

    ///
    /// Create a new [RegionSet] from a region list file.
    ///
    /// # Arguments:
    /// - value: path to the (optionally gzipped) region list on disk.
    fn try_from(value: &Path) -> TadResult<Self> {
        let reader = get_dynamic_reader(value)?;
        let (regions, index_converter) = parse_region_list(reader)?;

        if regions.is_empty() {
            return Err(TadError::Format(format!(
                "0 regions found in the file: {}",
                value.display()
            )));
        }

        Ok(RegionSet {
            regions,
            index_converter,
            path: Some(value.to_owned()),
        })
    }
}

impl TryFrom<&str> for RegionSet {
    type Error = TadError;

    fn try_from(value: &str) -> TadResult<Self> {
        RegionSet::try_from(Path::new(value))
    }
}

impl From<Vec<GenomicRegion>> for RegionSet {
    fn from(regions: Vec<GenomicRegion>) -> Self {
        let index_converter = IndexConverter::from_regions(&regions);
        RegionSet {
            regions,
            index_converter,
            path: None,
        }
    }
}

impl RegionSet {
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    ///
    /// Contiguous chromosome blocks of this set, in file order.
    ///
    pub fn chromosome_bounds(&self) -> TadResult<Vec<ChromosomeBounds>> {
        chromosome_bounds(&self.regions)
    }

    ///
    /// Regions overlapping `target`, as a new set renumbered from 0, plus the
    /// inclusive row bounds in this set.
    ///
    pub fn subset(&self, target: &GenomicRegion) -> TadResult<(RegionSet, usize, usize)> {
        let (regions, start, end) = select_subrange(&self.regions, target)?;
        Ok((RegionSet::from(regions), start, end))
    }
}

impl Display for RegionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionSet with {} regions.", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data")
            .join(file_name)
    }

    #[fixture]
    fn five_bins() -> Vec<GenomicRegion> {
        (0..5)
            .map(|i| GenomicRegion::new("chr1", i * 100 + 1, (i + 1) * 100).unwrap())
            .collect()
    }

    #[rstest]
    fn test_parse_region_list_converts_start() {
        let input = "chr1\t0\t100\nchr1\t100\t200\n";
        let (regions, converter) = parse_region_list(Cursor::new(input)).unwrap();

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].start, 1);
        assert_eq!(regions[0].end, 100);
        assert_eq!(regions[1].start, 101);
        assert!(converter.is_none());
    }

    #[rstest]
    fn test_parse_region_list_with_names() {
        let input = "# comment\nchr1\t0\t100\tbin_a\nchr1\t100\t200\tbin_b\n";
        let (regions, converter) = parse_region_list(Cursor::new(input)).unwrap();
        let converter = converter.unwrap();

        assert_eq!(regions[1].name.as_deref(), Some("bin_b"));
        assert_eq!(converter.index_of("bin_a").unwrap(), 0);
        assert_eq!(converter.index_of("bin_b").unwrap(), 1);
        assert!(matches!(
            converter.index_of("bin_c"),
            Err(TadError::Lookup(_))
        ));
    }

    #[rstest]
    #[case("chr1\tzero\t100\n")]
    #[case("chr1\t0\t1.5\n")]
    #[case("chr1\t200\t100\n")]
    #[case("chr1\t0\n")]
    fn test_parse_region_list_malformed(#[case] input: &str) {
        let result = parse_region_list(Cursor::new(input));
        assert!(matches!(result, Err(TadError::Format(_))));
    }

    #[rstest]
    fn test_duplicate_names_keep_first() {
        let input = "chr1\t0\t100\tx\nchr1\t100\t200\tx\n";
        let (_, converter) = parse_region_list(Cursor::new(input)).unwrap();
        assert_eq!(converter.unwrap().index_of("x").unwrap(), 0);
    }

    #[rstest]
    fn test_select_subrange(five_bins: Vec<GenomicRegion>) {
        let target: GenomicRegion = "chr1:150-350".parse().unwrap();
        let (subset, start, end) = select_subrange(&five_bins, &target).unwrap();

        assert_eq!(start, 1);
        assert_eq!(end, 3);
        assert_eq!(subset.len(), 3);
        assert_eq!(subset[0].start, 101);
        assert_eq!(subset[2].end, 400);
    }

    #[rstest]
    fn test_select_subrange_full_extent(five_bins: Vec<GenomicRegion>) {
        let target: GenomicRegion = "chr1:1-500".parse().unwrap();
        let (subset, start, end) = select_subrange(&five_bins, &target).unwrap();

        assert_eq!((start, end), (0, 4));
        assert_eq!(subset, five_bins);
    }

    #[rstest]
    #[case("chr2:1-500")]
    #[case("chr1:501-900")]
    fn test_select_subrange_no_overlap(five_bins: Vec<GenomicRegion>, #[case] target: &str) {
        let target: GenomicRegion = target.parse().unwrap();
        let result = select_subrange(&five_bins, &target);
        assert!(matches!(result, Err(TadError::Range(_))));
    }

    #[rstest]
    fn test_chromosome_bounds() {
        let regions = vec![
            GenomicRegion::new("chr1", 1, 100).unwrap(),
            GenomicRegion::new("chr1", 101, 200).unwrap(),
            GenomicRegion::new("chr2", 1, 100).unwrap(),
        ];
        let bounds = chromosome_bounds(&regions).unwrap();

        assert_eq!(bounds.len(), 2);
        assert_eq!((bounds[0].first, bounds[0].last), (0, 1));
        assert_eq!((bounds[1].first, bounds[1].last), (2, 2));
        assert_eq!(bounds[0].len(), 2);
    }

    #[rstest]
    fn test_chromosome_bounds_interleaved() {
        let regions = vec![
            GenomicRegion::new("chr1", 1, 100).unwrap(),
            GenomicRegion::new("chr2", 1, 100).unwrap(),
            GenomicRegion::new("chr1", 101, 200).unwrap(),
        ];
        assert!(matches!(
            chromosome_bounds(&regions),
            Err(TadError::Format(_))
        ));
    }

    #[rstest]
    fn test_open_from_path() {
        let region_set = RegionSet::try_from(get_test_path("regions.bed").as_path()).unwrap();

        assert_eq!(region_set.len(), 10);
        assert!(region_set.index_converter.is_some());
        assert_eq!(region_set.chromosome_bounds().unwrap().len(), 2);
    }

    #[rstest]
    fn test_subset_renumbers(five_bins: Vec<GenomicRegion>) {
        let region_set = RegionSet::from(five_bins);
        let target: GenomicRegion = "chr1:250-260".parse().unwrap();
        let (subset, start, end) = region_set.subset(&target).unwrap();

        assert_eq!((start, end), (2, 2));
        assert_eq!(subset.len(), 1);
        assert_eq!(subset.regions[0].start, 201);
    }
}
