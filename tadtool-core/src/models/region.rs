use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::TadError;

///
/// A contiguous interval on one chromosome.
///
/// Coordinates are 1-based and inclusive. Region list files store a 0-based
/// start, which is shifted by one on the way in and back on the way out
/// (see [GenomicRegion::as_string]).
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenomicRegion {
    pub chr: String,
    pub start: u64,
    pub end: u64,

    pub name: Option<String>,
}

impl GenomicRegion {
    ///
    /// Create a new region, validating that `start <= end`.
    ///
    pub fn new(chr: &str, start: u64, end: u64) -> Result<Self, TadError> {
        if start > end {
            return Err(TadError::Format(format!(
                "Region start is larger than its end: {}:{}-{}",
                chr, start, end
            )));
        }
        Ok(GenomicRegion {
            chr: chr.to_owned(),
            start,
            end,
            name: None,
        })
    }

    ///
    /// Number of base pairs covered by the region.
    ///
    pub fn width(&self) -> u64 {
        self.end - self.start + 1
    }

    ///
    /// Do both regions share at least one base on the same chromosome?
    ///
    pub fn overlaps(&self, other: &GenomicRegion) -> bool {
        self.chr == other.chr && self.start <= other.end && self.end >= other.start
    }

    ///
    /// Tab-delimited file representation of the region, with a 0-based start.
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}{}",
            self.chr,
            self.start.saturating_sub(1),
            self.end,
            self.name
                .as_deref()
                .map_or(String::new(), |s| format!("\t{}", s)),
        )
    }
}

impl Display for GenomicRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chr, self.start, self.end)
    }
}

impl FromStr for GenomicRegion {
    type Err = TadError;

    ///
    /// Parse a `chrom:start-end` string. Bounds are 1-based inclusive and may
    /// contain `,` as a thousands separator.
    ///
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (chr, range) = s.split_once(':').ok_or_else(|| {
            TadError::Format(format!("Region string is missing ':' separator: {}", s))
        })?;
        let (start, end) = range.split_once('-').ok_or_else(|| {
            TadError::Format(format!("Region string is missing '-' separator: {}", s))
        })?;

        if chr.is_empty() {
            return Err(TadError::Format(format!(
                "Region string has an empty chromosome: {}",
                s
            )));
        }

        let parse_bound = |bound: &str| -> Result<u64, TadError> {
            bound.replace(',', "").parse::<u64>().map_err(|_| {
                TadError::Format(format!("Invalid region bound '{}' in: {}", bound, s))
            })
        };

        GenomicRegion::new(chr, parse_bound(start)?, parse_bound(end)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_parse_region_string() {
        let region: GenomicRegion = "chr1:150-350".parse().unwrap();
        assert_eq!(region.chr, "chr1");
        assert_eq!(region.start, 150);
        assert_eq!(region.end, 350);
        assert_eq!(region.name, None);
    }

    #[rstest]
    fn test_parse_region_string_with_separators() {
        let region: GenomicRegion = "chrX:1,000-2,500".parse().unwrap();
        assert_eq!(region.start, 1000);
        assert_eq!(region.end, 2500);
    }

    #[rstest]
    #[case("chr1")]
    #[case("chr1:100")]
    #[case("chr1:a-100")]
    #[case("chr1:100-b")]
    #[case("chr1:300-100")]
    #[case(":1-100")]
    fn test_parse_region_string_fails(#[case] text: &str) {
        let result = text.parse::<GenomicRegion>();
        assert!(matches!(result, Err(TadError::Format(_))));
    }

    #[rstest]
    fn test_overlaps() {
        let a = GenomicRegion::new("chr1", 1, 100).unwrap();
        let b = GenomicRegion::new("chr1", 100, 200).unwrap();
        let c = GenomicRegion::new("chr1", 101, 200).unwrap();
        let d = GenomicRegion::new("chr2", 1, 100).unwrap();

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&d));
    }

    #[rstest]
    fn test_as_string_restores_zero_based_start() {
        let mut region = GenomicRegion::new("chr1", 101, 200).unwrap();
        assert_eq!(region.as_string(), "chr1\t100\t200");

        region.name = Some("bin2".to_string());
        assert_eq!(region.as_string(), "chr1\t100\t200\tbin2");
        assert_eq!(region.width(), 100);
    }
}
