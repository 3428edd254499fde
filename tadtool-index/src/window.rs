use tadtool_core::models::{ChromosomeBounds, GenomicRegion};

///
/// Bins around bin `i` that fall within a genomic window.
///
/// Bins may have different widths, so the window is resolved by coordinate
/// distance: upstream bins `j < i` with `start_i - start_j <= window_size`,
/// downstream bins `j > i` with `end_j - end_i <= window_size`. The window
/// never leaves the chromosome block of `i`.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinWindow {
    /// First upstream bin; equals `center` if there is none.
    pub first: usize,
    pub center: usize,
    /// Last downstream bin; equals `center` if there is none.
    pub last: usize,
}

impl BinWindow {
    pub fn resolve(
        regions: &[GenomicRegion],
        block: &ChromosomeBounds,
        i: usize,
        window_size: u64,
    ) -> Self {
        let block_regions = &regions[block.first..=block.last];
        let offset = i - block.first;

        let min_start = regions[i].start.saturating_sub(window_size);
        let first =
            block.first + block_regions[..offset].partition_point(|r| r.start < min_start);

        let max_end = regions[i].end.saturating_add(window_size);
        let last = i + block_regions[offset + 1..].partition_point(|r| r.end <= max_end);

        BinWindow {
            first,
            center: i,
            last,
        }
    }

    pub fn upstream(&self) -> std::ops::Range<usize> {
        self.first..self.center
    }

    pub fn downstream(&self) -> std::ops::RangeInclusive<usize> {
        self.center + 1..=self.last
    }

    ///
    /// All bins of the window including the center.
    ///
    pub fn span(&self) -> std::ops::RangeInclusive<usize> {
        self.first..=self.last
    }
}

///
/// Would a window of `window_size` bp around bin `i` run past either end
/// of its chromosome?
///
pub fn exceeds_chromosome(
    regions: &[GenomicRegion],
    block: &ChromosomeBounds,
    i: usize,
    window_size: u64,
) -> bool {
    let chrom_start = regions[block.first].start;
    let chrom_end = regions[block.last].end;

    regions[i].start < chrom_start.saturating_add(window_size)
        || regions[i].end.saturating_add(window_size) > chrom_end
}
