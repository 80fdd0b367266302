// Tue Jan 15 2026 - Alex

use crate::config::Config;
use serde::Serialize;
use std::fmt;

/// Maximum gap between consecutive differing offsets inside one region.
pub const PROXIMITY_THRESHOLD: usize = 4;
pub const MAX_REPORTED_DIFFERENCES: usize = 100;
pub const MAX_REPORTED_REGIONS: usize = 10;

/// A single differing byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ByteDifference {
    pub offset: usize,
    pub old: u8,
    pub new: u8,
}

impl fmt::Display for ByteDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}: {:02x} -> {:02x}", self.offset, self.old, self.new)
    }
}

/// A maximal run of differences with consecutive offsets no further apart than
/// the proximity threshold. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRegion {
    pub changes: Vec<ByteDifference>,
}

impl DiffRegion {
    fn start_with(first: ByteDifference) -> Self {
        Self { changes: vec![first] }
    }

    pub fn start(&self) -> usize {
        self.changes.first().map_or(0, |c| c.offset)
    }

    /// Offset of the last differing byte (inclusive).
    pub fn end(&self) -> usize {
        self.changes.last().map_or(0, |c| c.offset)
    }

    /// Number of differing bytes in the region.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start() && offset <= self.end()
    }
}

impl fmt::Display for DiffRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{:04x}-0x{:04x} ({} bytes)",
            self.start(),
            self.end(),
            self.len()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeMismatch {
    pub old_size: usize,
    pub new_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    pub total_differences: usize,
    pub size_mismatch: Option<SizeMismatch>,
    /// First differences only, see `MAX_REPORTED_DIFFERENCES`.
    pub differences: Vec<ByteDifference>,
    pub region_count: usize,
    pub largest_region_size: usize,
    /// First regions only, see `MAX_REPORTED_REGIONS`.
    pub regions: Vec<DiffRegion>,
}

impl DiffResult {
    pub fn is_identical(&self) -> bool {
        self.total_differences == 0 && self.size_mismatch.is_none()
    }
}

impl fmt::Display for DiffResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total differences: {}", self.total_differences)?;
        writeln!(f, "Difference regions: {}", self.region_count)?;
        writeln!(f, "Largest region: {} bytes", self.largest_region_size)?;
        Ok(())
    }
}

/// Byte-for-byte differ over the common prefix of two images.
pub struct BinaryDiff {
    proximity: usize,
    max_differences: usize,
    max_regions: usize,
}

impl BinaryDiff {
    pub fn new() -> Self {
        Self {
            proximity: PROXIMITY_THRESHOLD,
            max_differences: MAX_REPORTED_DIFFERENCES,
            max_regions: MAX_REPORTED_REGIONS,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            proximity: config.diff_proximity,
            max_differences: config.max_reported_differences,
            max_regions: config.max_reported_regions,
        }
    }

    pub fn with_proximity(mut self, proximity: usize) -> Self {
        self.proximity = proximity;
        self
    }

    pub fn compare(&self, old_data: &[u8], new_data: &[u8]) -> DiffResult {
        let size_mismatch = if old_data.len() != new_data.len() {
            log::warn!(
                "Different file sizes - {} vs {}, comparing the first {} bytes",
                old_data.len(),
                new_data.len(),
                old_data.len().min(new_data.len())
            );
            Some(SizeMismatch {
                old_size: old_data.len(),
                new_size: new_data.len(),
            })
        } else {
            None
        };

        let differences = byte_differences(old_data, new_data);
        let regions = group_differences(&differences, self.proximity);

        log::debug!(
            "{} differing bytes in {} regions",
            differences.len(),
            regions.len()
        );

        DiffResult {
            total_differences: differences.len(),
            size_mismatch,
            region_count: regions.len(),
            largest_region_size: regions.iter().map(DiffRegion::len).max().unwrap_or(0),
            differences: differences.into_iter().take(self.max_differences).collect(),
            regions: regions.into_iter().take(self.max_regions).collect(),
        }
    }
}

impl Default for BinaryDiff {
    fn default() -> Self {
        Self::new()
    }
}

/// Every differing offset over `min(old.len(), new.len())`, ascending.
pub fn byte_differences(old_data: &[u8], new_data: &[u8]) -> Vec<ByteDifference> {
    old_data
        .iter()
        .zip(new_data.iter())
        .enumerate()
        .filter(|(_, (old, new))| old != new)
        .map(|(offset, (&old, &new))| ByteDifference { offset, old, new })
        .collect()
}

/// Greedy single pass: a new region starts whenever the gap to the previous
/// difference exceeds `proximity`. A difference before the end of the current
/// region also starts a new one, so unsorted input never merges backwards.
pub fn group_differences(differences: &[ByteDifference], proximity: usize) -> Vec<DiffRegion> {
    let mut regions: Vec<DiffRegion> = Vec::new();

    for &diff in differences {
        match regions.last_mut() {
            Some(region)
                if diff
                    .offset
                    .checked_sub(region.end())
                    .map_or(false, |gap| gap <= proximity) =>
            {
                region.changes.push(diff)
            }
            _ => regions.push(DiffRegion::start_with(diff)),
        }
    }

    regions
}

pub fn diff(old_data: &[u8], new_data: &[u8]) -> DiffResult {
    BinaryDiff::new().compare(old_data, new_data)
}
