// Tue Jan 13 2026 - Alex

use crate::config::Config;
use crate::pattern::encoding::encodings_in;
use crate::pattern::{EncodedRepresentation, EncodingFamily, FamilySet};
use crate::utils::hex::to_hex;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

/// Speed limits (km/h) commonly configured in the controller firmware.
pub const DEFAULT_SPEED_MENU: [u64; 6] = [20, 25, 28, 32, 38, 40];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
    pub position: usize,
    pub value: u64,
    pub family: EncodingFamily,
    pub bytes: Vec<u8>,
}

impl fmt::Display for PatternMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{:04x}: {} KPH ({}, {})",
            self.position,
            self.value,
            to_hex(&self.bytes),
            self.family
        )
    }
}

pub struct PatternScanner {
    families: FamilySet,
    use_parallel: bool,
}

impl PatternScanner {
    pub fn new() -> Self {
        Self {
            families: FamilySet::all(),
            use_parallel: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            families: config.families,
            use_parallel: config.parallel_scan,
        }
    }

    pub fn with_families(mut self, families: FamilySet) -> Self {
        self.families = families;
        self
    }

    /// Fans the (value, family) groups out over the rayon pool. Output order
    /// is the same as the sequential scan.
    pub fn use_parallel(mut self, parallel: bool) -> Self {
        self.use_parallel = parallel;
        self
    }

    /// Every occurrence of every encoding of every menu value. Matches are grouped
    /// by (value, family) in menu and family order, ascending offset inside a group.
    pub fn scan(&self, data: &[u8], menu: &[u64]) -> Vec<PatternMatch> {
        let groups: Vec<(u64, EncodedRepresentation)> = menu
            .iter()
            .flat_map(|&value| {
                encodings_in(value, self.families)
                    .into_iter()
                    .map(move |rep| (value, rep))
            })
            .collect();

        let results: Vec<Vec<PatternMatch>> = if self.use_parallel {
            groups
                .par_iter()
                .map(|(value, rep)| Self::scan_group(data, *value, rep))
                .collect()
        } else {
            groups
                .iter()
                .map(|(value, rep)| Self::scan_group(data, *value, rep))
                .collect()
        };

        let matches: Vec<PatternMatch> = results.into_iter().flatten().collect();
        log::debug!(
            "Scanned {} bytes for {} representations: {} matches",
            data.len(),
            groups.len(),
            matches.len()
        );
        matches
    }

    fn scan_group(data: &[u8], value: u64, rep: &EncodedRepresentation) -> Vec<PatternMatch> {
        find_all(data, &rep.bytes)
            .into_iter()
            .map(|position| PatternMatch {
                position,
                value,
                family: rep.family,
                bytes: rep.bytes.clone(),
            })
            .collect()
    }
}

impl Default for PatternScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// All start offsets of `needle` in `data`, overlapping hits included.
pub fn find_all(data: &[u8], needle: &[u8]) -> Vec<usize> {
    if needle.is_empty() || data.len() < needle.len() {
        return Vec::new();
    }

    let first_byte = needle[0];
    (0..=(data.len() - needle.len()))
        .filter(|&i| data[i] == first_byte && &data[i..i + needle.len()] == needle)
        .collect()
}
