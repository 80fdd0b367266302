// Tue Jan 13 2026 - Alex

use crate::pattern::{EncodingFamily, PatternMatch};
use crate::utils::hex::to_hex;
use crate::validation::{confidence_for_occurrences, ConfidenceLevel};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Positions shown per candidate in reports. The stored list is never truncated.
pub const DISPLAY_POSITIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedCandidate {
    pub value: u64,
    pub family: EncodingFamily,
    pub pattern: Vec<u8>,
    /// Discovery order, which is ascending offset for scanner output.
    pub positions: Vec<usize>,
    pub occurrences: usize,
}

impl SpeedCandidate {
    fn new(value: u64, family: EncodingFamily, pattern: Vec<u8>) -> Self {
        Self {
            value,
            family,
            pattern,
            positions: Vec::new(),
            occurrences: 0,
        }
    }

    fn record(&mut self, position: usize) {
        self.positions.push(position);
        self.occurrences += 1;
    }

    pub fn confidence(&self) -> f64 {
        confidence_for_occurrences(self.occurrences)
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.confidence())
    }

    pub fn sample_positions(&self, limit: usize) -> &[usize] {
        &self.positions[..self.positions.len().min(limit)]
    }

    pub fn pattern_hex(&self) -> String {
        to_hex(&self.pattern)
    }
}

impl fmt::Display for SpeedCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} KPH ({}, {}): {} occurrences",
            self.value,
            self.pattern_hex(),
            self.family,
            self.occurrences
        )
    }
}

/// Groups matches by (value, exact byte pattern) and orders the groups by
/// ascending occurrence count, ties kept in first-seen order.
///
/// Two families that produce identical bytes for the same value collapse into
/// one candidate carrying the family of the first match seen.
pub fn aggregate(matches: &[PatternMatch]) -> Vec<SpeedCandidate> {
    let mut groups: IndexMap<(u64, Vec<u8>), SpeedCandidate> = IndexMap::new();

    for m in matches {
        groups
            .entry((m.value, m.bytes.clone()))
            .or_insert_with(|| SpeedCandidate::new(m.value, m.family, m.bytes.clone()))
            .record(m.position);
    }

    let mut candidates: Vec<SpeedCandidate> = groups.into_values().collect();
    candidates.sort_by_key(|c| c.occurrences);

    log::debug!(
        "Aggregated {} matches into {} candidates",
        matches.len(),
        candidates.len()
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{scan, DEFAULT_SPEED_MENU};

    fn m(position: usize, value: u64, family: EncodingFamily, bytes: &[u8]) -> PatternMatch {
        PatternMatch {
            position,
            value,
            family,
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_aggregate_scenario() {
        let mut data = vec![0u8; 64];
        for _ in 0..6 {
            data.extend_from_slice(&[0x20, 0x00, 0x11, 0x11, 0x11, 0x11]);
        }

        let candidates = aggregate(&scan(&data, &DEFAULT_SPEED_MENU));
        let target: Vec<_> = candidates
            .iter()
            .filter(|c| c.value == 32 && c.pattern == vec![0x20, 0x00])
            .collect();

        assert_eq!(target.len(), 1);
        assert_eq!(target[0].occurrences, 6);
        assert_eq!(target[0].positions, vec![64, 70, 76, 82, 88, 94]);
        assert_eq!(target[0].confidence(), 0.7);
    }

    #[test]
    fn test_counts_match_scan() {
        let data: Vec<u8> = (0..2048u32).map(|i| (i * 7 % 251) as u8).collect();
        let matches = scan(&data, &DEFAULT_SPEED_MENU);
        let candidates = aggregate(&matches);

        for c in &candidates {
            let expected = matches
                .iter()
                .filter(|m| m.value == c.value && m.bytes == c.pattern)
                .count();
            assert_eq!(c.occurrences, expected);
            assert_eq!(c.positions.len(), expected);
        }
        let total: usize = candidates.iter().map(|c| c.occurrences).sum();
        assert_eq!(total, matches.len());
    }

    #[test]
    fn test_sorted_by_occurrences_stable() {
        let matches = vec![
            m(0, 20, EncodingFamily::U16Le, &[0x14, 0x00]),
            m(5, 20, EncodingFamily::U16Le, &[0x14, 0x00]),
            m(1, 25, EncodingFamily::OneByte, &[0x19]),
            m(2, 28, EncodingFamily::OneByte, &[0x1c]),
        ];
        let candidates = aggregate(&matches);
        let order: Vec<u64> = candidates.iter().map(|c| c.value).collect();
        assert_eq!(order, vec![25, 28, 20]);
    }

    #[test]
    fn test_identical_bytes_merge_across_families() {
        let matches = vec![
            m(3, 32, EncodingFamily::U16Le, &[0x20, 0x00]),
            m(9, 32, EncodingFamily::U16Be, &[0x20, 0x00]),
        ];
        let candidates = aggregate(&matches);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].family, EncodingFamily::U16Le);
        assert_eq!(candidates[0].positions, vec![3, 9]);
    }

    #[test]
    fn test_sample_positions() {
        let matches: Vec<_> = (0..15)
            .map(|i| m(i * 2, 40, EncodingFamily::OneByte, &[0x28]))
            .collect();
        let candidates = aggregate(&matches);
        assert_eq!(candidates[0].sample_positions(DISPLAY_POSITIONS).len(), 10);
        assert_eq!(candidates[0].occurrences, 15);
    }
}
