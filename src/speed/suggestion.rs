// Tue Jan 13 2026 - Alex

use crate::config::Config;
use crate::patch::Edit;
use crate::pattern::{encode, EncodingFamily};
use crate::speed::SpeedCandidate;
use crate::utils::hex::to_hex;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatchSuggestion {
    pub current_value: u64,
    pub target_value: u64,
    pub family: EncodingFamily,
    pub old_pattern: Vec<u8>,
    pub new_pattern: Vec<u8>,
    pub occurrences: usize,
    pub confidence: f64,
    pub positions: Vec<usize>,
}

impl PatchSuggestion {
    /// One edit per recorded position, each writing the new pattern.
    pub fn edits(&self) -> Vec<Edit> {
        self.positions
            .iter()
            .map(|&offset| Edit::new(offset, self.new_pattern.clone()))
            .collect()
    }

    pub fn sample_positions(&self, limit: usize) -> &[usize] {
        &self.positions[..self.positions.len().min(limit)]
    }

    pub fn old_hex(&self) -> String {
        to_hex(&self.old_pattern)
    }

    pub fn new_hex(&self) -> String {
        to_hex(&self.new_pattern)
    }
}

impl fmt::Display for PatchSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} KPH ({} -> {}, confidence {:.1})",
            self.current_value,
            self.target_value,
            self.old_hex(),
            self.new_hex(),
            self.confidence
        )
    }
}

pub struct SuggestionBuilder {
    min_occurrences: usize,
    max_occurrences: usize,
}

impl SuggestionBuilder {
    pub fn new() -> Self {
        Self {
            min_occurrences: 1,
            max_occurrences: 50,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new().with_occurrence_bounds(
            config.min_suggestion_occurrences,
            config.max_suggestion_occurrences,
        )
    }

    /// Exclusive occurrence bounds a candidate must fall between.
    pub fn with_occurrence_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_occurrences = min;
        self.max_occurrences = max;
        self
    }

    /// Re-encodes `target` in the family of each eligible candidate. Result is
    /// ordered by descending confidence, ties kept in candidate order.
    pub fn build(&self, candidates: &[SpeedCandidate], target: u64) -> Vec<PatchSuggestion> {
        let mut suggestions: Vec<PatchSuggestion> = candidates
            .iter()
            .filter(|c| c.occurrences > self.min_occurrences && c.occurrences < self.max_occurrences)
            .filter_map(|c| {
                let (family, new_pattern) = retarget(c, target)?;
                Some(PatchSuggestion {
                    current_value: c.value,
                    target_value: target,
                    family,
                    old_pattern: c.pattern.clone(),
                    new_pattern,
                    occurrences: c.occurrences,
                    confidence: c.confidence(),
                    positions: c.positions.clone(),
                })
            })
            .collect();

        suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        suggestions
    }

    /// Best suggestion whose current value is `old`, if any.
    pub fn select(&self, candidates: &[SpeedCandidate], old: u64, new: u64) -> Option<PatchSuggestion> {
        self.build(candidates, new)
            .into_iter()
            .find(|s| s.current_value == old)
    }
}

impl Default for SuggestionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Family and bytes for `target` matching the layout of the candidate pattern.
fn retarget(candidate: &SpeedCandidate, target: u64) -> Option<(EncodingFamily, Vec<u8>)> {
    let family = match candidate.pattern.len() {
        1 => EncodingFamily::OneByte,
        2 => EncodingFamily::WIDE.into_iter().find(|&family| {
            encode(candidate.value, family)
                .map(|rep| rep.bytes == candidate.pattern)
                .unwrap_or(false)
        })?,
        _ => return None,
    };

    match encode(target, family) {
        Ok(rep) => Some((family, rep.bytes)),
        Err(e) => {
            log::debug!("No suggestion for {}: {}", candidate, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{scan, DEFAULT_SPEED_MENU};
    use crate::speed::aggregate;

    fn candidate(value: u64, family: EncodingFamily, pattern: &[u8], count: usize) -> SpeedCandidate {
        SpeedCandidate {
            value,
            family,
            pattern: pattern.to_vec(),
            positions: (0..count).map(|i| i * 8).collect(),
            occurrences: count,
        }
    }

    #[test]
    fn test_scenario_suggests_40_le() {
        let mut data = vec![0u8; 64];
        for _ in 0..6 {
            data.extend_from_slice(&[0x20, 0x00, 0x11, 0x11, 0x11, 0x11]);
        }
        let candidates = aggregate(&scan(&data, &DEFAULT_SPEED_MENU));
        let suggestions = SuggestionBuilder::new().build(&candidates, 40);

        let s = suggestions
            .iter()
            .find(|s| s.current_value == 32 && s.old_pattern == vec![0x20, 0x00])
            .unwrap();
        assert_eq!(s.new_pattern, vec![0x28, 0x00]);
        assert_eq!(s.family, EncodingFamily::U16Le);
        assert_eq!(s.confidence, 0.7);
        assert_eq!(s.positions, vec![64, 70, 76, 82, 88, 94]);
    }

    #[test]
    fn test_family_preserved() {
        let candidates = vec![
            candidate(32, EncodingFamily::U16Be, &[0x00, 0x20], 3),
            candidate(32, EncodingFamily::U16LeX10, &[0x40, 0x01], 3),
            candidate(32, EncodingFamily::U16LeX100, &[0x80, 0x0c], 3),
            candidate(32, EncodingFamily::OneByte, &[0x20], 3),
        ];
        let suggestions = SuggestionBuilder::new().build(&candidates, 40);
        let patterns: Vec<Vec<u8>> = suggestions.iter().map(|s| s.new_pattern.clone()).collect();
        assert_eq!(
            patterns,
            vec![vec![0x00, 0x28], vec![0x90, 0x01], vec![0xa0, 0x0f], vec![0x28]]
        );
    }

    #[test]
    fn test_occurrence_bounds_exclusive() {
        let candidates = vec![
            candidate(20, EncodingFamily::OneByte, &[0x14], 1),
            candidate(25, EncodingFamily::OneByte, &[0x19], 2),
            candidate(28, EncodingFamily::OneByte, &[0x1c], 49),
            candidate(38, EncodingFamily::OneByte, &[0x26], 50),
        ];
        let values: Vec<u64> = SuggestionBuilder::new()
            .build(&candidates, 40)
            .iter()
            .map(|s| s.current_value)
            .collect();
        assert_eq!(values, vec![25, 28]);
    }

    #[test]
    fn test_out_of_range_target_omitted() {
        let candidates = vec![
            candidate(32, EncodingFamily::OneByte, &[0x20], 3),
            candidate(32, EncodingFamily::U16LeX100, &[0x80, 0x0c], 3),
            candidate(32, EncodingFamily::U16Le, &[0x20, 0x00], 3),
        ];
        let suggestions = SuggestionBuilder::new().build(&candidates, 300);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].new_pattern, vec![0x2c, 0x01]);
    }

    #[test]
    fn test_unrecognised_wide_pattern_omitted() {
        let candidates = vec![candidate(32, EncodingFamily::U16Le, &[0xde, 0xad], 3)];
        assert!(SuggestionBuilder::new().build(&candidates, 40).is_empty());
    }

    #[test]
    fn test_sorted_by_confidence() {
        let candidates = vec![
            candidate(20, EncodingFamily::OneByte, &[0x14], 15),
            candidate(25, EncodingFamily::OneByte, &[0x19], 8),
            candidate(28, EncodingFamily::OneByte, &[0x1c], 3),
        ];
        let confidences: Vec<f64> = SuggestionBuilder::new()
            .build(&candidates, 40)
            .iter()
            .map(|s| s.confidence)
            .collect();
        assert_eq!(confidences, vec![0.9, 0.7, 0.5]);
    }

    #[test]
    fn test_select_and_edits() {
        let candidates = vec![
            candidate(25, EncodingFamily::OneByte, &[0x19], 3),
            candidate(32, EncodingFamily::U16Le, &[0x20, 0x00], 7),
        ];
        let builder = SuggestionBuilder::new();
        let selected = builder.select(&candidates, 32, 40).unwrap();
        assert_eq!(selected.current_value, 32);

        let edits = selected.edits();
        assert_eq!(edits.len(), 7);
        assert_eq!(edits[1], Edit::new(8, vec![0x28, 0x00]));

        assert!(builder.select(&candidates, 38, 40).is_none());
    }

    #[test]
    fn test_bounds_from_config() {
        let mut config = Config::default();
        config.min_suggestion_occurrences = 5;
        let candidates = vec![
            candidate(25, EncodingFamily::OneByte, &[0x19], 3),
            candidate(28, EncodingFamily::OneByte, &[0x1c], 6),
        ];
        let values: Vec<u64> = SuggestionBuilder::from_config(&config)
            .build(&candidates, 40)
            .iter()
            .map(|s| s.current_value)
            .collect();
        assert_eq!(values, vec![28]);
    }
}
