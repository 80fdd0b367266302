// Tue Jan 13 2026 - Alex

use crate::analysis::{ExtractedString, HeaderInfo};
use crate::diff::DiffResult;
use crate::pattern::PatternMatch;
use crate::speed::{PatchSuggestion, SpeedCandidate, DISPLAY_POSITIONS};
use crate::utils::hex::{format_offset, to_hex};
use crate::utils::format_bytes;
use colored::*;
use itertools::Itertools;

/// Console rendering of the structured results. Display truncation lives here
/// only; the results themselves are complete.
pub struct DisplayRenderer {
    max_matches: usize,
    max_strings: usize,
    max_suggestions: usize,
    sample_positions: usize,
    suggestion_positions: usize,
    max_regions_shown: usize,
    max_changes_per_region: usize,
}

impl DisplayRenderer {
    pub fn new() -> Self {
        Self {
            max_matches: 50,
            max_strings: 20,
            max_suggestions: 5,
            sample_positions: 5,
            suggestion_positions: DISPLAY_POSITIONS,
            max_regions_shown: 3,
            max_changes_per_region: 5,
        }
    }

    pub fn with_color(self, use_color: bool) -> Self {
        colored::control::set_override(use_color);
        self
    }

    pub fn render_header(&self, info: Option<&HeaderInfo>) -> String {
        let Some(info) = info else {
            return format!("{} Image shorter than the header window, no header analysis", "[!]".yellow());
        };

        let mut out = String::new();
        out.push_str(&format!("{}\n", "Firmware Analysis:".cyan().bold()));
        out.push_str(&format!("  Size: {} ({})\n", info.size, format_bytes(info.size as u64)));
        out.push_str(&format!("  SHA-256: {}\n", info.digest));
        out.push_str(&format!("  First 16 bytes: {}\n", to_hex(&info.first_bytes)));
        out.push_str(&format!("  Entropy estimate: {:.2}\n", info.entropy));
        if !info.magic_candidates.is_empty() {
            out.push_str("  Possible magic bytes:\n");
            for magic in info.magic_candidates.iter().take(5) {
                out.push_str(&format!("    Position {}: {}\n", magic.offset, magic.to_hex()));
            }
        }
        out
    }

    pub fn render_matches(&self, matches: &[PatternMatch]) -> String {
        let mut out = format!(
            "{}\n",
            format!("Found {} potential speed patterns:", matches.len()).cyan().bold()
        );
        for m in matches.iter().take(self.max_matches) {
            out.push_str(&format!("  {}\n", m));
        }
        if matches.len() > self.max_matches {
            out.push_str(&format!("  ... and {} more\n", matches.len() - self.max_matches));
        }
        out
    }

    pub fn render_candidates(&self, candidates: &[SpeedCandidate]) -> String {
        let mut out = format!("{}\n", "Speed Modification Candidates:".cyan().bold());
        for c in candidates {
            out.push_str(&format!(
                "  {} KPH ({}, {}):\n",
                c.value.to_string().yellow(),
                c.pattern_hex(),
                c.family
            ));
            out.push_str(&format!(
                "    Occurrences: {} (confidence {:.1}, {})\n",
                c.occurrences,
                c.confidence(),
                c.confidence_level()
            ));
            out.push_str(&format!(
                "    Sample positions: [{}]\n",
                self.offsets(c.sample_positions(self.sample_positions))
            ));
        }
        out
    }

    pub fn render_suggestions(&self, target: u64, suggestions: &[PatchSuggestion]) -> String {
        let mut out = format!(
            "{}\n",
            format!("Patch suggestions for {} KPH:", target).cyan().bold()
        );
        if suggestions.is_empty() {
            out.push_str("  No suitable patterns found\n");
        }
        for (i, s) in suggestions.iter().take(self.max_suggestions).enumerate() {
            out.push_str(&self.render_suggestion(i + 1, s));
        }
        out
    }

    pub fn render_suggestion(&self, rank: usize, s: &PatchSuggestion) -> String {
        format!(
            "  {}. {} -> {} KPH\n     Confidence: {:.1}\n     Pattern: {} -> {} ({})\n     Occurrences: {} at positions [{}]\n",
            rank,
            s.current_value,
            s.target_value,
            s.confidence,
            s.old_hex().red(),
            s.new_hex().green(),
            s.family,
            s.occurrences,
            self.offsets(s.sample_positions(self.suggestion_positions))
        )
    }

    pub fn render_diff(&self, result: &DiffResult) -> String {
        let mut out = format!("{}\n", "Firmware Comparison:".cyan().bold());
        if let Some(mismatch) = result.size_mismatch {
            out.push_str(&format!(
                "  {} Different file sizes - {} vs {}\n",
                "[!]".yellow(),
                mismatch.old_size,
                mismatch.new_size
            ));
        }
        out.push_str(&format!("  Total differences: {}\n", result.total_differences));
        if result.total_differences == 0 {
            return out;
        }

        out.push_str(&format!("  Difference groups: {}\n", result.region_count));
        out.push_str(&format!("  Largest group size: {}\n", result.largest_region_size));
        out.push_str("  First few difference groups:\n");
        for (i, region) in result.regions.iter().take(self.max_regions_shown).enumerate() {
            out.push_str(&format!("    Group {}: {}\n", i + 1, region));
            for change in region.changes.iter().take(self.max_changes_per_region) {
                out.push_str(&format!("      {}\n", change));
            }
        }
        out
    }

    pub fn render_strings(&self, strings: &[ExtractedString]) -> String {
        let mut out = format!(
            "{}\n",
            format!("Found {} strings:", strings.len()).cyan().bold()
        );
        for s in strings.iter().take(self.max_strings) {
            out.push_str(&format!("  {}\n", s));
        }
        if strings.len() > self.max_strings {
            out.push_str(&format!("  ... and {} more\n", strings.len() - self.max_strings));
        }
        out
    }

    fn offsets(&self, positions: &[usize]) -> String {
        positions.iter().map(|&p| format_offset(p)).join(", ")
    }
}

impl Default for DisplayRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff;
    use crate::pattern::EncodingFamily;

    fn plain() -> DisplayRenderer {
        DisplayRenderer::new().with_color(false)
    }

    #[test]
    fn test_render_matches_truncates() {
        let matches: Vec<PatternMatch> = (0..60)
            .map(|i| PatternMatch {
                position: i,
                value: 20,
                family: EncodingFamily::OneByte,
                bytes: vec![0x14],
            })
            .collect();
        let out = plain().render_matches(&matches);
        assert!(out.contains("Found 60 potential speed patterns"));
        assert!(out.contains("... and 10 more"));
    }

    #[test]
    fn test_render_diff_groups() {
        let old = vec![0u8; 100];
        let mut new = old.clone();
        new[10] = 1;
        new[12] = 2;
        let out = plain().render_diff(&diff(&old, &new));
        assert!(out.contains("Difference groups: 1"));
        assert!(out.contains("0x000a-0x000c (2 bytes)"));
        assert!(out.contains("0x000c: 00 -> 02"));
    }

    #[test]
    fn test_render_suggestion_positions() {
        let suggestion = PatchSuggestion {
            current_value: 32,
            target_value: 40,
            family: EncodingFamily::OneByte,
            old_pattern: vec![0x20],
            new_pattern: vec![0x28],
            occurrences: 15,
            confidence: 0.5,
            positions: (0..15).map(|i| i * 0x10).collect(),
        };
        let out = plain().render_suggestion(1, &suggestion);
        assert!(out.contains("0x0090]"));
        assert!(!out.contains("0x00a0"));
    }

    #[test]
    fn test_render_missing_header() {
        assert!(plain().render_header(None).contains("shorter than the header window"));
    }
}
