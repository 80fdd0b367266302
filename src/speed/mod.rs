// Tue Jan 13 2026 - Alex

pub mod candidate;
pub mod suggestion;

pub use candidate::{aggregate, SpeedCandidate, DISPLAY_POSITIONS};
pub use suggestion::{PatchSuggestion, SuggestionBuilder};

use crate::config::Config;
use crate::pattern::PatternScanner;

/// Scan and aggregate in one step using the configured menu and families.
pub fn speed_candidates(data: &[u8], config: &Config) -> Vec<SpeedCandidate> {
    let matches = PatternScanner::from_config(config).scan(data, &config.speed_menu);
    aggregate(&matches)
}

pub fn suggest(candidates: &[SpeedCandidate], target: u64) -> Vec<PatchSuggestion> {
    SuggestionBuilder::new().build(candidates, target)
}

pub fn select_patch(candidates: &[SpeedCandidate], old: u64, new: u64) -> Option<PatchSuggestion> {
    SuggestionBuilder::new().select(candidates, old, new)
}
