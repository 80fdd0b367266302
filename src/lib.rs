// Tue Jan 15 2026 - Alex

pub mod analysis;
pub mod config;
pub mod diff;
pub mod image;
pub mod output;
pub mod patch;
pub mod pattern;
pub mod speed;
pub mod ui;
pub mod utils;
pub mod validation;

pub use analysis::{extract_strings, HeaderAnalyzer};
pub use config::Config;
pub use diff::{BinaryDiff, DiffResult};
pub use image::FirmwareImage;
pub use patch::{Edit, PatchApplier};
pub use pattern::PatternScanner;
pub use speed::{PatchSuggestion, SpeedCandidate, SuggestionBuilder};
