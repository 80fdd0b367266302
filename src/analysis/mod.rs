// Tue Jan 13 2026 - Alex

pub mod header;
pub mod string;

pub use header::{analyze, shannon_entropy, HeaderAnalyzer, HeaderInfo, MagicCandidate};
pub use string::{extract_strings, ExtractedString, StringIter};
