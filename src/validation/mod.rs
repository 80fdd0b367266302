// Tue Jan 15 2026 - Alex

pub mod confidence;

pub use confidence::{confidence_for_occurrences, ConfidenceLevel};
