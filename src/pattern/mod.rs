// Tue Jan 13 2026 - Alex

pub mod encoding;
pub mod error;
pub mod scanner;

pub use encoding::{
    decode, encode, encodings_for, encodings_in, EncodedRepresentation, EncodingFamily, FamilySet,
};
pub use error::EncodingError;
pub use scanner::{find_all, PatternMatch, PatternScanner, DEFAULT_SPEED_MENU};

/// Scans `data` for every encoding of every value in `menu` with the default
/// scanner settings.
pub fn scan(data: &[u8], menu: &[u64]) -> Vec<PatternMatch> {
    PatternScanner::new().scan(data, menu)
}
