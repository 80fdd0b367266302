// Tue Jan 15 2026 - Alex

pub mod binary;

pub use binary::{
    byte_differences, diff, group_differences, BinaryDiff, ByteDifference, DiffRegion, DiffResult,
    SizeMismatch, MAX_REPORTED_DIFFERENCES, MAX_REPORTED_REGIONS, PROXIMITY_THRESHOLD,
};
