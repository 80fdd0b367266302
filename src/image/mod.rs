// Tue Jan 13 2026 - Alex

pub mod error;
pub mod firmware;

pub use error::ImageError;
pub use firmware::FirmwareImage;
