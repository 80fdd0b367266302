// Tue Jan 13 2026 - Alex

pub mod applier;
pub mod error;

pub use applier::{apply, apply_and_write, Edit, PatchApplier};
pub use error::PatchError;
