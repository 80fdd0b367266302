// Tue Jan 13 2026 - Alex

use crate::image::ImageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Patch at offset 0x{offset:x} ({len} bytes) exceeds firmware size {image_len}")]
    OutOfRange {
        offset: usize,
        len: usize,
        image_len: usize,
    },
    #[error("Invalid edit: {0}")]
    InvalidEdit(String),
    #[error(transparent)]
    Image(#[from] ImageError),
}
