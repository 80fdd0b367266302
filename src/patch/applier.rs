// Tue Jan 13 2026 - Alex

use crate::image::FirmwareImage;
use crate::patch::PatchError;
use crate::utils::hex::{parse_hex, parse_offset, to_spaced_hex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

impl Edit {
    pub fn new(offset: usize, bytes: Vec<u8>) -> Self {
        Self { offset, bytes }
    }

    /// Exclusive end offset, `None` on overflow.
    pub fn end(&self) -> Option<usize> {
        self.offset.checked_add(self.bytes.len())
    }

    pub fn fits(&self, image_len: usize) -> bool {
        self.end().map_or(false, |end| end <= image_len)
    }
}

impl FromStr for Edit {
    type Err = PatchError;

    /// `OFFSET:HEX`, offset decimal or `0x` prefixed, e.g. `0x40:2800`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (offset, hex) = s
            .split_once(':')
            .ok_or_else(|| PatchError::InvalidEdit(format!("expected OFFSET:HEX, got '{}'", s)))?;

        let offset = parse_offset(offset)
            .ok_or_else(|| PatchError::InvalidEdit(format!("bad offset '{}'", offset)))?;
        let bytes = parse_hex(hex)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| PatchError::InvalidEdit(format!("bad hex bytes '{}'", hex)))?;

        Ok(Self { offset, bytes })
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}: {}", self.offset, to_spaced_hex(&self.bytes))
    }
}

pub struct PatchApplier;

impl PatchApplier {
    /// Validates every edit against the image length, then writes them in order
    /// into a copy. Any out-of-range edit rejects the whole batch. Overlapping
    /// edits resolve last-write-wins.
    pub fn apply(image: &FirmwareImage, edits: &[Edit]) -> Result<FirmwareImage, PatchError> {
        let image_len = image.len();

        if let Some(bad) = edits.iter().find(|e| !e.fits(image_len)) {
            log::warn!("Rejecting patch batch of {} edits: {} out of range", edits.len(), bad);
            return Err(PatchError::OutOfRange {
                offset: bad.offset,
                len: bad.bytes.len(),
                image_len,
            });
        }

        let mut data = image.to_vec();
        for edit in edits {
            data[edit.offset..edit.offset + edit.bytes.len()].copy_from_slice(&edit.bytes);
        }

        log::debug!("Applied {} edits", edits.len());
        Ok(FirmwareImage::from_bytes(data))
    }

    /// Applies the batch and persists it. Nothing is written when any edit is
    /// rejected.
    pub fn apply_and_write<P: AsRef<Path>>(
        image: &FirmwareImage,
        edits: &[Edit],
        output: P,
    ) -> Result<FirmwareImage, PatchError> {
        let patched = Self::apply(image, edits)?;
        patched.write_to(output)?;
        Ok(patched)
    }
}

pub fn apply(image: &FirmwareImage, edits: &[Edit]) -> Result<FirmwareImage, PatchError> {
    PatchApplier::apply(image, edits)
}

pub fn apply_and_write<P: AsRef<Path>>(
    image: &FirmwareImage,
    edits: &[Edit],
    output: P,
) -> Result<FirmwareImage, PatchError> {
    PatchApplier::apply_and_write(image, edits, output)
}
