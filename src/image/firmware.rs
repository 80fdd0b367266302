// Tue Jan 13 2026 - Alex

use crate::image::ImageError;
use crate::utils::hex::to_hex;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Immutable firmware payload. Patching always produces a new image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareImage {
    data: Arc<[u8]>,
    source: Option<PathBuf>,
}

impl FirmwareImage {
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        let data: Vec<u8> = data.into();
        Self {
            data: Arc::from(data),
            source: None,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ImageError> {
        let path_buf = path.as_ref().to_path_buf();
        let load_err = |source| ImageError::Load {
            path: path_buf.clone(),
            source,
        };

        let mut file = File::open(&path_buf).map_err(load_err)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data).map_err(load_err)?;

        log::info!("Loaded firmware {} ({} bytes)", path_buf.display(), data.len());

        Ok(Self {
            data: Arc::from(data),
            source: Some(path_buf),
        })
    }

    /// Writes the full image to `path`. Content lands in a sibling partial file
    /// first and is renamed into place, so readers never see a truncated image.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ImageError> {
        let path = path.as_ref();
        let write_err = |source| ImageError::Write {
            path: path.to_path_buf(),
            source,
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "firmware".to_string());
        let partial = path.with_file_name(format!(".{}.partial", file_name));

        let result = File::create(&partial)
            .and_then(|mut file| {
                file.write_all(&self.data)?;
                file.sync_all()
            })
            .and_then(|_| fs::rename(&partial, path));

        if let Err(e) = result {
            let _ = fs::remove_file(&partial);
            return Err(write_err(e));
        }

        log::info!("Wrote firmware {} ({} bytes)", path.display(), self.data.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.data.to_vec()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// SHA-256 of the whole image as lowercase hex.
    pub fn digest(&self) -> String {
        to_hex(&Sha256::digest(&self.data))
    }
}

impl AsRef<[u8]> for FirmwareImage {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<Vec<u8>> for FirmwareImage {
    fn from(data: Vec<u8>) -> Self {
        Self::from_bytes(data)
    }
}
