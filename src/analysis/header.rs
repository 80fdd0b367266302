// Tue Jan 13 2026 - Alex

use crate::config::Config;
use crate::image::FirmwareImage;
use crate::utils::hex::to_hex;
use serde::Serialize;

pub const HEADER_WINDOW: usize = 64;
pub const MAGIC_WINDOW: usize = 4;
pub const MAGIC_SCAN_OFFSETS: usize = 28;
pub const FIRST_BYTES_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MagicCandidate {
    pub offset: usize,
    pub bytes: [u8; MAGIC_WINDOW],
}

impl MagicCandidate {
    pub fn to_hex(&self) -> String {
        to_hex(&self.bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderInfo {
    pub size: usize,
    pub digest: String,
    pub first_bytes: Vec<u8>,
    pub entropy: f64,
    pub magic_candidates: Vec<MagicCandidate>,
}

pub struct HeaderAnalyzer {
    window: usize,
    magic_offsets: usize,
}

impl HeaderAnalyzer {
    pub fn new() -> Self {
        Self {
            window: HEADER_WINDOW,
            magic_offsets: MAGIC_SCAN_OFFSETS,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            window: config.header_window,
            magic_offsets: config.magic_scan_offsets,
        }
    }

    /// `None` when the image is shorter than the header window.
    pub fn analyze(&self, image: &FirmwareImage) -> Option<HeaderInfo> {
        let data = image.as_bytes();
        if data.len() < self.window {
            log::debug!(
                "Image of {} bytes is shorter than the {} byte header window",
                data.len(),
                self.window
            );
            return None;
        }

        let header = &data[..self.window];

        Some(HeaderInfo {
            size: data.len(),
            digest: image.digest(),
            first_bytes: header[..FIRST_BYTES_LEN.min(header.len())].to_vec(),
            entropy: shannon_entropy(header),
            magic_candidates: self.magic_candidates(header),
        })
    }

    fn magic_candidates(&self, header: &[u8]) -> Vec<MagicCandidate> {
        header
            .windows(MAGIC_WINDOW)
            .take(self.magic_offsets)
            .enumerate()
            .filter(|(_, w)| !w.iter().all(|&b| b == 0x00) && !w.iter().all(|&b| b == 0xFF))
            .map(|(offset, w)| MagicCandidate {
                offset,
                bytes: [w[0], w[1], w[2], w[3]],
            })
            .collect()
    }
}

impl Default for HeaderAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn analyze(image: &FirmwareImage) -> Option<HeaderInfo> {
    HeaderAnalyzer::new().analyze(image)
}

/// Shannon entropy in bits per byte over the observed byte distribution.
pub fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut counts = [0usize; 256];
    for &b in data {
        counts[b as usize] += 1;
    }

    let len = data.len() as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| c as f64 / len)
        .fold(0.0, |acc, p| acc - p * p.log2())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_image_has_no_header() {
        let image = FirmwareImage::from_bytes(vec![0x11; 63]);
        assert!(analyze(&image).is_none());
    }

    #[test]
    fn test_entropy_bounds() {
        assert_eq!(shannon_entropy(&[0u8; 64]), 0.0);
        assert!(!shannon_entropy(&[0u8; 64]).is_sign_negative());
        assert!(!shannon_entropy(&[0xFFu8; 64]).is_sign_negative());
        let uniform: Vec<u8> = (0..64).collect();
        assert!((shannon_entropy(&uniform) - 6.0).abs() < 1e-9);
        assert!((shannon_entropy(&[0, 1, 0, 1]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_header_info() {
        let mut data = vec![0u8; 128];
        data[0..4].copy_from_slice(b"NIU\x01");
        let image = FirmwareImage::from_bytes(data);

        let info = analyze(&image).unwrap();
        assert_eq!(info.size, 128);
        assert_eq!(info.first_bytes.len(), 16);
        assert_eq!(info.digest.len(), 64);

        // windows 0..=3 each overlap the marker, later ones are all zero
        let offsets: Vec<usize> = info.magic_candidates.iter().map(|m| m.offset).collect();
        assert_eq!(offsets, vec![0, 1, 2, 3]);
        assert_eq!(info.magic_candidates[0].to_hex(), "4e495501");
    }

    #[test]
    fn test_magic_scan_stops_at_offset_27() {
        let data: Vec<u8> = (1..=64).collect();
        let info = analyze(&FirmwareImage::from_bytes(data)).unwrap();
        assert_eq!(info.magic_candidates.len(), 28);
        assert_eq!(info.magic_candidates.last().unwrap().offset, 27);
    }

    #[test]
    fn test_all_ff_windows_skipped() {
        let mut data = vec![0xFFu8; 64];
        data[10] = 0x00;
        let info = analyze(&FirmwareImage::from_bytes(data)).unwrap();
        let offsets: Vec<usize> = info.magic_candidates.iter().map(|m| m.offset).collect();
        assert_eq!(offsets, vec![7, 8, 9, 10]);
    }
}
