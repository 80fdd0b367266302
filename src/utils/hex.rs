// Tue Jan 13 2026 - Alex

use itertools::Itertools;

/// Contiguous lowercase hex, e.g. `[0x20, 0x00]` -> `"2000"`.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).join("")
}

/// Space separated uppercase hex, e.g. `[0x20, 0x00]` -> `"20 00"`.
pub fn to_spaced_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).join(" ")
}

/// Parses hex with optional whitespace between bytes. Returns `None` on odd
/// digit counts or non-hex characters.
pub fn parse_hex(s: &str) -> Option<Vec<u8>> {
    let digits: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 || !digits.iter().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    digits
        .chunks(2)
        .map(|pair| {
            let hex: String = pair.iter().collect();
            u8::from_str_radix(&hex, 16).ok()
        })
        .collect()
}

/// Parses a decimal or `0x`-prefixed offset.
pub fn parse_offset(s: &str) -> Option<usize> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

pub fn format_offset(offset: usize) -> String {
    format!("0x{:04x}", offset)
}
