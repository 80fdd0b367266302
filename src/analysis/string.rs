// Tue Jan 13 2026 - Alex

use serde::Serialize;
use std::fmt;

pub const DEFAULT_MIN_LENGTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedString {
    pub offset: usize,
    pub text: String,
}

impl fmt::Display for ExtractedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}: {}", self.offset, self.text)
    }
}

/// Lazy single-pass iterator over maximal printable ASCII runs.
pub struct StringIter<'a> {
    data: &'a [u8],
    pos: usize,
    min_length: usize,
}

impl<'a> StringIter<'a> {
    pub fn new(data: &'a [u8], min_length: usize) -> Self {
        Self {
            data,
            pos: 0,
            min_length,
        }
    }
}

impl<'a> Iterator for StringIter<'a> {
    type Item = ExtractedString;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.data.len() {
            while self.pos < self.data.len() && !is_printable(self.data[self.pos]) {
                self.pos += 1;
            }

            let start = self.pos;
            while self.pos < self.data.len() && is_printable(self.data[self.pos]) {
                self.pos += 1;
            }

            let run = &self.data[start..self.pos];
            if !run.is_empty() && run.len() >= self.min_length {
                // printable ASCII is always valid UTF-8
                let text = run.iter().map(|&b| b as char).collect();
                return Some(ExtractedString { offset: start, text });
            }
        }

        None
    }
}

fn is_printable(byte: u8) -> bool {
    (0x20..=0x7E).contains(&byte)
}

pub fn extract_strings(data: &[u8], min_length: usize) -> StringIter<'_> {
    StringIter::new(data, min_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_length_filter() {
        let strings: Vec<_> = extract_strings(b"\x00ABCD\x00EF\x00", 3).collect();
        assert_eq!(
            strings,
            vec![ExtractedString {
                offset: 1,
                text: "ABCD".to_string()
            }]
        );
    }

    #[test]
    fn test_trailing_run_and_restart() {
        let data = b"\x01hello\x7fworld";
        let first: Vec<_> = extract_strings(data, 4).collect();
        let second: Vec<_> = extract_strings(data, 4).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[1].offset, 7);
        assert_eq!(first[1].text, "world");
    }

    #[test]
    fn test_printable_range_edges() {
        let strings: Vec<_> = extract_strings(b" ~\x1f\x7f", 2).collect();
        assert_eq!(strings.len(), 1);
        assert_eq!(strings[0].text, " ~");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_strings(&[], 1).count(), 0);
        assert_eq!(extract_strings(&[0u8; 8], 0).count(), 0);
    }
}
