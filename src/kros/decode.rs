//! Byte-level decoding of KROS exports.
//!
//! KROS writes either UTF-8 (with or without a BOM) or Windows-1250, and the
//! delimiter drifted between program versions, so it is sniffed from a prefix
//! of the decoded text instead of assumed.

use encoding_rs::WINDOWS_1250;

use crate::core::ConvertError;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Number of characters sampled when sniffing the delimiter.
const SNIFF_PREFIX: usize = 1024;

/// Candidate delimiters, in preference order.
const DELIMITERS: [u8; 3] = [b';', b',', b'\t'];

/// Decode raw bytes, trying UTF-8 with BOM, plain UTF-8 and Windows-1250 in
/// order; the first clean decode wins.
pub(crate) fn decode(raw: &[u8]) -> Result<String, ConvertError> {
    let without_bom = raw.strip_prefix(&UTF8_BOM).unwrap_or(raw);
    if let Ok(text) = std::str::from_utf8(without_bom) {
        return Ok(text.to_owned());
    }
    let (text, _, had_errors) = WINDOWS_1250.decode(raw);
    if had_errors {
        return Err(ConvertError::Encoding);
    }
    Ok(text.into_owned())
}

/// Detect the field delimiter from the first [`SNIFF_PREFIX`] characters.
///
/// A candidate wins when every complete sampled line contains it the same
/// non-zero number of times. A line cut off by the sampling window is
/// ignored whenever at least one complete line precedes it.
pub(crate) fn sniff_delimiter(text: &str) -> Result<u8, ConvertError> {
    let end = text
        .char_indices()
        .nth(SNIFF_PREFIX)
        .map_or(text.len(), |(at, _)| at);
    let sample = &text[..end];
    let sample_is_cut = end < text.len();

    let mut lines: Vec<&str> = sample.lines().collect();
    if sample_is_cut && lines.len() > 1 && !sample.ends_with('\n') {
        lines.pop();
    }

    for candidate in DELIMITERS {
        let mut counts = lines
            .iter()
            .map(|line| line.bytes().filter(|&byte| byte == candidate).count());
        match counts.next() {
            Some(first) if first > 0 && counts.all(|count| count == first) => {
                return Ok(candidate);
            }
            _ => continue,
        }
    }
    Err(ConvertError::Dialect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_passes_through() {
        assert_eq!(decode("a;b;č".as_bytes()).unwrap(), "a;b;č");
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let mut raw = UTF8_BOM.to_vec();
        raw.extend_from_slice("a;b".as_bytes());
        assert_eq!(decode(&raw).unwrap(), "a;b");
    }

    #[test]
    fn windows_1250_fallback() {
        // "Košice" in Windows-1250; 0x9A is not valid UTF-8 here.
        let raw = b"Ko\x9Aice";
        assert_eq!(decode(raw).unwrap(), "Košice");
    }

    #[test]
    fn undecodable_bytes_fail() {
        // 0x81 is unmapped in Windows-1250 and invalid mid-stream UTF-8.
        assert_eq!(decode(b"Ko\x81ice"), Err(ConvertError::Encoding));
    }

    #[test]
    fn sniffs_semicolon() {
        assert_eq!(sniff_delimiter("a;b;c\n1;2;3\n").unwrap(), b';');
    }

    #[test]
    fn sniffs_comma() {
        assert_eq!(sniff_delimiter("a,b,c\n1,2,3").unwrap(), b',');
    }

    #[test]
    fn semicolon_preferred_over_comma() {
        assert_eq!(sniff_delimiter("a;b,c\n1;2,3\n").unwrap(), b';');
    }

    #[test]
    fn inconsistent_counts_fail() {
        assert_eq!(sniff_delimiter("a;b;c\n1;2"), Err(ConvertError::Dialect));
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(sniff_delimiter(""), Err(ConvertError::Dialect));
    }

    #[test]
    fn truncated_tail_line_is_ignored() {
        let mut text = String::new();
        for _ in 0..40 {
            text.push_str("x;y;z\n");
        }
        // The 1024-char window cuts into a later line; sniffing still works.
        text.push_str(&"q".repeat(2000));
        assert_eq!(sniff_delimiter(&text).unwrap(), b';');
    }
}
