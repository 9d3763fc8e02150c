//! Result record layout as transmitted by the code reader.
//!
//! The device sends a 16-bit content length in its native byte order
//! followed by a fixed 254-byte content buffer, with no padding between
//! them. Fields are decoded by offset from a raw byte buffer so the layout
//! does not depend on struct packing.

use std::borrow::Cow;
use std::str::Utf8Error;

/// Capacity of the content buffer in bytes
pub const CONTENT_BYTE_COUNT: usize = 254;

const LENGTH_OFFSET: usize = 0;
const CONTENT_OFFSET: usize = 2;

/// Total size of one record on the wire
pub const RESULTS_WIRE_SIZE: usize = CONTENT_OFFSET + CONTENT_BYTE_COUNT;

/// Longest content that still leaves room for the terminator
pub const MAX_CONTENT_LENGTH: u16 = (CONTENT_BYTE_COUNT - 1) as u16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeReaderResults {
    pub content_length: u16,
    pub content_bytes: [u8; CONTENT_BYTE_COUNT],
}

impl Default for CodeReaderResults {
    fn default() -> Self {
        Self {
            content_length: 0,
            content_bytes: [0u8; CONTENT_BYTE_COUNT],
        }
    }
}

impl CodeReaderResults {
    /// Decode a record exactly as it arrived from the device.
    ///
    /// No clamping happens here; see [`CodeReaderResults::terminate`].
    pub fn from_wire(raw: &[u8; RESULTS_WIRE_SIZE]) -> Self {
        let content_length = u16::from_ne_bytes([raw[LENGTH_OFFSET], raw[LENGTH_OFFSET + 1]]);
        let mut content_bytes = [0u8; CONTENT_BYTE_COUNT];
        content_bytes.copy_from_slice(&raw[CONTENT_OFFSET..]);
        Self {
            content_length,
            content_bytes,
        }
    }

    pub fn to_wire(&self) -> [u8; RESULTS_WIRE_SIZE] {
        let mut raw = [0u8; RESULTS_WIRE_SIZE];
        raw[LENGTH_OFFSET..CONTENT_OFFSET].copy_from_slice(&self.content_length.to_ne_bytes());
        raw[CONTENT_OFFSET..].copy_from_slice(&self.content_bytes);
        raw
    }

    /// Clamp the length and null-terminate the content.
    ///
    /// Older firmware did not terminate the string and could report a
    /// length that fills the whole buffer.
    pub fn terminate(&mut self) {
        if self.content_length > MAX_CONTENT_LENGTH {
            self.content_length = MAX_CONTENT_LENGTH;
        }
        self.content_bytes[self.content_length as usize] = 0;
    }

    /// Valid content bytes, without the terminator
    pub fn content(&self) -> &[u8] {
        let len = self.content_length.min(MAX_CONTENT_LENGTH) as usize;
        &self.content_bytes[..len]
    }

    pub fn content_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(self.content())
    }

    pub fn content_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.content())
    }

    pub fn has_content(&self) -> bool {
        self.content_length > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_with(length: u16, content: &[u8]) -> [u8; RESULTS_WIRE_SIZE] {
        let mut raw = [0xAAu8; RESULTS_WIRE_SIZE];
        raw[..2].copy_from_slice(&length.to_ne_bytes());
        raw[2..2 + content.len()].copy_from_slice(content);
        raw
    }

    #[test]
    fn wire_size_has_no_padding() {
        assert_eq!(RESULTS_WIRE_SIZE, 256);
    }

    #[test]
    fn decodes_length_in_native_order() {
        let results = CodeReaderResults::from_wire(&raw_with(0x0102, b"abc"));
        assert_eq!(results.content_length, 0x0102);
        assert_eq!(&results.content_bytes[..3], b"abc");
        assert_eq!(results.content_bytes[3], 0xAA);
        assert_eq!(results.to_wire(), raw_with(0x0102, b"abc"));
    }

    #[test]
    fn terminate_writes_null_after_content() {
        let mut results = CodeReaderResults::from_wire(&raw_with(5, b"HELLO"));
        results.terminate();
        assert_eq!(results.content_length, 5);
        assert_eq!(results.content_bytes[5], 0);
        assert_eq!(results.content_str().unwrap(), "HELLO");
    }

    #[test]
    fn terminate_clamps_oversized_length() {
        let mut results = CodeReaderResults::from_wire(&raw_with(300, b""));
        results.terminate();
        assert_eq!(results.content_length, 253);
        assert_eq!(results.content_bytes[253], 0);
        assert_eq!(results.content().len(), 253);
    }

    #[test]
    fn length_equal_to_capacity_is_clamped() {
        let mut results = CodeReaderResults::from_wire(&raw_with(254, b""));
        results.terminate();
        assert_eq!(results.content_length, 253);
    }

    #[test]
    fn empty_record_has_no_content() {
        let mut results = CodeReaderResults::default();
        results.terminate();
        assert!(!results.has_content());
        assert_eq!(results.content(), b"");
    }

    #[test]
    fn invalid_utf8_is_replaced_in_lossy_view() {
        let mut results = CodeReaderResults::from_wire(&raw_with(3, &[b'o', 0xFF, b'k']));
        results.terminate();
        assert!(results.content_str().is_err());
        assert_eq!(results.content_lossy(), "o\u{FFFD}k");
    }
}
