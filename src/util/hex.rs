//! # Hex Encoding/Decoding Utilities
//!
//! Hex helpers used by the CLI and by debug logging to move captured DCP
//! frames in and out of text form. Captures pasted from Wireshark come as
//! `01:0e:cf:...`, `01 0e cf ...` or one long string; all are accepted.
//!
//! ```rust
//! use dcp_rs::util::hex::{encode_hex, decode_hex, pretty_hex};
//!
//! let data = [0xfe, 0xfe, 0x05, 0x00];
//! assert_eq!(encode_hex(&data), "fefe0500");
//! assert_eq!(decode_hex("fe fe 05 00").unwrap(), data);
//! println!("{}", pretty_hex(&data, 16));
//! ```

use crate::error::DcpError;
use thiserror::Error;

/// Errors that can occur during hex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),

    #[error("Empty hex string")]
    EmptyString,

    #[error("Hex decoding error: {0}")]
    DecodeError(String),
}

impl From<HexError> for DcpError {
    fn from(_: HexError) -> Self {
        DcpError::InvalidHexString
    }
}

/// Encode bytes to lowercase hex string
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Decode hex string to bytes
///
/// Whitespace, `:` and `-` separators are stripped; any other non-hex
/// character is an error.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    let cleaned: String = hex_str
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();

    if cleaned.is_empty() {
        return Err(HexError::EmptyString);
    }

    if cleaned.len() % 2 != 0 {
        return Err(HexError::OddLength(cleaned.len()));
    }

    hex::decode(&cleaned).map_err(|e| HexError::DecodeError(e.to_string()))
}

/// Pretty-print hex data with offsets and an ASCII column, for frame dumps
/// in debug logs.
pub fn pretty_hex(data: &[u8], bytes_per_line: usize) -> String {
    let bytes_per_line = bytes_per_line.max(1);
    data.chunks(bytes_per_line)
        .enumerate()
        .map(|(i, chunk)| {
            let hex = format_hex_compact(chunk);
            let ascii: String = chunk
                .iter()
                .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
                .collect();
            format!(
                "{:04x}: {:<width$} |{}|",
                i * bytes_per_line,
                hex,
                ascii,
                width = bytes_per_line * 3 - 1
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format hex data for compact display (useful for logs)
///
/// Formats data as "fe fe 05 00" with spaces between bytes.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
