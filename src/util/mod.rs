//! # Utility Modules
//!
//! Helpers shared by the codec, the logging module and the CLI.

pub mod hex;

pub use hex::{decode_hex, encode_hex, format_hex_compact, pretty_hex, HexError};
