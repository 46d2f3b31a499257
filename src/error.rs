//! # DCP Error Handling
//!
//! This module defines the DcpError enum, which represents the different error
//! types that can occur while decoding or encoding DCP frames.

use std::fmt;
use thiserror::Error;

/// Protocol layer an error was detected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Ethernet,
    Telegram,
    Block,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layer::Ethernet => "Ethernet header",
            Layer::Telegram => "telegram",
            Layer::Block => "block",
        };
        f.write_str(name)
    }
}

/// Represents the different error types that can occur in the DCP crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DcpError {
    /// The supplied bytes are shorter than the structure being decoded.
    #[error("Truncated {layer} at offset {offset}: need {needed} bytes, got {available}")]
    TruncatedBuffer {
        layer: Layer,
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A length field claims bytes that are not there, or the declared telegram
    /// data length ends inside a block.
    #[error("Inconsistent length in {layer} at offset {offset}: declared {declared}, available {available}")]
    InconsistentLength {
        layer: Layer,
        offset: usize,
        declared: usize,
        available: usize,
    },

    /// A value handed to an encoder or builder cannot be represented on the wire.
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Indicates an invalid hexadecimal string was provided.
    #[error("Invalid hexadecimal string")]
    InvalidHexString,

    /// Indicates a nom parsing error.
    #[error("Nom error: {0}")]
    NomError(String),
}

impl DcpError {
    /// Moves the reported offset by `base`, used when an inner structure was
    /// decoded from a sub-slice of the caller's buffer.
    pub fn rebase(self, base: usize) -> Self {
        match self {
            DcpError::TruncatedBuffer {
                layer,
                offset,
                needed,
                available,
            } => DcpError::TruncatedBuffer {
                layer,
                offset: offset + base,
                needed,
                available,
            },
            DcpError::InconsistentLength {
                layer,
                offset,
                declared,
                available,
            } => DcpError::InconsistentLength {
                layer,
                offset: offset + base,
                declared,
                available,
            },
            other => other,
        }
    }

    /// Layer the error was raised in, if it is a structural decode error.
    pub fn layer(&self) -> Option<Layer> {
        match self {
            DcpError::TruncatedBuffer { layer, .. } | DcpError::InconsistentLength { layer, .. } => {
                Some(*layer)
            }
            _ => None,
        }
    }

    /// Offset the error was raised at, if it is a structural decode error.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DcpError::TruncatedBuffer { offset, .. }
            | DcpError::InconsistentLength { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

/// Returns `input` unchanged if it holds at least `needed` bytes.
pub(crate) fn ensure_len(
    input: &[u8],
    needed: usize,
    layer: Layer,
    offset: usize,
) -> Result<&[u8], DcpError> {
    if input.len() < needed {
        return Err(DcpError::TruncatedBuffer {
            layer,
            offset,
            needed,
            available: input.len(),
        });
    }
    Ok(input)
}

impl From<nom::Err<nom::error::Error<&[u8]>>> for DcpError {
    fn from(err: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        match err {
            nom::Err::Incomplete(needed) => DcpError::NomError(format!("incomplete: {needed:?}")),
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                DcpError::NomError(format!("{:?} with {} bytes left", e.code, e.input.len()))
            }
        }
    }
}
