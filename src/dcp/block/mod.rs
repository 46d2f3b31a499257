//! # DCP Blocks
//!
//! A block is a header ([`BlockHeader`]) followed by a body whose layout is
//! selected by the option/suboption pair. Each supported pair has its own
//! type implementing [`BlockCodec`]; [`Block`] wraps all of them so a telegram
//! can hold an ordered list of mixed blocks.
//!
//! Decoding always reads the header first, with the shape supplied by the
//! caller, and starts the body at `header.size()`. Encoding recomputes the
//! length field from the current field values, so a block built or modified
//! in code is written consistently.

mod all;
mod control_response;
mod device_id;
mod device_initiative;
mod device_instance;
mod ip_parameter;
mod manufacturer_specific;
mod name_of_station;

pub use all::All;
pub use control_response::ControlResponse;
pub use device_id::DeviceId;
pub use device_initiative::DeviceInitiative;
pub use device_instance::DeviceInstance;
pub use ip_parameter::IpParameter;
pub use manufacturer_specific::ManufacturerSpecific;
pub use name_of_station::NameOfStation;

use crate::constants::{BLOCK_PREFIX_LEN, TEXT_BLOCK_LENGTH_ADJUST};
use crate::dcp::dispatch::BlockKind;
use crate::dcp::discriminator::BlockType;
use crate::dcp::header::{BlockHeader, HeaderShape};
use crate::error::{ensure_len, DcpError, Layer};
use bytes::BytesMut;
use serde::{Deserialize, Serialize};

/// Encode/decode contract shared by every block variant.
pub trait BlockCodec: Sized {
    /// Option/suboption written by blocks built in this crate.
    const BLOCK_TYPE: BlockType;

    fn header(&self) -> &BlockHeader;

    /// Bytes after the header.
    fn body_len(&self) -> usize;

    /// Value of the length field: optional header words plus body.
    fn wire_length(&self) -> usize {
        self.header().shape().optional_len() + self.body_len()
    }

    fn decode(input: &[u8], shape: HeaderShape) -> Result<Self, DcpError>;

    fn encode_body(&self, buf: &mut BytesMut);

    /// On-wire size without padding.
    fn len(&self) -> usize {
        self.header().size() + self.body_len()
    }

    fn encode_into(&self, buf: &mut BytesMut) -> Result<(), DcpError> {
        let wire_length = self.wire_length();
        let length = u16::try_from(wire_length).map_err(|_| DcpError::InvalidField {
            field: "block length",
            reason: format!("{wire_length} bytes do not fit the 16-bit length field"),
        })?;
        self.header().encode_with_length(buf, length);
        self.encode_body(buf);
        Ok(())
    }

    fn encode(&self) -> Result<Vec<u8>, DcpError> {
        let mut buf = BytesMut::with_capacity(self.len());
        self.encode_into(&mut buf)?;
        Ok(buf.to_vec())
    }
}

/// Header for a freshly built block with its length already accounted.
pub(crate) fn build_header(block_type: BlockType, shape: HeaderShape, body_len: usize) -> BlockHeader {
    let length = shape.optional_len() + body_len;
    BlockHeader::new(block_type, shape).with_length(length as u16)
}

/// Header for a freshly built text block: the length field counts the text
/// plus the fixed two-byte sub-field.
pub(crate) fn build_text_header(block_type: BlockType, shape: HeaderShape, text: &str) -> BlockHeader {
    let length = text.len() + TEXT_BLOCK_LENGTH_ADJUST;
    BlockHeader::new(block_type, shape).with_length(length.min(u16::MAX as usize) as u16)
}

/// Decodes the header and returns it with exactly `body_len` body bytes.
pub(crate) fn split_fixed(
    input: &[u8],
    shape: HeaderShape,
    body_len: usize,
) -> Result<(BlockHeader, &[u8]), DcpError> {
    let (header, offset) = BlockHeader::decode(input, shape)?;
    ensure_len(input, offset + body_len, Layer::Block, 0)?;
    Ok((header, &input[offset..offset + body_len]))
}

/// Zero bytes written after the text of a text block whose header is shorter
/// than the two-byte sub-field its length field accounts for.
pub(crate) fn text_fill_len(shape: HeaderShape) -> usize {
    TEXT_BLOCK_LENGTH_ADJUST.saturating_sub(shape.optional_len())
}

/// Decodes the header of a text block and returns it with the text bytes,
/// `length - 2` of them starting right after the header. Without an optional
/// header word the block still spans `4 + length` bytes; the trailing fill is
/// checked but not returned.
pub(crate) fn split_text(input: &[u8], shape: HeaderShape) -> Result<(BlockHeader, &[u8]), DcpError> {
    let (header, offset) = BlockHeader::decode(input, shape)?;
    let declared = header.length as usize;
    let inconsistent = DcpError::InconsistentLength {
        layer: Layer::Block,
        offset: 2,
        declared,
        available: input.len() - BLOCK_PREFIX_LEN,
    };
    let Some(body_len) = declared.checked_sub(TEXT_BLOCK_LENGTH_ADJUST) else {
        return Err(inconsistent);
    };
    let needed = (offset + body_len).max(BLOCK_PREFIX_LEN + declared);
    if input.len() < needed {
        return Err(inconsistent);
    }
    Ok((header, &input[offset..offset + body_len]))
}

/// Any block the dispatch table knows how to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    All(All),
    IpParameter(IpParameter),
    NameOfStation(NameOfStation),
    DeviceId(DeviceId),
    DeviceInstance(DeviceInstance),
    ManufacturerSpecific(ManufacturerSpecific),
    DeviceInitiative(DeviceInitiative),
    ControlResponse(ControlResponse),
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::All(_) => BlockKind::All,
            Block::IpParameter(_) => BlockKind::IpParameter,
            Block::NameOfStation(_) => BlockKind::NameOfStation,
            Block::DeviceId(_) => BlockKind::DeviceId,
            Block::DeviceInstance(_) => BlockKind::DeviceInstance,
            Block::ManufacturerSpecific(_) => BlockKind::ManufacturerSpecific,
            Block::DeviceInitiative(_) => BlockKind::DeviceInitiative,
            Block::ControlResponse(_) => BlockKind::ControlResponse,
        }
    }

    pub fn header(&self) -> &BlockHeader {
        match self {
            Block::All(b) => b.header(),
            Block::IpParameter(b) => b.header(),
            Block::NameOfStation(b) => b.header(),
            Block::DeviceId(b) => b.header(),
            Block::DeviceInstance(b) => b.header(),
            Block::ManufacturerSpecific(b) => b.header(),
            Block::DeviceInitiative(b) => b.header(),
            Block::ControlResponse(b) => b.header(),
        }
    }

    /// On-wire size without padding.
    pub fn len(&self) -> usize {
        match self {
            Block::All(b) => b.len(),
            Block::IpParameter(b) => b.len(),
            Block::NameOfStation(b) => b.len(),
            Block::DeviceId(b) => b.len(),
            Block::DeviceInstance(b) => b.len(),
            Block::ManufacturerSpecific(b) => b.len(),
            Block::DeviceInitiative(b) => b.len(),
            Block::ControlResponse(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// On-wire size including the pad byte that follows odd-sized blocks.
    pub fn padded_len(&self) -> usize {
        padded(self.len())
    }

    pub fn encode_into(&self, buf: &mut BytesMut) -> Result<(), DcpError> {
        match self {
            Block::All(b) => b.encode_into(buf),
            Block::IpParameter(b) => b.encode_into(buf),
            Block::NameOfStation(b) => b.encode_into(buf),
            Block::DeviceId(b) => b.encode_into(buf),
            Block::DeviceInstance(b) => b.encode_into(buf),
            Block::ManufacturerSpecific(b) => b.encode_into(buf),
            Block::DeviceInitiative(b) => b.encode_into(buf),
            Block::ControlResponse(b) => b.encode_into(buf),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, DcpError> {
        let mut buf = BytesMut::with_capacity(self.len());
        self.encode_into(&mut buf)?;
        Ok(buf.to_vec())
    }
}

/// Rounds a block size up to the next even number.
pub fn padded(len: usize) -> usize {
    len + (len % 2)
}

macro_rules! impl_from_block {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Block {
                fn from(block: $variant) -> Self {
                    Block::$variant(block)
                }
            }
        )*
    };
}

impl_from_block!(
    All,
    IpParameter,
    NameOfStation,
    DeviceId,
    DeviceInstance,
    ManufacturerSpecific,
    DeviceInitiative,
    ControlResponse,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_rounds_to_even() {
        assert_eq!(padded(4), 4);
        assert_eq!(padded(7), 8);
        assert_eq!(padded(11), 12);
    }

    #[test]
    fn text_length_below_adjust_is_inconsistent() {
        let bytes = [0x02, 0x02, 0x00, 0x01, 0x00];
        let err = split_text(&bytes, HeaderShape::BARE).unwrap_err();
        assert!(matches!(
            err,
            DcpError::InconsistentLength {
                layer: Layer::Block,
                declared: 1,
                ..
            }
        ));
    }

    #[test]
    fn wrapped_block_reports_kind_and_len() {
        let block: Block = NameOfStation::with_info(0, "zeiss").into();
        assert_eq!(block.kind(), BlockKind::NameOfStation);
        assert_eq!(block.len(), 11);
        assert_eq!(block.padded_len(), 12);
    }
}
