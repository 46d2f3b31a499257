//! # Block Header
//!
//! Common prefix of every DCP block:
//!
//! ```text
//! option(1) | suboption(1) | length(2) | [info(2)] | [qualifier(2)]
//! ```
//!
//! Whether the BlockInfo and BlockQualifier words are present cannot be seen in
//! the bytes. Responses to identify requests carry BlockInfo, set requests carry
//! a BlockQualifier, most other blocks carry neither. The caller passes that
//! knowledge in as a [`HeaderShape`].
//!
//! `length` counts every byte after the length field itself: the optional
//! words plus the block body.

use crate::constants::{BLOCK_OPTIONAL_FIELD_LEN, BLOCK_PREFIX_LEN};
use crate::dcp::discriminator::{BlockType, Category, Subtype};
use crate::dcp::service::{ServiceId, ServiceType};
use crate::error::{ensure_len, DcpError, Layer};
use bytes::{BufMut, BytesMut};
use nom::{
    combinator::cond,
    number::complete::{be_u16, be_u8},
    sequence::tuple,
    IResult,
};
use serde::{Deserialize, Serialize};

/// Which optional header words a block carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeaderShape {
    pub has_info: bool,
    pub has_qualifier: bool,
}

impl HeaderShape {
    /// Neither BlockInfo nor BlockQualifier.
    pub const BARE: Self = Self {
        has_info: false,
        has_qualifier: false,
    };

    /// BlockInfo only, as in identify responses.
    pub const WITH_INFO: Self = Self {
        has_info: true,
        has_qualifier: false,
    };

    /// BlockQualifier only, as in set requests.
    pub const WITH_QUALIFIER: Self = Self {
        has_info: false,
        has_qualifier: true,
    };

    /// Shape of every block inside a telegram with the given service fields.
    pub fn for_service(service_id: ServiceId, service_type: ServiceType) -> Self {
        Self {
            has_info: service_id == ServiceId::Identify && service_type == ServiceType::Response,
            has_qualifier: false,
        }
    }

    /// Bytes taken by the optional words.
    pub fn optional_len(&self) -> usize {
        let mut len = 0;
        if self.has_info {
            len += BLOCK_OPTIONAL_FIELD_LEN;
        }
        if self.has_qualifier {
            len += BLOCK_OPTIONAL_FIELD_LEN;
        }
        len
    }

    /// Full header size: 4, 6 or 8 bytes.
    pub fn header_len(&self) -> usize {
        BLOCK_PREFIX_LEN + self.optional_len()
    }
}

/// Decoded or to-be-encoded block header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub block_type: BlockType,
    pub length: u16,
    pub info: Option<u16>,
    pub qualifier: Option<u16>,
}

impl BlockHeader {
    /// Header of the given shape with zeroed length and optional words.
    pub fn new(block_type: BlockType, shape: HeaderShape) -> Self {
        Self {
            block_type,
            length: 0,
            info: shape.has_info.then_some(0),
            qualifier: shape.has_qualifier.then_some(0),
        }
    }

    pub fn with_info(mut self, info: u16) -> Self {
        self.info = Some(info);
        self
    }

    pub fn with_qualifier(mut self, qualifier: u16) -> Self {
        self.qualifier = Some(qualifier);
        self
    }

    pub fn with_length(mut self, length: u16) -> Self {
        self.length = length;
        self
    }

    pub fn category(&self) -> Category {
        self.block_type.category
    }

    pub fn subtype(&self) -> Subtype {
        self.block_type.subtype
    }

    pub fn shape(&self) -> HeaderShape {
        HeaderShape {
            has_info: self.info.is_some(),
            has_qualifier: self.qualifier.is_some(),
        }
    }

    /// Encoded size of the header, fixed by its shape.
    pub fn size(&self) -> usize {
        self.shape().header_len()
    }

    /// Writes the header with the stored length.
    pub fn encode_into(&self, buf: &mut BytesMut) {
        self.encode_with_length(buf, self.length);
    }

    /// Writes the header with `length` in place of the stored value.
    pub(crate) fn encode_with_length(&self, buf: &mut BytesMut, length: u16) {
        buf.put_u8(self.block_type.category.into());
        buf.put_u8(self.block_type.subtype.into());
        buf.put_u16(length);
        if let Some(info) = self.info {
            buf.put_u16(info);
        }
        if let Some(qualifier) = self.qualifier {
            buf.put_u16(qualifier);
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.size());
        self.encode_into(&mut buf);
        buf.to_vec()
    }

    /// Decodes a header of the given shape from the start of `input`.
    ///
    /// Returns the header and the number of bytes consumed.
    pub fn decode(input: &[u8], shape: HeaderShape) -> Result<(Self, usize), DcpError> {
        let input = ensure_len(input, shape.header_len(), Layer::Block, 0)?;
        let (_, header) = parse_header(input, shape)?;
        Ok((header, shape.header_len()))
    }

    /// Reads only the discriminators and the raw length field.
    pub fn peek(input: &[u8]) -> Result<(BlockType, u16), DcpError> {
        let (header, _) = Self::decode(input, HeaderShape::BARE)?;
        Ok((header.block_type, header.length))
    }
}

fn parse_header(input: &[u8], shape: HeaderShape) -> IResult<&[u8], BlockHeader> {
    let (input, (category, subtype, length)) = tuple((be_u8, be_u8, be_u16))(input)?;
    let (input, info) = cond(shape.has_info, be_u16)(input)?;
    let (input, qualifier) = cond(shape.has_qualifier, be_u16)(input)?;
    Ok((
        input,
        BlockHeader {
            block_type: BlockType::from_bytes(category, subtype),
            length,
            info,
            qualifier,
        },
    ))
}
