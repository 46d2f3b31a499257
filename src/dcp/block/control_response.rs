use crate::dcp::block::{build_header, split_fixed, BlockCodec};
use crate::dcp::discriminator::{BlockType, Category, Subtype};
use crate::dcp::header::{BlockHeader, HeaderShape};
use crate::error::DcpError;
use bytes::{BufMut, BytesMut};
use nom::{number::complete::be_u8, sequence::tuple, IResult};
use serde::{Deserialize, Serialize};

const BODY_LEN: usize = 3;

/// Result of a set or control request: the block the response refers to and
/// its error code (0 means no error).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlResponse {
    pub header: BlockHeader,
    pub response: BlockType,
    pub error: u8,
}

impl ControlResponse {
    pub fn new(response: BlockType, error: u8) -> Self {
        Self {
            header: build_header(Self::BLOCK_TYPE, HeaderShape::BARE, BODY_LEN),
            response,
            error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error == 0
    }
}

fn parse_response(input: &[u8]) -> IResult<&[u8], (u8, u8, u8)> {
    tuple((be_u8, be_u8, be_u8))(input)
}

impl BlockCodec for ControlResponse {
    const BLOCK_TYPE: BlockType = BlockType::CONTROL_RESPONSE;

    fn header(&self) -> &BlockHeader {
        &self.header
    }

    fn body_len(&self) -> usize {
        BODY_LEN
    }

    fn decode(input: &[u8], shape: HeaderShape) -> Result<Self, DcpError> {
        let (header, body) = split_fixed(input, shape, BODY_LEN)?;
        let (_, (category, subtype, error)) = parse_response(body)?;
        Ok(Self {
            header,
            response: BlockType::new(Category::from(category), Subtype(subtype)),
            error,
        })
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        buf.put_u8(self.response.category.into());
        buf.put_u8(self.response.subtype.into());
        buf.put_u8(self.error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_ip_acknowledgement() {
        let bytes = [0x05, 0x04, 0x00, 0x03, 0x01, 0x02, 0x00];
        let block = ControlResponse::decode(&bytes, HeaderShape::BARE).unwrap();
        assert_eq!(block.response, BlockType::IP_PARAMETER);
        assert!(block.is_success());
        assert_eq!(block.len(), 7);
        assert_eq!(block.encode().unwrap(), bytes.to_vec());
    }
}
