use crate::dcp::block::{build_header, split_fixed, BlockCodec};
use crate::dcp::discriminator::BlockType;
use crate::dcp::header::{BlockHeader, HeaderShape};
use crate::error::DcpError;
use bytes::{BufMut, BytesMut};
use nom::{number::complete::be_u16, IResult};
use serde::{Deserialize, Serialize};

const BODY_LEN: usize = 2;

/// Whether the device issues a hello request after power-on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInitiative {
    pub header: BlockHeader,
    pub value: u16,
}

impl DeviceInitiative {
    pub fn with_info(info: u16, value: u16) -> Self {
        Self {
            header: build_header(Self::BLOCK_TYPE, HeaderShape::WITH_INFO, BODY_LEN).with_info(info),
            value,
        }
    }
}

fn parse_value(input: &[u8]) -> IResult<&[u8], u16> {
    be_u16(input)
}

impl BlockCodec for DeviceInitiative {
    const BLOCK_TYPE: BlockType = BlockType::DEVICE_INITIATIVE;

    fn header(&self) -> &BlockHeader {
        &self.header
    }

    fn body_len(&self) -> usize {
        BODY_LEN
    }

    fn decode(input: &[u8], shape: HeaderShape) -> Result<Self, DcpError> {
        let (header, body) = split_fixed(input, shape, BODY_LEN)?;
        let (_, value) = parse_value(body)?;
        Ok(Self { header, value })
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        buf.put_u16(self.value);
    }
}
