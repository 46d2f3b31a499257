use crate::dcp::block::{build_header, split_fixed, BlockCodec};
use crate::dcp::discriminator::BlockType;
use crate::dcp::header::{BlockHeader, HeaderShape};
use crate::error::DcpError;
use bytes::{BufMut, BytesMut};
use nom::{number::complete::be_u8, sequence::tuple, IResult};
use serde::{Deserialize, Serialize};

const BODY_LEN: usize = 2;

/// Instance number of a device, high and low byte, used to tell apart
/// several interfaces of the same device type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInstance {
    pub header: BlockHeader,
    pub instance_high: u8,
    pub instance_low: u8,
}

impl DeviceInstance {
    pub fn with_info(info: u16, instance_high: u8, instance_low: u8) -> Self {
        Self {
            header: build_header(Self::BLOCK_TYPE, HeaderShape::WITH_INFO, BODY_LEN).with_info(info),
            instance_high,
            instance_low,
        }
    }
}

fn parse_instance(input: &[u8]) -> IResult<&[u8], (u8, u8)> {
    tuple((be_u8, be_u8))(input)
}

impl BlockCodec for DeviceInstance {
    const BLOCK_TYPE: BlockType = BlockType::DEVICE_INSTANCE;

    fn header(&self) -> &BlockHeader {
        &self.header
    }

    fn body_len(&self) -> usize {
        BODY_LEN
    }

    fn decode(input: &[u8], shape: HeaderShape) -> Result<Self, DcpError> {
        let (header, body) = split_fixed(input, shape, BODY_LEN)?;
        let (_, (instance_high, instance_low)) = parse_instance(body)?;
        Ok(Self {
            header,
            instance_high,
            instance_low,
        })
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        buf.put_u8(self.instance_high);
        buf.put_u8(self.instance_low);
    }
}
