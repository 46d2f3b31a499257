use crate::dcp::block::{build_header, split_fixed, BlockCodec};
use crate::dcp::discriminator::BlockType;
use crate::dcp::header::{BlockHeader, HeaderShape};
use crate::error::DcpError;
use bytes::{BufMut, BytesMut};
use nom::{number::complete::be_u16, sequence::tuple, IResult};
use serde::{Deserialize, Serialize};

const BODY_LEN: usize = 4;

/// Vendor id and device id assigned by PROFIBUS & PROFINET International.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceId {
    pub header: BlockHeader,
    pub vendor_id: u16,
    pub device_id: u16,
}

impl DeviceId {
    pub fn with_info(info: u16, vendor_id: u16, device_id: u16) -> Self {
        Self {
            header: build_header(Self::BLOCK_TYPE, HeaderShape::WITH_INFO, BODY_LEN).with_info(info),
            vendor_id,
            device_id,
        }
    }
}

fn parse_ids(input: &[u8]) -> IResult<&[u8], (u16, u16)> {
    tuple((be_u16, be_u16))(input)
}

impl BlockCodec for DeviceId {
    const BLOCK_TYPE: BlockType = BlockType::DEVICE_ID;

    fn header(&self) -> &BlockHeader {
        &self.header
    }

    fn body_len(&self) -> usize {
        BODY_LEN
    }

    fn decode(input: &[u8], shape: HeaderShape) -> Result<Self, DcpError> {
        let (header, body) = split_fixed(input, shape, BODY_LEN)?;
        let (_, (vendor_id, device_id)) = parse_ids(body)?;
        Ok(Self {
            header,
            vendor_id,
            device_id,
        })
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        buf.put_u16(self.vendor_id);
        buf.put_u16(self.device_id);
    }
}
