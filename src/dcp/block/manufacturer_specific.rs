use crate::dcp::block::{build_text_header, split_text, text_fill_len, BlockCodec};
use crate::dcp::discriminator::BlockType;
use crate::dcp::header::{BlockHeader, HeaderShape};
use crate::error::DcpError;
use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

/// Device vendor value, a free-form vendor string such as the product family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturerSpecific {
    pub header: BlockHeader,
    pub vendor_value: String,
}

impl ManufacturerSpecific {
    pub fn with_info(info: u16, vendor_value: impl Into<String>) -> Self {
        let vendor_value = vendor_value.into();
        let header =
            build_text_header(Self::BLOCK_TYPE, HeaderShape::WITH_INFO, &vendor_value).with_info(info);
        Self {
            header,
            vendor_value,
        }
    }
}

impl BlockCodec for ManufacturerSpecific {
    const BLOCK_TYPE: BlockType = BlockType::MANUFACTURER_SPECIFIC;

    fn header(&self) -> &BlockHeader {
        &self.header
    }

    fn body_len(&self) -> usize {
        self.vendor_value.len() + text_fill_len(self.header.shape())
    }

    fn decode(input: &[u8], shape: HeaderShape) -> Result<Self, DcpError> {
        let (header, text) = split_text(input, shape)?;
        Ok(Self {
            header,
            vendor_value: String::from_utf8_lossy(text).into_owned(),
        })
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        buf.put_slice(self.vendor_value.as_bytes());
        buf.put_bytes(0, text_fill_len(self.header.shape()));
    }
}
