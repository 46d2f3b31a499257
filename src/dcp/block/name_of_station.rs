use crate::dcp::block::{build_text_header, split_text, text_fill_len, BlockCodec};
use crate::dcp::discriminator::BlockType;
use crate::dcp::header::{BlockHeader, HeaderShape};
use crate::error::DcpError;
use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

/// Station name of a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameOfStation {
    pub header: BlockHeader,
    pub name_of_station: String,
}

impl NameOfStation {
    pub fn with_info(info: u16, name: impl Into<String>) -> Self {
        let name = name.into();
        let header = build_text_header(Self::BLOCK_TYPE, HeaderShape::WITH_INFO, &name).with_info(info);
        Self {
            header,
            name_of_station: name,
        }
    }

    pub fn with_qualifier(qualifier: u16, name: impl Into<String>) -> Self {
        let name = name.into();
        let header =
            build_text_header(Self::BLOCK_TYPE, HeaderShape::WITH_QUALIFIER, &name).with_qualifier(qualifier);
        Self {
            header,
            name_of_station: name,
        }
    }
}

impl BlockCodec for NameOfStation {
    const BLOCK_TYPE: BlockType = BlockType::NAME_OF_STATION;

    fn header(&self) -> &BlockHeader {
        &self.header
    }

    fn body_len(&self) -> usize {
        self.name_of_station.len() + text_fill_len(self.header.shape())
    }

    fn decode(input: &[u8], shape: HeaderShape) -> Result<Self, DcpError> {
        let (header, text) = split_text(input, shape)?;
        Ok(Self {
            header,
            name_of_station: String::from_utf8_lossy(text).into_owned(),
        })
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        buf.put_slice(self.name_of_station.as_bytes());
        buf.put_bytes(0, text_fill_len(self.header.shape()));
    }
}
