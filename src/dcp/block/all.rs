use crate::dcp::block::{build_header, BlockCodec};
use crate::dcp::discriminator::BlockType;
use crate::dcp::header::{BlockHeader, HeaderShape};
use crate::error::DcpError;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};

/// All-selector block: header only, used by identify requests to address every device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct All {
    pub header: BlockHeader,
}

impl All {
    pub fn new() -> Self {
        Self {
            header: build_header(Self::BLOCK_TYPE, HeaderShape::BARE, 0),
        }
    }
}

impl Default for All {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockCodec for All {
    const BLOCK_TYPE: BlockType = BlockType::ALL_SELECTOR;

    fn header(&self) -> &BlockHeader {
        &self.header
    }

    fn body_len(&self) -> usize {
        0
    }

    fn decode(input: &[u8], shape: HeaderShape) -> Result<Self, DcpError> {
        let (header, _) = BlockHeader::decode(input, shape)?;
        Ok(Self { header })
    }

    fn encode_body(&self, _buf: &mut BytesMut) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dcp::discriminator::{Category, Subtype};

    #[test]
    fn decode_all_selector() {
        let all = All::decode(&[0xFF, 0xFF, 0x00, 0x00], HeaderShape::BARE).unwrap();
        assert_eq!(all.header.category(), Category::All);
        assert_eq!(all.header.subtype(), Subtype::ALL_SELECTOR);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn encode_all_selector() {
        assert_eq!(All::new().encode().unwrap(), vec![0xFF, 0xFF, 0x00, 0x00]);
    }
}
