//! # Block Dispatch
//!
//! Maps an option/suboption pair to the block variant able to decode it.
//! Pairs not in [`DISPATCH_TABLE`] are legal on the wire and are skipped by
//! the telegram decoder using the length from the common header.

use crate::dcp::block::{
    All, Block, BlockCodec, ControlResponse, DeviceId, DeviceInitiative, DeviceInstance, IpParameter,
    ManufacturerSpecific, NameOfStation,
};
use crate::dcp::discriminator::BlockType;
use crate::dcp::header::HeaderShape;
use crate::error::DcpError;
use serde::{Deserialize, Serialize};

/// Block variants this crate decodes into typed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    All,
    IpParameter,
    NameOfStation,
    DeviceId,
    DeviceInstance,
    ManufacturerSpecific,
    DeviceInitiative,
    ControlResponse,
}

/// Every decodable pair and the variant that handles it.
pub const DISPATCH_TABLE: &[(BlockType, BlockKind)] = &[
    (BlockType::ALL_SELECTOR, BlockKind::All),
    (BlockType::IP_PARAMETER, BlockKind::IpParameter),
    (BlockType::NAME_OF_STATION, BlockKind::NameOfStation),
    (BlockType::DEVICE_ID, BlockKind::DeviceId),
    (BlockType::DEVICE_INSTANCE, BlockKind::DeviceInstance),
    (BlockType::MANUFACTURER_SPECIFIC, BlockKind::ManufacturerSpecific),
    (BlockType::DEVICE_INITIATIVE, BlockKind::DeviceInitiative),
    (BlockType::CONTROL_RESPONSE, BlockKind::ControlResponse),
];

/// Looks up the variant for a pair, `None` for pairs that should be skipped.
pub fn lookup(block_type: BlockType) -> Option<BlockKind> {
    DISPATCH_TABLE
        .iter()
        .find(|(ty, _)| *ty == block_type)
        .map(|(_, kind)| *kind)
}

impl BlockKind {
    /// Pair this variant is registered under.
    pub fn block_type(self) -> BlockType {
        match self {
            BlockKind::All => All::BLOCK_TYPE,
            BlockKind::IpParameter => IpParameter::BLOCK_TYPE,
            BlockKind::NameOfStation => NameOfStation::BLOCK_TYPE,
            BlockKind::DeviceId => DeviceId::BLOCK_TYPE,
            BlockKind::DeviceInstance => DeviceInstance::BLOCK_TYPE,
            BlockKind::ManufacturerSpecific => ManufacturerSpecific::BLOCK_TYPE,
            BlockKind::DeviceInitiative => DeviceInitiative::BLOCK_TYPE,
            BlockKind::ControlResponse => ControlResponse::BLOCK_TYPE,
        }
    }

    /// Decodes a full block of this kind from the start of `input`.
    pub fn decode(self, input: &[u8], shape: HeaderShape) -> Result<Block, DcpError> {
        let block: Block = match self {
            BlockKind::All => All::decode(input, shape)?.into(),
            BlockKind::IpParameter => IpParameter::decode(input, shape)?.into(),
            BlockKind::NameOfStation => NameOfStation::decode(input, shape)?.into(),
            BlockKind::DeviceId => DeviceId::decode(input, shape)?.into(),
            BlockKind::DeviceInstance => DeviceInstance::decode(input, shape)?.into(),
            BlockKind::ManufacturerSpecific => ManufacturerSpecific::decode(input, shape)?.into(),
            BlockKind::DeviceInitiative => DeviceInitiative::decode(input, shape)?.into(),
            BlockKind::ControlResponse => ControlResponse::decode(input, shape)?.into(),
        };
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dcp::discriminator::{Category, Subtype};

    #[test]
    fn lookup_is_keyed_on_the_pair() {
        assert_eq!(
            lookup(BlockType::new(Category::Properties, Subtype(0x01))),
            Some(BlockKind::ManufacturerSpecific)
        );
        assert_eq!(
            lookup(BlockType::new(Category::Initiative, Subtype(0x01))),
            Some(BlockKind::DeviceInitiative)
        );
        assert_eq!(lookup(BlockType::new(Category::Ip, Subtype(0x01))), None);
        assert_eq!(lookup(BlockType::from_bytes(0x42, 0x02)), None);
    }

    #[test]
    fn table_agrees_with_variant_types() {
        for (ty, kind) in DISPATCH_TABLE {
            assert_eq!(kind.block_type(), *ty);
        }
    }

    #[test]
    fn decode_through_kind() {
        let block = BlockKind::DeviceInitiative
            .decode(&[0x06, 0x01, 0x00, 0x04, 0x00, 0x00, 0x00, 0x01], HeaderShape::WITH_INFO)
            .unwrap();
        match block {
            Block::DeviceInitiative(b) => assert_eq!(b.value, 1),
            other => panic!("unexpected block {other:?}"),
        }
    }
}
