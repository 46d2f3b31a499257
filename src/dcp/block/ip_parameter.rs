use crate::dcp::block::{build_header, split_fixed, BlockCodec};
use crate::dcp::discriminator::BlockType;
use crate::dcp::header::{BlockHeader, HeaderShape};
use crate::error::DcpError;
use bytes::{BufMut, BytesMut};
use nom::{number::complete::be_u32, sequence::tuple, IResult};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

const BODY_LEN: usize = 12;

/// IP address, subnet mask and standard gateway of a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpParameter {
    pub header: BlockHeader,
    pub ip_address: Ipv4Addr,
    pub subnet_mask: Ipv4Addr,
    pub gateway: Ipv4Addr,
}

impl IpParameter {
    /// Block without BlockInfo or BlockQualifier.
    pub fn new(ip_address: Ipv4Addr, subnet_mask: Ipv4Addr, gateway: Ipv4Addr) -> Self {
        Self::with_shape(HeaderShape::BARE, ip_address, subnet_mask, gateway)
    }

    /// Block as sent in an identify response.
    pub fn with_info(ip_address: Ipv4Addr, subnet_mask: Ipv4Addr, gateway: Ipv4Addr, info: u16) -> Self {
        let mut block = Self::with_shape(HeaderShape::WITH_INFO, ip_address, subnet_mask, gateway);
        block.header = block.header.with_info(info);
        block
    }

    /// Block as sent in a set request. Qualifier 1 stores the value permanently,
    /// 0 only until the next power cycle.
    pub fn with_qualifier(
        ip_address: Ipv4Addr,
        subnet_mask: Ipv4Addr,
        gateway: Ipv4Addr,
        qualifier: u16,
    ) -> Self {
        let mut block = Self::with_shape(HeaderShape::WITH_QUALIFIER, ip_address, subnet_mask, gateway);
        block.header = block.header.with_qualifier(qualifier);
        block
    }

    fn with_shape(shape: HeaderShape, ip_address: Ipv4Addr, subnet_mask: Ipv4Addr, gateway: Ipv4Addr) -> Self {
        Self {
            header: build_header(Self::BLOCK_TYPE, shape, BODY_LEN),
            ip_address,
            subnet_mask,
            gateway,
        }
    }
}

fn parse_addresses(input: &[u8]) -> IResult<&[u8], (u32, u32, u32)> {
    tuple((be_u32, be_u32, be_u32))(input)
}

impl BlockCodec for IpParameter {
    const BLOCK_TYPE: BlockType = BlockType::IP_PARAMETER;

    fn header(&self) -> &BlockHeader {
        &self.header
    }

    fn body_len(&self) -> usize {
        BODY_LEN
    }

    fn decode(input: &[u8], shape: HeaderShape) -> Result<Self, DcpError> {
        let (header, body) = split_fixed(input, shape, BODY_LEN)?;
        let (_, (ip, mask, gateway)) = parse_addresses(body)?;
        Ok(Self {
            header,
            ip_address: Ipv4Addr::from(ip),
            subnet_mask: Ipv4Addr::from(mask),
            gateway: Ipv4Addr::from(gateway),
        })
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        buf.put_slice(&self.ip_address.octets());
        buf.put_slice(&self.subnet_mask.octets());
        buf.put_slice(&self.gateway.octets());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE_BLOCK: [u8; 18] = [
        0x01, 0x02, 0x00, 0x0e, 0x00, 0x01, 0xac, 0x13, 0x68, 0x05, 0xff, 0xff, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn decode_with_info() {
        let block = IpParameter::decode(&RESPONSE_BLOCK, HeaderShape::WITH_INFO).unwrap();
        assert_eq!(block.header.info, Some(1));
        assert_eq!(block.ip_address, Ipv4Addr::new(172, 19, 104, 5));
        assert_eq!(block.subnet_mask, Ipv4Addr::new(255, 255, 0, 0));
        assert_eq!(block.gateway, Ipv4Addr::UNSPECIFIED);
    }

    #[test]
    fn encode_with_info() {
        let block = IpParameter::with_info(
            Ipv4Addr::new(172, 19, 104, 5),
            Ipv4Addr::new(255, 255, 0, 0),
            Ipv4Addr::UNSPECIFIED,
            1,
        );
        assert_eq!(block.len(), 18);
        assert_eq!(block.encode().unwrap(), RESPONSE_BLOCK.to_vec());
    }

    #[test]
    fn encode_recomputes_stale_length() {
        let mut block = IpParameter::with_qualifier(
            Ipv4Addr::new(192, 168, 0, 10),
            Ipv4Addr::new(255, 255, 255, 0),
            Ipv4Addr::new(192, 168, 0, 1),
            1,
        );
        block.header.length = 0;
        let bytes = block.encode().unwrap();
        assert_eq!(&bytes[..6], &[0x01, 0x02, 0x00, 0x0e, 0x00, 0x01]);
    }

    #[test]
    fn short_body_is_truncated() {
        let err = IpParameter::decode(&RESPONSE_BLOCK[..12], HeaderShape::WITH_INFO).unwrap_err();
        assert!(matches!(err, DcpError::TruncatedBuffer { needed: 18, available: 12, .. }));
    }
}
