//! Ethernet II header carried in front of every DCP telegram.

use crate::constants::{DCP_ETHER_TYPE, DCP_IDENTIFY_MULTICAST, ETHERNET_HEADER_LEN, MAC_ADDR_LEN};
use crate::error::{ensure_len, DcpError, Layer};
use bytes::{BufMut, BytesMut};
use nom::{bytes::complete::take, number::complete::be_u16, sequence::tuple, IResult};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 48-bit hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MacAddr(pub [u8; MAC_ADDR_LEN]);

impl MacAddr {
    pub const BROADCAST: MacAddr = MacAddr([0xFF; MAC_ADDR_LEN]);

    /// Multicast address answered by every DCP station.
    pub const IDENTIFY_MULTICAST: MacAddr = MacAddr(DCP_IDENTIFY_MULTICAST);

    pub fn octets(&self) -> [u8; MAC_ADDR_LEN] {
        self.0
    }
}

impl TryFrom<&[u8]> for MacAddr {
    type Error = DcpError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let octets: [u8; MAC_ADDR_LEN] = bytes.try_into().map_err(|_| DcpError::InvalidField {
            field: "MAC address",
            reason: format!("expected {MAC_ADDR_LEN} bytes, got {}", bytes.len()),
        })?;
        Ok(MacAddr(octets))
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl FromStr for MacAddr {
    type Err = DcpError;

    /// Accepts `aa:bb:cc:dd:ee:ff` or `aa-bb-cc-dd-ee-ff`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DcpError::InvalidField {
            field: "MAC address",
            reason: format!("cannot parse {s:?}"),
        };
        let parts: Vec<&str> = s.split(|c| c == ':' || c == '-').collect();
        if parts.len() != MAC_ADDR_LEN {
            return Err(invalid());
        }
        let mut octets = [0u8; MAC_ADDR_LEN];
        for (octet, part) in octets.iter_mut().zip(parts) {
            if part.len() != 2 {
                return Err(invalid());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }
        Ok(MacAddr(octets))
    }
}

impl Serialize for MacAddr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MacAddr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthernetHeader {
    pub destination: MacAddr,
    pub source: MacAddr,
    pub ether_type: u16,
}

impl EthernetHeader {
    /// Header with the PROFINET EtherType.
    pub fn new(destination: MacAddr, source: MacAddr) -> Self {
        Self {
            destination,
            source,
            ether_type: DCP_ETHER_TYPE,
        }
    }

    pub fn len(&self) -> usize {
        ETHERNET_HEADER_LEN
    }

    pub fn is_profinet(&self) -> bool {
        self.ether_type == DCP_ETHER_TYPE
    }

    pub fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_slice(&self.destination.0);
        buf.put_slice(&self.source.0);
        buf.put_u16(self.ether_type);
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(ETHERNET_HEADER_LEN);
        self.encode_into(&mut buf);
        buf.to_vec()
    }

    /// Decodes the header from the start of `input`. The EtherType is read,
    /// not checked.
    pub fn decode(input: &[u8]) -> Result<Self, DcpError> {
        let input = ensure_len(input, ETHERNET_HEADER_LEN, Layer::Ethernet, 0)?;
        let (_, (destination, source, ether_type)) = parse_ethernet(input)?;
        Ok(Self {
            destination: MacAddr::try_from(destination)?,
            source: MacAddr::try_from(source)?,
            ether_type,
        })
    }
}

fn parse_ethernet(input: &[u8]) -> IResult<&[u8], (&[u8], &[u8], u16)> {
    tuple((take(MAC_ADDR_LEN), take(MAC_ADDR_LEN), be_u16))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: [u8; 14] = [
        0x01, 0x0e, 0xcf, 0x00, 0x00, 0x00, 0xa4, 0x4c, 0xc8, 0xe5, 0x47, 0x21, 0x88, 0x92,
    ];

    #[test]
    fn decode_identify_header() {
        let header = EthernetHeader::decode(&HEADER).unwrap();
        assert_eq!(header.destination.to_string(), "01:0e:cf:00:00:00");
        assert_eq!(header.source.to_string(), "a4:4c:c8:e5:47:21");
        assert_eq!(header.ether_type, 0x8892);
        assert!(header.is_profinet());
    }

    #[test]
    fn encode_identify_header() {
        let source: MacAddr = "a4:4c:c8:e5:47:21".parse().unwrap();
        let header = EthernetHeader::new(MacAddr::IDENTIFY_MULTICAST, source);
        assert_eq!(header.encode(), HEADER.to_vec());
        assert_eq!(header.len(), 14);
    }

    #[test]
    fn mac_parse_rejects_garbage() {
        assert!("a4:4c:c8:e5:47".parse::<MacAddr>().is_err());
        assert!("a4:4c:c8:e5:47:zz".parse::<MacAddr>().is_err());
        assert_eq!(
            "A4-4C-C8-E5-47-21".parse::<MacAddr>().unwrap(),
            MacAddr([0xa4, 0x4c, 0xc8, 0xe5, 0x47, 0x21])
        );
    }

    #[test]
    fn mac_from_short_slice_is_invalid_field() {
        assert!(matches!(
            MacAddr::try_from(&[0u8; 4][..]),
            Err(DcpError::InvalidField { .. })
        ));
    }
}
