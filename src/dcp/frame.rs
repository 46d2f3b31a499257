//! # DCP Frame
//!
//! Ethernet II header plus telegram, the unit handed to and received from a
//! raw socket. Request builders pick the addressing, a fresh transaction id
//! and the blocks for the common DCP requests.

use crate::constants::ETHERNET_HEADER_LEN;
use crate::dcp::block::{Block, IpParameter, NameOfStation};
use crate::dcp::ethernet::{EthernetHeader, MacAddr};
use crate::dcp::telegram::Telegram;
use crate::error::DcpError;
use bytes::BytesMut;
use log::debug;
use serde::{Deserialize, Serialize};

/// Represents a DCP frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub ethernet: EthernetHeader,
    pub telegram: Telegram,
}

impl Frame {
    pub fn new(ethernet: EthernetHeader, telegram: Telegram) -> Self {
        Self { ethernet, telegram }
    }

    /// Identify-all request to the DCP multicast address with a random xid.
    pub fn identify_request(source: MacAddr) -> Self {
        Self::identify_request_with_xid(source, rand::random())
    }

    pub fn identify_request_with_xid(source: MacAddr, xid: u32) -> Self {
        debug!("Building identify request from {source} with xid 0x{xid:08X}");
        Self {
            ethernet: EthernetHeader::new(MacAddr::IDENTIFY_MULTICAST, source),
            telegram: Telegram::identify_request(xid),
        }
    }

    /// Set request for IP address, mask and gateway. The block should be built
    /// with [`IpParameter::with_qualifier`].
    pub fn set_ip_parameter_request(destination: MacAddr, source: MacAddr, block: IpParameter) -> Self {
        Self::set_request_with_xid(destination, source, block, rand::random())
    }

    /// Set request for the station name. The block should be built with
    /// [`NameOfStation::with_qualifier`].
    pub fn set_name_of_station_request(
        destination: MacAddr,
        source: MacAddr,
        block: NameOfStation,
    ) -> Self {
        Self::set_request_with_xid(destination, source, block, rand::random())
    }

    pub fn set_request_with_xid(
        destination: MacAddr,
        source: MacAddr,
        block: impl Into<Block>,
        xid: u32,
    ) -> Self {
        let block = block.into();
        debug!(
            "Building set request for {} to {destination} with xid 0x{xid:08X}",
            block.header().block_type
        );
        Self {
            ethernet: EthernetHeader::new(destination, source),
            telegram: Telegram::set_request(xid, block),
        }
    }

    pub fn len(&self) -> usize {
        self.ethernet.len() + self.telegram.len()
    }

    pub fn encode(&self) -> Result<Vec<u8>, DcpError> {
        let mut buf = BytesMut::with_capacity(self.len());
        self.ethernet.encode_into(&mut buf);
        self.telegram.encode_into(&mut buf)?;
        Ok(buf.to_vec())
    }

    pub fn decode(input: &[u8]) -> Result<Self, DcpError> {
        let ethernet = EthernetHeader::decode(input)?;
        let telegram = Telegram::decode(&input[ETHERNET_HEADER_LEN..])
            .map_err(|e| e.rebase(ETHERNET_HEADER_LEN))?;
        Ok(Self { ethernet, telegram })
    }
}
