//! DCP Protocol Constants
//!
//! This module defines constants used in the PROFINET DCP implementation,
//! based on IEC 61158-6-10.

/// EtherType registered for PROFINET real-time frames
pub const DCP_ETHER_TYPE: u16 = 0x8892;

/// Multicast destination used by identify requests
pub const DCP_IDENTIFY_MULTICAST: [u8; 6] = [0x01, 0x0e, 0xcf, 0x00, 0x00, 0x00];

/// Response delay factor sent with requests built by this crate
pub const DCP_DEFAULT_RESPONSE_DELAY: u16 = 255;

// ----------------------------------------------------------------------------
// Wire sizes
// ----------------------------------------------------------------------------

/// Ethernet II header: destination + source + EtherType
pub const ETHERNET_HEADER_LEN: usize = 14;

/// Fixed telegram header: frame id, service id/type, xid, response delay, data length
pub const TELEGRAM_HEADER_LEN: usize = 12;

/// Option + suboption + block length, always present
pub const BLOCK_PREFIX_LEN: usize = 4;

/// Size of the optional BlockInfo / BlockQualifier words
pub const BLOCK_OPTIONAL_FIELD_LEN: usize = 2;

/// Sub-field accounted in the length of text blocks (name of station, vendor value)
pub const TEXT_BLOCK_LENGTH_ADJUST: usize = 2;

/// MAC address length
pub const MAC_ADDR_LEN: usize = 6;
