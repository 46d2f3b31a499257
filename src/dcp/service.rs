//! Frame id, service id and service type fields of the telegram header.

use serde::{Deserialize, Serialize};
use std::fmt;

/// PROFINET frame id selecting the DCP request/response family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(pub u16);

impl FrameId {
    pub const GET_SET: FrameId = FrameId(0xFEFD);
    pub const IDENTIFY_REQUEST: FrameId = FrameId(0xFEFE);
    pub const IDENTIFY_RESPONSE: FrameId = FrameId(0xFEFF);
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FrameId::GET_SET => f.write_str("GetSet"),
            FrameId::IDENTIFY_REQUEST => f.write_str("IdentifyRequest"),
            FrameId::IDENTIFY_RESPONSE => f.write_str("IdentifyResponse"),
            FrameId(other) => write!(f, "0x{other:04X}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceId {
    Get,
    Set,
    Identify,
    Unknown(u8),
}

impl From<u8> for ServiceId {
    fn from(value: u8) -> Self {
        match value {
            1 => ServiceId::Get,
            4 => ServiceId::Set,
            5 => ServiceId::Identify,
            other => ServiceId::Unknown(other),
        }
    }
}

impl From<ServiceId> for u8 {
    fn from(id: ServiceId) -> Self {
        match id {
            ServiceId::Get => 1,
            ServiceId::Set => 4,
            ServiceId::Identify => 5,
            ServiceId::Unknown(other) => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    Request,
    Response,
    Unknown(u8),
}

impl From<u8> for ServiceType {
    fn from(value: u8) -> Self {
        match value {
            0 => ServiceType::Request,
            1 => ServiceType::Response,
            other => ServiceType::Unknown(other),
        }
    }
}

impl From<ServiceType> for u8 {
    fn from(ty: ServiceType) -> Self {
        match ty {
            ServiceType::Request => 0,
            ServiceType::Response => 1,
            ServiceType::Unknown(other) => other,
        }
    }
}
