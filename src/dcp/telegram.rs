//! # DCP Telegram
//!
//! Fixed 12-byte header followed by `dcp_data_length` bytes of blocks:
//!
//! ```text
//! frame_id(2) | service_id(1) | service_type(1) | xid(4) | response_delay(2) | dcp_data_length(2)
//! block | [pad] | block | [pad] | ...
//! ```
//!
//! A block whose on-wire size is odd is followed by one zero pad byte. The pad
//! is not part of the block's length field but is part of `dcp_data_length`.
//! Decoding walks the block area until the declared length is used up and
//! ignores anything after it (Ethernet minimum-size padding, for example).

use crate::constants::{BLOCK_PREFIX_LEN, DCP_DEFAULT_RESPONSE_DELAY, TELEGRAM_HEADER_LEN};
use crate::dcp::block::{
    padded, All, Block, ControlResponse, DeviceId, DeviceInitiative, DeviceInstance, IpParameter,
    ManufacturerSpecific, NameOfStation,
};
use crate::dcp::dispatch::{lookup, BlockKind};
use crate::dcp::header::{BlockHeader, HeaderShape};
use crate::dcp::service::{FrameId, ServiceId, ServiceType};
use crate::error::{ensure_len, DcpError, Layer};
use bytes::{BufMut, BytesMut};
use log::{debug, trace};
use nom::{
    number::complete::{be_u16, be_u32, be_u8},
    sequence::tuple,
    IResult,
};
use serde::{Deserialize, Serialize};

/// Offset of the `dcp_data_length` field inside the telegram header.
const DATA_LENGTH_OFFSET: usize = 10;

/// Represents a DCP telegram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Telegram {
    pub frame_id: FrameId,
    pub service_id: ServiceId,
    pub service_type: ServiceType,
    pub xid: u32,
    pub response_delay: u16,
    /// Declared size of the block area. Kept in step by `push_block` and
    /// `set_block`; encoding always writes the value computed from `blocks`.
    pub dcp_data_length: u16,
    /// Recognised blocks in wire order.
    pub blocks: Vec<Block>,
}

impl Telegram {
    pub fn new(frame_id: FrameId, service_id: ServiceId, service_type: ServiceType, xid: u32) -> Self {
        Self {
            frame_id,
            service_id,
            service_type,
            xid,
            response_delay: 0,
            dcp_data_length: 0,
            blocks: Vec::new(),
        }
    }

    /// Identify-all request.
    pub fn identify_request(xid: u32) -> Self {
        let mut telegram = Self::new(
            FrameId::IDENTIFY_REQUEST,
            ServiceId::Identify,
            ServiceType::Request,
            xid,
        );
        telegram.response_delay = DCP_DEFAULT_RESPONSE_DELAY;
        telegram.push_block(All::new());
        telegram
    }

    /// Set request carrying a single block.
    pub fn set_request(xid: u32, block: impl Into<Block>) -> Self {
        let mut telegram = Self::new(FrameId::GET_SET, ServiceId::Set, ServiceType::Request, xid);
        telegram.response_delay = DCP_DEFAULT_RESPONSE_DELAY;
        telegram.push_block(block);
        telegram
    }

    pub fn is_response(&self) -> bool {
        self.service_type == ServiceType::Response
    }

    pub fn is_identify_response(&self) -> bool {
        self.service_id == ServiceId::Identify && self.is_response()
    }

    /// Header shape of every block in this telegram.
    pub fn shape(&self) -> HeaderShape {
        HeaderShape::for_service(self.service_id, self.service_type)
    }

    /// Appends a block, keeping any earlier block of the same kind.
    pub fn push_block(&mut self, block: impl Into<Block>) {
        self.blocks.push(block.into());
        self.sync_data_length();
    }

    /// Replaces every block of the same kind with `block`.
    pub fn set_block(&mut self, block: impl Into<Block>) {
        let block = block.into();
        let kind = block.kind();
        self.blocks.retain(|b| b.kind() != kind);
        self.blocks.push(block);
        self.sync_data_length();
    }

    /// Last block of the given kind.
    pub fn block(&self, kind: BlockKind) -> Option<&Block> {
        self.blocks.iter().rev().find(|b| b.kind() == kind)
    }

    pub fn all(&self) -> Option<&All> {
        self.blocks.iter().rev().find_map(|b| match b {
            Block::All(b) => Some(b),
            _ => None,
        })
    }

    pub fn ip_parameter(&self) -> Option<&IpParameter> {
        self.blocks.iter().rev().find_map(|b| match b {
            Block::IpParameter(b) => Some(b),
            _ => None,
        })
    }

    pub fn name_of_station(&self) -> Option<&NameOfStation> {
        self.blocks.iter().rev().find_map(|b| match b {
            Block::NameOfStation(b) => Some(b),
            _ => None,
        })
    }

    pub fn device_id(&self) -> Option<&DeviceId> {
        self.blocks.iter().rev().find_map(|b| match b {
            Block::DeviceId(b) => Some(b),
            _ => None,
        })
    }

    pub fn device_instance(&self) -> Option<&DeviceInstance> {
        self.blocks.iter().rev().find_map(|b| match b {
            Block::DeviceInstance(b) => Some(b),
            _ => None,
        })
    }

    pub fn manufacturer_specific(&self) -> Option<&ManufacturerSpecific> {
        self.blocks.iter().rev().find_map(|b| match b {
            Block::ManufacturerSpecific(b) => Some(b),
            _ => None,
        })
    }

    pub fn device_initiative(&self) -> Option<&DeviceInitiative> {
        self.blocks.iter().rev().find_map(|b| match b {
            Block::DeviceInitiative(b) => Some(b),
            _ => None,
        })
    }

    pub fn control_response(&self) -> Option<&ControlResponse> {
        self.blocks.iter().rev().find_map(|b| match b {
            Block::ControlResponse(b) => Some(b),
            _ => None,
        })
    }

    /// Size of the block area including pad bytes.
    pub fn data_len(&self) -> usize {
        self.blocks.iter().map(Block::padded_len).sum()
    }

    /// Header plus block area.
    pub fn len(&self) -> usize {
        TELEGRAM_HEADER_LEN + self.data_len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn sync_data_length(&mut self) {
        self.dcp_data_length = self.data_len().min(u16::MAX as usize) as u16;
    }

    pub fn encode_into(&self, buf: &mut BytesMut) -> Result<(), DcpError> {
        let data_len = self.data_len();
        let dcp_data_length = u16::try_from(data_len).map_err(|_| DcpError::InvalidField {
            field: "DCP data length",
            reason: format!("{data_len} bytes of blocks do not fit the 16-bit length field"),
        })?;

        buf.put_u16(self.frame_id.0);
        buf.put_u8(self.service_id.into());
        buf.put_u8(self.service_type.into());
        buf.put_u32(self.xid);
        buf.put_u16(self.response_delay);
        buf.put_u16(dcp_data_length);

        for block in &self.blocks {
            block.encode_into(buf)?;
            if block.len() % 2 == 1 {
                buf.put_u8(0);
            }
        }
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>, DcpError> {
        let mut buf = BytesMut::with_capacity(self.len());
        self.encode_into(&mut buf)?;
        Ok(buf.to_vec())
    }

    /// Decodes a telegram from the start of `input`.
    ///
    /// Blocks with an unknown option/suboption pair are skipped. Bytes past
    /// `dcp_data_length` are ignored.
    pub fn decode(input: &[u8]) -> Result<Self, DcpError> {
        let header = ensure_len(input, TELEGRAM_HEADER_LEN, Layer::Telegram, 0)?;
        let (_, (frame_id, service_id, service_type, xid, response_delay, dcp_data_length)) =
            parse_telegram_header(header)?;

        let mut telegram = Self {
            frame_id: FrameId(frame_id),
            service_id: ServiceId::from(service_id),
            service_type: ServiceType::from(service_type),
            xid,
            response_delay,
            dcp_data_length,
            blocks: Vec::new(),
        };

        let declared = dcp_data_length as usize;
        let available = input.len() - TELEGRAM_HEADER_LEN;
        if declared > available {
            return Err(DcpError::InconsistentLength {
                layer: Layer::Telegram,
                offset: DATA_LENGTH_OFFSET,
                declared,
                available,
            });
        }
        let data = &input[TELEGRAM_HEADER_LEN..TELEGRAM_HEADER_LEN + declared];
        let shape = telegram.shape();

        let mut remaining = declared as isize;
        let mut offset = 0usize;
        while remaining > 0 {
            let base = TELEGRAM_HEADER_LEN + offset;
            let (block_type, raw_length) =
                BlockHeader::peek(&data[offset..]).map_err(|e| e.rebase(base))?;

            let consumed = BLOCK_PREFIX_LEN + raw_length as usize;
            if offset + consumed > data.len() {
                return Err(DcpError::InconsistentLength {
                    layer: Layer::Block,
                    offset: base + 2,
                    declared: raw_length as usize,
                    available: data.len() - offset - BLOCK_PREFIX_LEN,
                });
            }

            let block_bytes = &data[offset..offset + consumed];
            match lookup(block_type) {
                Some(kind) => {
                    let block = kind.decode(block_bytes, shape).map_err(|e| e.rebase(base))?;
                    trace!("Decoded {block_type} block at offset {base} ({consumed} bytes)");
                    telegram.blocks.push(block);
                }
                None => {
                    debug!("Skipping unrecognised {block_type} block at offset {base} ({consumed} bytes)");
                }
            }

            let effective = padded(consumed);
            if effective != consumed {
                trace!("Odd block size {consumed}, skipping pad byte");
            }
            remaining -= effective as isize;
            offset += effective;
        }

        if remaining < 0 {
            return Err(DcpError::InconsistentLength {
                layer: Layer::Telegram,
                offset: DATA_LENGTH_OFFSET,
                declared,
                available: offset,
            });
        }

        Ok(telegram)
    }
}

type TelegramHeaderFields = (u16, u8, u8, u32, u16, u16);

fn parse_telegram_header(input: &[u8]) -> IResult<&[u8], TelegramHeaderFields> {
    tuple((be_u16, be_u8, be_u8, be_u32, be_u16, be_u16))(input)
}
