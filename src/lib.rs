//! # dcp-rs - A Rust Crate for the PROFINET DCP Wire Format
//!
//! The dcp-rs crate implements the frame codec of the PROFINET Discovery and
//! Configuration Protocol (DCP), used to find industrial Ethernet devices on a
//! network segment and to assign their station names and IP parameters.
//!
//! ## Features
//!
//! - Decode received Ethernet II frames into typed telegrams and blocks
//! - Build and encode identify and set requests
//! - Skip unknown blocks while keeping the telegram walk in sync
//! - Collect identify responses in a concurrent device registry
//! - Serialize decoded frames as JSON for status APIs
//!
//! ## Usage
//!
//! ```rust
//! use dcp_rs::{Frame, MacAddr};
//!
//! let source: MacAddr = "a4:4c:c8:e5:47:21".parse().unwrap();
//! let request = Frame::identify_request(source);
//! let bytes = request.encode().unwrap();
//! assert_eq!(bytes.len(), 30);
//!
//! let decoded = Frame::decode(&bytes).unwrap();
//! assert_eq!(decoded, request);
//! ```
//!
//! Raw socket I/O is left to the caller: hand received buffers to
//! [`Frame::decode`] and transmit the output of [`Frame::encode`] on a socket
//! bound to EtherType `0x8892`.

pub mod constants;
pub mod dcp;
pub mod error;
pub mod logging;
pub mod registry;
pub mod util;

pub use crate::error::{DcpError, Layer};
pub use crate::logging::{init_logger, log_info};

// Core DCP types
pub use dcp::{
    Block, BlockCodec, BlockHeader, BlockKind, BlockType, Category, EthernetHeader, Frame, FrameId,
    HeaderShape, MacAddr, ServiceId, ServiceType, Subtype, Telegram,
};
pub use registry::{DeviceRecord, DeviceRegistry};
