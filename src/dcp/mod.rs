//! The dcp module contains the PROFINET DCP wire codec: discriminators, block
//! headers and bodies, the dispatch table, telegrams and frames.

pub mod block;
pub mod discriminator;
pub mod dispatch;
pub mod ethernet;
pub mod frame;
pub mod header;
pub mod service;
pub mod telegram;

pub use block::{
    All, Block, BlockCodec, ControlResponse, DeviceId, DeviceInitiative, DeviceInstance, IpParameter,
    ManufacturerSpecific, NameOfStation,
};
pub use discriminator::{BlockType, Category, Subtype};
pub use dispatch::{lookup, BlockKind, DISPATCH_TABLE};
pub use ethernet::{EthernetHeader, MacAddr};
pub use frame::Frame;
pub use header::{BlockHeader, HeaderShape};
pub use service::{FrameId, ServiceId, ServiceType};
pub use telegram::Telegram;
