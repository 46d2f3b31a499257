use dcp_rs::dcp::block::{
    padded, All, ControlResponse, DeviceId, DeviceInitiative, DeviceInstance, IpParameter,
    ManufacturerSpecific, NameOfStation,
};
use dcp_rs::dcp::dispatch::lookup;
use dcp_rs::{
    Block, BlockCodec, BlockHeader, BlockKind, BlockType, Category, DcpError, HeaderShape, Subtype,
};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::fmt::Debug;
use std::net::Ipv4Addr;

const NAME_OF_STATION_ZEISS: [u8; 11] = [0x02, 0x02, 0x00, 0x07, 0x00, 0x00, 0x7a, 0x65, 0x69, 0x73, 0x73];

const IP_PARAMETER_WITH_INFO: [u8; 18] = [
    0x01, 0x02, 0x00, 0x0e, 0x00, 0x01, 0xac, 0x13, 0x68, 0x05, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00,
];

#[test]
fn test_name_of_station_vector() {
    let block = NameOfStation::decode(&NAME_OF_STATION_ZEISS, HeaderShape::WITH_INFO).unwrap();
    assert_eq!(block.header.category(), Category::Properties);
    assert_eq!(block.header.subtype(), Subtype::NAME_OF_STATION);
    assert_eq!(block.header.info, Some(0));
    assert_eq!(block.name_of_station, "zeiss");

    let built = NameOfStation::with_info(0, "zeiss");
    assert_eq!(built.encode().unwrap(), NAME_OF_STATION_ZEISS.to_vec());
    assert_eq!(built.len(), 11);
    assert_eq!(built, block);
}

#[test]
fn test_ip_parameter_vector() {
    let block = IpParameter::decode(&IP_PARAMETER_WITH_INFO, HeaderShape::WITH_INFO).unwrap();
    assert_eq!(block.header.info, Some(1));
    assert_eq!(block.ip_address, Ipv4Addr::new(172, 19, 104, 5));
    assert_eq!(block.subnet_mask, Ipv4Addr::new(255, 255, 0, 0));
    assert_eq!(block.gateway, Ipv4Addr::UNSPECIFIED);

    let built = IpParameter::with_info(
        Ipv4Addr::new(172, 19, 104, 5),
        Ipv4Addr::new(255, 255, 0, 0),
        Ipv4Addr::UNSPECIFIED,
        1,
    );
    assert_eq!(built.encode().unwrap(), IP_PARAMETER_WITH_INFO.to_vec());
    assert_eq!(built.len(), 18);
}

#[test]
fn test_all_vector() {
    let bytes = [0xff, 0xff, 0x00, 0x00];
    let block = All::decode(&bytes, HeaderShape::BARE).unwrap();
    assert_eq!(block.header.category(), Category::All);
    assert_eq!(block.header.subtype(), Subtype::ALL_SELECTOR);
    assert_eq!(block.len(), 4);
    assert_eq!(All::new().encode().unwrap(), bytes.to_vec());
}

#[test]
fn test_same_bytes_different_shape() {
    // Without BlockInfo the first two body bytes are read as part of the address.
    let block = IpParameter::decode(&IP_PARAMETER_WITH_INFO, HeaderShape::BARE).unwrap();
    assert_eq!(block.header.info, None);
    assert_eq!(block.ip_address, Ipv4Addr::new(0, 1, 172, 19));
}

#[test]
fn test_set_request_blocks_carry_qualifier() {
    let ip = IpParameter::with_qualifier(
        Ipv4Addr::new(192, 168, 0, 10),
        Ipv4Addr::new(255, 255, 255, 0),
        Ipv4Addr::new(192, 168, 0, 1),
        1,
    );
    let bytes = ip.encode().unwrap();
    assert_eq!(&bytes[..6], &[0x01, 0x02, 0x00, 0x0e, 0x00, 0x01]);
    assert_eq!(&bytes[6..10], &[192, 168, 0, 10]);

    let name = NameOfStation::with_qualifier(0, "plc-1");
    let bytes = name.encode().unwrap();
    assert_eq!(&bytes[..6], &[0x02, 0x02, 0x00, 0x07, 0x00, 0x00]);
    assert_eq!(&bytes[6..], b"plc-1");
}

#[test]
fn test_modified_name_rewrites_length() {
    let mut block = NameOfStation::with_info(0, "zeiss");
    block.name_of_station = "device-01".to_string();
    let bytes = block.encode().unwrap();
    assert_eq!(&bytes[2..4], &[0x00, 0x0b]);
    assert_eq!(bytes.len(), 15);
    assert_eq!(padded(block.len()), 16);
}

#[test]
fn test_text_block_length_below_two() {
    let bytes = [0x02, 0x02, 0x00, 0x01, 0x00, 0x00];
    let err = NameOfStation::decode(&bytes, HeaderShape::WITH_INFO).unwrap_err();
    assert!(matches!(
        err,
        DcpError::InconsistentLength {
            declared: 1,
            offset: 2,
            ..
        }
    ));
}

#[test]
fn test_truncated_fixed_body() {
    let err = DeviceId::decode(&[0x02, 0x03, 0x00, 0x06, 0x00, 0x00, 0x00], HeaderShape::WITH_INFO)
        .unwrap_err();
    assert!(matches!(
        err,
        DcpError::TruncatedBuffer {
            needed: 10,
            available: 7,
            ..
        }
    ));
}

#[test]
fn test_device_blocks() {
    let id = DeviceId::decode(
        &[0x02, 0x03, 0x00, 0x06, 0x00, 0x00, 0x00, 0x2a, 0x01, 0x0d],
        HeaderShape::WITH_INFO,
    )
    .unwrap();
    assert_eq!(id.vendor_id, 0x002a);
    assert_eq!(id.device_id, 0x010d);

    let instance = DeviceInstance::with_info(0, 0x00, 0x64);
    assert_eq!(
        instance.encode().unwrap(),
        vec![0x02, 0x07, 0x00, 0x04, 0x00, 0x00, 0x00, 0x64]
    );

    let vendor = ManufacturerSpecific::with_info(0, "S7-1500");
    assert_eq!(vendor.len(), 13);
    let decoded = ManufacturerSpecific::decode(&vendor.encode().unwrap(), HeaderShape::WITH_INFO).unwrap();
    assert_eq!(decoded.vendor_value, "S7-1500");
}

#[test]
fn test_dispatch_routes_by_pair() {
    assert_eq!(lookup(BlockType::NAME_OF_STATION), Some(BlockKind::NameOfStation));
    assert_eq!(lookup(BlockType::CONTROL_RESPONSE), Some(BlockKind::ControlResponse));
    // Subtype 0x02 under the IP option is a different block than under device properties.
    assert_eq!(lookup(BlockType::IP_PARAMETER), Some(BlockKind::IpParameter));
    assert_eq!(lookup(BlockType::DEVICE_OPTIONS), None);
    assert_eq!(lookup(BlockType::from_bytes(0x80, 0x01)), None);

    let block = BlockKind::ControlResponse
        .decode(&[0x05, 0x04, 0x00, 0x03, 0x02, 0x02, 0x00], HeaderShape::BARE)
        .unwrap();
    match block {
        Block::ControlResponse(ControlResponse { response, error, .. }) => {
            assert_eq!(response, BlockType::NAME_OF_STATION);
            assert_eq!(error, 0);
        }
        other => panic!("unexpected block {other:?}"),
    }
}

#[test]
fn test_block_display() {
    assert_eq!(BlockType::NAME_OF_STATION.to_string(), "DeviceProperties/NameOfStation");
    assert_eq!(
        BlockType::from_bytes(0x02, 0x42).to_string(),
        "DeviceProperties/0x42"
    );
}

#[test]
fn test_name_of_station_without_block_info() {
    // Without BlockInfo the text starts right after the length field, and the
    // last two bytes the length accounts for are fill.
    let block = NameOfStation::decode(&NAME_OF_STATION_ZEISS, HeaderShape::BARE).unwrap();
    assert_eq!(block.header.info, None);
    assert_eq!(block.name_of_station, "\0\0zei");
    assert_eq!(block.len(), 11);

    let bytes = block.encode().unwrap();
    assert_eq!(
        bytes,
        vec![0x02, 0x02, 0x00, 0x07, 0x00, 0x00, 0x7a, 0x65, 0x69, 0x00, 0x00]
    );
    assert_eq!(NameOfStation::decode(&bytes, HeaderShape::BARE).unwrap(), block);
}

#[test]
fn test_text_block_missing_fill_is_inconsistent() {
    let err = NameOfStation::decode(&NAME_OF_STATION_ZEISS[..9], HeaderShape::BARE).unwrap_err();
    assert_eq!(
        err,
        DcpError::InconsistentLength {
            layer: dcp_rs::Layer::Block,
            offset: 2,
            declared: 7,
            available: 5,
        }
    );
}

fn header_shape() -> impl Strategy<Value = HeaderShape> {
    prop_oneof![
        Just(HeaderShape::BARE),
        Just(HeaderShape::WITH_INFO),
        Just(HeaderShape::WITH_QUALIFIER),
    ]
}

/// Header of `shape` whose optional word, if any, holds `word`. The length
/// is filled in once the body is known.
fn shaped_header(block_type: BlockType, shape: HeaderShape, word: u16) -> BlockHeader {
    let mut header = BlockHeader::new(block_type, shape);
    if shape.has_info {
        header.info = Some(word);
    }
    if shape.has_qualifier {
        header.qualifier = Some(word);
    }
    header
}

fn check_round_trip<B>(block: &B, shape: HeaderShape) -> Result<(), TestCaseError>
where
    B: BlockCodec + PartialEq + Debug,
{
    let bytes = block.encode().unwrap();
    prop_assert_eq!(bytes.len(), block.len());
    let length = u16::from_be_bytes([bytes[2], bytes[3]]) as usize;
    prop_assert_eq!(length, block.wire_length());
    prop_assert_eq!(bytes.len(), 4 + length);
    let decoded = B::decode(&bytes, shape).unwrap();
    prop_assert_eq!(&decoded, block);
    Ok(())
}

proptest! {
    #[test]
    fn prop_all_round_trip(shape in header_shape(), word in any::<u16>()) {
        let mut block = All { header: shaped_header(All::BLOCK_TYPE, shape, word) };
        block.header.length = block.wire_length() as u16;
        check_round_trip(&block, shape)?;
    }

    #[test]
    fn prop_ip_parameter_round_trip(
        shape in header_shape(),
        word in any::<u16>(),
        addresses in any::<(u32, u32, u32)>(),
    ) {
        let mut block = IpParameter {
            header: shaped_header(IpParameter::BLOCK_TYPE, shape, word),
            ip_address: Ipv4Addr::from(addresses.0),
            subnet_mask: Ipv4Addr::from(addresses.1),
            gateway: Ipv4Addr::from(addresses.2),
        };
        block.header.length = block.wire_length() as u16;
        check_round_trip(&block, shape)?;
    }

    #[test]
    fn prop_name_of_station_round_trip(
        shape in header_shape(),
        word in any::<u16>(),
        name in "[a-z0-9.-]{0,63}",
    ) {
        let mut block = NameOfStation {
            header: shaped_header(NameOfStation::BLOCK_TYPE, shape, word),
            name_of_station: name,
        };
        block.header.length = block.wire_length() as u16;
        check_round_trip(&block, shape)?;
    }

    #[test]
    fn prop_manufacturer_specific_round_trip(
        shape in header_shape(),
        word in any::<u16>(),
        vendor_value in "[ -~]{0,40}",
    ) {
        let mut block = ManufacturerSpecific {
            header: shaped_header(ManufacturerSpecific::BLOCK_TYPE, shape, word),
            vendor_value,
        };
        block.header.length = block.wire_length() as u16;
        check_round_trip(&block, shape)?;
    }

    #[test]
    fn prop_device_id_round_trip(
        shape in header_shape(),
        word in any::<u16>(),
        vendor_id in any::<u16>(),
        device_id in any::<u16>(),
    ) {
        let mut block = DeviceId {
            header: shaped_header(DeviceId::BLOCK_TYPE, shape, word),
            vendor_id,
            device_id,
        };
        block.header.length = block.wire_length() as u16;
        check_round_trip(&block, shape)?;
    }

    #[test]
    fn prop_device_instance_round_trip(
        shape in header_shape(),
        word in any::<u16>(),
        instance_high in any::<u8>(),
        instance_low in any::<u8>(),
    ) {
        let mut block = DeviceInstance {
            header: shaped_header(DeviceInstance::BLOCK_TYPE, shape, word),
            instance_high,
            instance_low,
        };
        block.header.length = block.wire_length() as u16;
        check_round_trip(&block, shape)?;
    }

    #[test]
    fn prop_device_initiative_round_trip(
        shape in header_shape(),
        word in any::<u16>(),
        value in any::<u16>(),
    ) {
        let mut block = DeviceInitiative {
            header: shaped_header(DeviceInitiative::BLOCK_TYPE, shape, word),
            value,
        };
        block.header.length = block.wire_length() as u16;
        check_round_trip(&block, shape)?;
    }

    #[test]
    fn prop_control_response_round_trip(
        shape in header_shape(),
        word in any::<u16>(),
        category in any::<u8>(),
        subtype in any::<u8>(),
        error in any::<u8>(),
    ) {
        let mut block = ControlResponse {
            header: shaped_header(ControlResponse::BLOCK_TYPE, shape, word),
            response: BlockType::from_bytes(category, subtype),
            error,
        };
        block.header.length = block.wire_length() as u16;
        check_round_trip(&block, shape)?;
    }
}
