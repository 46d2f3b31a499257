//! # Block Discriminators
//!
//! Every DCP block starts with an option byte ([`Category`]) and a suboption
//! byte ([`Subtype`]). Suboption values are reused by every option: `0x01` is
//! the MAC address under IP, manufacturer specific data under device
//! properties, "start" under control and the initiative flag under device
//! initiative. A subtype therefore only means something next to its category,
//! which is why dispatch is keyed on [`BlockType`], the combined pair.

use serde::{Deserialize, Serialize};
use std::fmt;

/// DCP option, the first discriminator byte of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Ip,
    Properties,
    Dhcp,
    Control,
    Initiative,
    All,
    /// Any value not listed above. Kept so unknown blocks can be skipped.
    Unknown(u8),
}

impl Category {
    /// Whether the raw value is one of the known options.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Category::Unknown(_))
    }
}

impl From<u8> for Category {
    fn from(value: u8) -> Self {
        match value {
            0x01 => Category::Ip,
            0x02 => Category::Properties,
            0x03 => Category::Dhcp,
            0x05 => Category::Control,
            0x06 => Category::Initiative,
            0xFF => Category::All,
            other => Category::Unknown(other),
        }
    }
}

impl From<Category> for u8 {
    fn from(category: Category) -> Self {
        match category {
            Category::Ip => 0x01,
            Category::Properties => 0x02,
            Category::Dhcp => 0x03,
            Category::Control => 0x05,
            Category::Initiative => 0x06,
            Category::All => 0xFF,
            Category::Unknown(other) => other,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Ip => f.write_str("IP"),
            Category::Properties => f.write_str("DeviceProperties"),
            Category::Dhcp => f.write_str("DHCP"),
            Category::Control => f.write_str("Control"),
            Category::Initiative => f.write_str("DeviceInitiative"),
            Category::All => f.write_str("AllSelector"),
            Category::Unknown(v) => write!(f, "0x{v:02X}"),
        }
    }
}

/// DCP suboption, the second discriminator byte of a block.
///
/// The constants are grouped by the category they belong to; values repeat
/// between groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subtype(pub u8);

impl Subtype {
    // Category::Ip
    pub const MAC_ADDRESS: Subtype = Subtype(0x01);
    pub const IP_PARAMETER: Subtype = Subtype(0x02);
    pub const FULL_IP_SUITE: Subtype = Subtype(0x03);

    // Category::Properties
    pub const MANUFACTURER_SPECIFIC: Subtype = Subtype(0x01);
    pub const NAME_OF_STATION: Subtype = Subtype(0x02);
    pub const DEVICE_ID: Subtype = Subtype(0x03);
    pub const DEVICE_ROLE: Subtype = Subtype(0x04);
    pub const DEVICE_OPTIONS: Subtype = Subtype(0x05);
    pub const ALIAS_NAME: Subtype = Subtype(0x06);
    pub const DEVICE_INSTANCE: Subtype = Subtype(0x07);
    pub const OEM_DEVICE_ID: Subtype = Subtype(0x08);

    // Category::Dhcp
    pub const HOST_NAME: Subtype = Subtype(0x0C);
    pub const VENDOR_SPECIFIC_INFORMATION: Subtype = Subtype(0x2B);
    pub const SERVER_IDENTIFIER: Subtype = Subtype(0x36);
    pub const PARAMETER_REQUEST_LIST: Subtype = Subtype(0x37);
    pub const CLASS_IDENTIFIER: Subtype = Subtype(0x3C);
    pub const DHCP_CLIENT_IDENTIFIER: Subtype = Subtype(0x3D);
    pub const FULLY_QUALIFIED_DOMAIN_NAME: Subtype = Subtype(0x51);
    pub const UUID_CLIENT_IDENTIFIER: Subtype = Subtype(0x61);
    pub const DHCP: Subtype = Subtype(0xFF);

    // Category::Control
    pub const START: Subtype = Subtype(0x01);
    pub const STOP: Subtype = Subtype(0x02);
    pub const SIGNAL: Subtype = Subtype(0x03);
    pub const RESPONSE: Subtype = Subtype(0x04);
    pub const FACTORY_RESET: Subtype = Subtype(0x05);
    pub const RESET_TO_FACTORY: Subtype = Subtype(0x06);

    // Category::Initiative
    pub const DEVICE_INITIATIVE: Subtype = Subtype(0x01);

    // Category::All
    pub const ALL_SELECTOR: Subtype = Subtype(0xFF);

    /// Name of this suboption within `category`, or `None` if the pair is not
    /// part of the known catalogue.
    pub fn describe(self, category: Category) -> Option<&'static str> {
        let name = match (category, self.0) {
            (Category::Ip, 0x01) => "MACAddress",
            (Category::Ip, 0x02) => "IPParameter",
            (Category::Ip, 0x03) => "FullIPSuite",

            (Category::Properties, 0x01) => "ManufacturerSpecific",
            (Category::Properties, 0x02) => "NameOfStation",
            (Category::Properties, 0x03) => "DeviceID",
            (Category::Properties, 0x04) => "DeviceRole",
            (Category::Properties, 0x05) => "DeviceOptions",
            (Category::Properties, 0x06) => "AliasName",
            (Category::Properties, 0x07) => "DeviceInstance",
            (Category::Properties, 0x08) => "OEMDeviceID",

            (Category::Dhcp, 0x0C) => "HostName",
            (Category::Dhcp, 0x2B) => "VendorSpecificInformation",
            (Category::Dhcp, 0x36) => "ServerIdentifier",
            (Category::Dhcp, 0x37) => "ParameterRequestList",
            (Category::Dhcp, 0x3C) => "ClassIdentifier",
            (Category::Dhcp, 0x3D) => "DHCPClientIdentifier",
            (Category::Dhcp, 0x51) => "FullyQualifiedDomainName",
            (Category::Dhcp, 0x61) => "UUIDClientIdentifier",
            (Category::Dhcp, 0xFF) => "DHCP",

            (Category::Control, 0x01) => "Start",
            (Category::Control, 0x02) => "Stop",
            (Category::Control, 0x03) => "Signal",
            (Category::Control, 0x04) => "Response",
            (Category::Control, 0x05) => "FactoryReset",
            (Category::Control, 0x06) => "ResetToFactory",

            (Category::Initiative, 0x01) => "DeviceInitiative",

            (Category::All, 0xFF) => "AllSelector",
            _ => return None,
        };
        Some(name)
    }
}

impl From<u8> for Subtype {
    fn from(value: u8) -> Self {
        Subtype(value)
    }
}

impl From<Subtype> for u8 {
    fn from(subtype: Subtype) -> Self {
        subtype.0
    }
}

/// Option and suboption combined, the unit dispatch is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockType {
    pub category: Category,
    pub subtype: Subtype,
}

impl BlockType {
    pub const IP_MAC_ADDRESS: Self = Self::new(Category::Ip, Subtype::MAC_ADDRESS);
    pub const IP_PARAMETER: Self = Self::new(Category::Ip, Subtype::IP_PARAMETER);
    pub const IP_FULL_IP_SUITE: Self = Self::new(Category::Ip, Subtype::FULL_IP_SUITE);

    pub const MANUFACTURER_SPECIFIC: Self =
        Self::new(Category::Properties, Subtype::MANUFACTURER_SPECIFIC);
    pub const NAME_OF_STATION: Self = Self::new(Category::Properties, Subtype::NAME_OF_STATION);
    pub const DEVICE_ID: Self = Self::new(Category::Properties, Subtype::DEVICE_ID);
    pub const DEVICE_ROLE: Self = Self::new(Category::Properties, Subtype::DEVICE_ROLE);
    pub const DEVICE_OPTIONS: Self = Self::new(Category::Properties, Subtype::DEVICE_OPTIONS);
    pub const ALIAS_NAME: Self = Self::new(Category::Properties, Subtype::ALIAS_NAME);
    pub const DEVICE_INSTANCE: Self = Self::new(Category::Properties, Subtype::DEVICE_INSTANCE);
    pub const OEM_DEVICE_ID: Self = Self::new(Category::Properties, Subtype::OEM_DEVICE_ID);

    pub const CONTROL_START: Self = Self::new(Category::Control, Subtype::START);
    pub const CONTROL_STOP: Self = Self::new(Category::Control, Subtype::STOP);
    pub const CONTROL_SIGNAL: Self = Self::new(Category::Control, Subtype::SIGNAL);
    pub const CONTROL_RESPONSE: Self = Self::new(Category::Control, Subtype::RESPONSE);
    pub const CONTROL_FACTORY_RESET: Self = Self::new(Category::Control, Subtype::FACTORY_RESET);
    pub const CONTROL_RESET_TO_FACTORY: Self =
        Self::new(Category::Control, Subtype::RESET_TO_FACTORY);

    pub const DEVICE_INITIATIVE: Self = Self::new(Category::Initiative, Subtype::DEVICE_INITIATIVE);

    pub const ALL_SELECTOR: Self = Self::new(Category::All, Subtype::ALL_SELECTOR);

    pub const fn new(category: Category, subtype: Subtype) -> Self {
        Self { category, subtype }
    }

    /// Builds the pair from the two raw discriminator bytes.
    pub fn from_bytes(category: u8, subtype: u8) -> Self {
        Self {
            category: Category::from(category),
            subtype: Subtype(subtype),
        }
    }

    pub fn describe(&self) -> Option<&'static str> {
        self.subtype.describe(self.category)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.describe() {
            Some(name) => write!(f, "{}/{}", self.category, name),
            None => write!(f, "{}/0x{:02X}", self.category, self.subtype.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_raw_values_round_trip() {
        for raw in 0..=u8::MAX {
            assert_eq!(u8::from(Category::from(raw)), raw);
        }
        assert_eq!(Category::from(0x04), Category::Unknown(0x04));
        assert!(!Category::from(0x04).is_recognized());
    }

    #[test]
    fn subtype_meaning_depends_on_category() {
        let one = Subtype(0x01);
        assert_eq!(one.describe(Category::Ip), Some("MACAddress"));
        assert_eq!(one.describe(Category::Properties), Some("ManufacturerSpecific"));
        assert_eq!(one.describe(Category::Control), Some("Start"));
        assert_eq!(one.describe(Category::Initiative), Some("DeviceInitiative"));
        assert_eq!(one.describe(Category::All), None);
    }

    #[test]
    fn block_type_display() {
        assert_eq!(BlockType::NAME_OF_STATION.to_string(), "DeviceProperties/NameOfStation");
        assert_eq!(BlockType::from_bytes(0x02, 0x42).to_string(), "DeviceProperties/0x42");
        assert_eq!(BlockType::from_bytes(0xFF, 0xFF), BlockType::ALL_SELECTOR);
    }
}
