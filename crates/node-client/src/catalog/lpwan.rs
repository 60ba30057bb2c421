//! LPWAN communication object (`/3412`).
//!
//! Carries the one writable multiple-instance resource of the catalog: the IPv4 address list.

use super::{flag, float, int, text};
use node_object::definition::{InitialValue, ObjectDefinition, ResourceDefinition};
use node_object::{Access, Unit};

pub const OBJECT_ID: u16 = 3412;

pub const TYPE_OF_NETWORK: u16 = 1;
pub const IPV4_ADDRESS: u16 = 2;
pub const IPV6_ADDRESS: u16 = 3;
pub const MAC_ADDRESS: u16 = 6;
pub const TRANSMIT_POWER: u16 = 11;
pub const FREQUENCY: u16 = 12;
pub const MESH_NODE: u16 = 15;
pub const RSSI: u16 = 20;

pub fn definition() -> ObjectDefinition {
    let addresses = ["192.168.0.1", "10.10.10.54", "178.129.0.3"]
        .iter()
        .zip(0u16..)
        .map(|(address, i)| {
            ResourceDefinition::new(i, format!("ipv4Address {}", i + 1), Access::ReadWrite, text(address))
        })
        .collect();

    ObjectDefinition::new(
        OBJECT_ID,
        vec![
            ResourceDefinition::new(TYPE_OF_NETWORK, "Type of network", Access::ReadOnly, text("")),
            ResourceDefinition::new(
                IPV4_ADDRESS,
                "IPv4 address",
                Access::ReadWrite,
                InitialValue::Multiple(addresses),
            ),
            ResourceDefinition::new(IPV6_ADDRESS, "IPv6 address", Access::ReadWrite, text("")),
            ResourceDefinition::new(4, "Network address", Access::ReadWrite, text("")),
            ResourceDefinition::new(5, "Secondary network address", Access::ReadWrite, text("")),
            ResourceDefinition::new(MAC_ADDRESS, "MAC address", Access::ReadWrite, text("")),
            ResourceDefinition::new(7, "Peer address", Access::ReadOnly, text("")),
            ResourceDefinition::new(8, "Multicast group address", Access::ReadWrite, text("")),
            ResourceDefinition::new(9, "Multicast group key", Access::ReadWrite, text("")),
            ResourceDefinition::new(10, "Data rate", Access::ReadWrite, int(0)),
            ResourceDefinition::new(TRANSMIT_POWER, "Transmit power", Access::ReadOnly, float(0.0))
                .with_unit(Unit::DecibelMilliwatt),
            ResourceDefinition::new(FREQUENCY, "Frequency", Access::ReadWrite, float(0.0))
                .with_unit(Unit::Hertz),
            ResourceDefinition::new(13, "Session time", Access::ReadWrite, int(0)),
            ResourceDefinition::new(14, "Session duration", Access::ReadOnly, int(0))
                .with_unit(Unit::Seconds),
            ResourceDefinition::new(MESH_NODE, "Mesh node", Access::ReadWrite, flag(false)),
            ResourceDefinition::new(16, "Maximum repeat time", Access::ReadWrite, int(0)),
            ResourceDefinition::new(17, "Number of repeats", Access::ReadOnly, int(0)),
            ResourceDefinition::new(18, "Signal to noise ratio", Access::ReadOnly, float(0.0)),
            ResourceDefinition::new(19, "Communication failure", Access::ReadOnly, flag(false)),
            ResourceDefinition::new(RSSI, "Received Signal Strength Indication", Access::ReadOnly, float(0.0))
                .with_unit(Unit::DecibelMilliwatt),
            ResourceDefinition::new(21, "IMSI", Access::ReadOnly, text("")),
            ResourceDefinition::new(22, "IMEI", Access::ReadOnly, text("")),
            ResourceDefinition::new(23, "Current Communication Operator", Access::ReadOnly, text("")),
            ResourceDefinition::new(24, "Integrated Circuit Card Identifier", Access::ReadOnly, text("")),
        ],
    )
}
