//! Battery object (`/3411`).

use super::{flag, float, int, text};
use node_object::definition::{ObjectDefinition, ResourceDefinition};
use node_object::{Access, Unit};

pub const OBJECT_ID: u16 = 3411;

pub const LEVEL: u16 = 1;
pub const CAPACITY: u16 = 2;
pub const VOLTAGE: u16 = 3;
pub const TYPE: u16 = 4;
pub const LOW_THRESHOLD: u16 = 5;
pub const LEVEL_TOO_LOW: u16 = 6;
pub const SHUTDOWN: u16 = 7;
pub const CYCLES: u16 = 8;
pub const SUPPLY_LOSS: u16 = 9;
pub const SUPPLY_LOSS_COUNTER: u16 = 10;
pub const SUPPLY_LOSS_COUNTER_RESET: u16 = 11;
pub const SUPPLY_LOSS_REASON: u16 = 12;

pub fn definition() -> ObjectDefinition {
    ObjectDefinition::new(
        OBJECT_ID,
        vec![
            ResourceDefinition::new(LEVEL, "Battery level", Access::ReadOnly, int(100))
                .with_unit(Unit::Percent),
            ResourceDefinition::new(CAPACITY, "Battery capacity", Access::ReadOnly, float(0.0))
                .with_unit(Unit::AmpereHour),
            ResourceDefinition::new(VOLTAGE, "Battery voltage", Access::ReadOnly, float(0.0))
                .with_unit(Unit::Volt),
            ResourceDefinition::new(TYPE, "Type of battery", Access::ReadWrite, text("")),
            ResourceDefinition::new(LOW_THRESHOLD, "Low battery threshold", Access::ReadWrite, int(0))
                .with_unit(Unit::Percent),
            ResourceDefinition::new(LEVEL_TOO_LOW, "Battery level too low", Access::ReadOnly, flag(false)),
            ResourceDefinition::new(SHUTDOWN, "Battery shutdown", Access::ReadWrite, flag(false)),
            ResourceDefinition::new(CYCLES, "Number of cycles", Access::ReadOnly, int(0)),
            ResourceDefinition::new(SUPPLY_LOSS, "Supply loss", Access::ReadOnly, flag(false)),
            ResourceDefinition::new(SUPPLY_LOSS_COUNTER, "Supply loss counter", Access::ReadOnly, int(0)),
            ResourceDefinition::new(
                SUPPLY_LOSS_COUNTER_RESET,
                "Supply loss counter reset",
                Access::Execute,
                int(0),
            ),
            ResourceDefinition::new(SUPPLY_LOSS_REASON, "Supply loss reason", Access::ReadOnly, text("")),
        ],
    )
}
