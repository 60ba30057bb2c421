//! Device object (`/3`).

use super::{int, text};
use node_object::definition::{InitialValue, ObjectDefinition, ResourceDefinition};
use node_object::{Access, Unit};

pub const OBJECT_ID: u16 = 3;

pub const MANUFACTURER: u16 = 0;
pub const MODEL_NUMBER: u16 = 1;
pub const SERIAL_NUMBER: u16 = 2;
pub const FIRMWARE_VERSION: u16 = 3;
pub const REBOOT: u16 = 4;
pub const FACTORY_RESET: u16 = 5;
pub const AVAILABLE_POWER_SOURCES: u16 = 6;
pub const POWER_SOURCE_VOLTAGE: u16 = 7;
pub const POWER_SOURCE_CURRENT: u16 = 8;
pub const BATTERY_LEVEL: u16 = 9;
pub const MEMORY_FREE: u16 = 10;
pub const ERROR_CODE: u16 = 11;
pub const RESET_ERROR_CODE: u16 = 12;
pub const CURRENT_TIME: u16 = 13;
pub const UTC_OFFSET: u16 = 14;
pub const TIMEZONE: u16 = 15;
pub const SUPPORTED_BINDING: u16 = 16;
pub const DEVICE_TYPE: u16 = 17;
pub const HARDWARE_VERSION: u16 = 18;
pub const SOFTWARE_VERSION: u16 = 19;
pub const BATTERY_STATUS: u16 = 20;
pub const MEMORY_TOTAL: u16 = 21;
pub const EXTERNAL_DEVICE_INFO: u16 = 22;

pub fn definition() -> ObjectDefinition {
    let power_sources = (0..3)
        .map(|i| {
            ResourceDefinition::new(
                i,
                format!("Available power source {}", i + 1),
                Access::ReadOnly,
                int(i32::from(i)),
            )
        })
        .collect();

    ObjectDefinition::new(
        OBJECT_ID,
        vec![
            ResourceDefinition::new(MANUFACTURER, "Manufacturer", Access::ReadOnly, text("OMA")),
            ResourceDefinition::new(MODEL_NUMBER, "Model number", Access::ReadOnly, text("LWM2M Client")),
            ResourceDefinition::new(SERIAL_NUMBER, "Serial number", Access::ReadOnly, text("345000123")),
            ResourceDefinition::new(FIRMWARE_VERSION, "Firmware version", Access::ReadOnly, text("1.0")),
            ResourceDefinition::new(REBOOT, "Reboot", Access::Execute, int(0)),
            ResourceDefinition::new(FACTORY_RESET, "Factory reset", Access::Execute, int(0)),
            ResourceDefinition::new(
                AVAILABLE_POWER_SOURCES,
                "Available power source",
                Access::ReadOnly,
                InitialValue::Multiple(power_sources),
            ),
            ResourceDefinition::new(POWER_SOURCE_VOLTAGE, "Power source voltage", Access::ReadOnly, int(0))
                .with_unit(Unit::Volt),
            ResourceDefinition::new(POWER_SOURCE_CURRENT, "Power source current", Access::ReadOnly, int(0))
                .with_unit(Unit::Ampere),
            ResourceDefinition::new(BATTERY_LEVEL, "Battery level", Access::ReadOnly, int(100))
                .with_unit(Unit::Percent),
            ResourceDefinition::new(MEMORY_FREE, "Free memory", Access::ReadOnly, int(15))
                .with_unit(Unit::Bytes),
            ResourceDefinition::new(ERROR_CODE, "Error code", Access::ReadOnly, int(0)),
            ResourceDefinition::new(RESET_ERROR_CODE, "Reset error code", Access::Execute, int(0)),
            ResourceDefinition::new(CURRENT_TIME, "Current time", Access::ReadWrite, int(0)),
            ResourceDefinition::new(UTC_OFFSET, "UTC offset", Access::ReadWrite, text("UTC+X")),
            ResourceDefinition::new(TIMEZONE, "Timezone", Access::ReadWrite, text("Europe")),
            ResourceDefinition::new(SUPPORTED_BINDING, "Supported binding and mode", Access::ReadOnly, text("U")),
            ResourceDefinition::new(DEVICE_TYPE, "Device type", Access::ReadOnly, text("light node")),
            ResourceDefinition::new(HARDWARE_VERSION, "Hardware version", Access::ReadOnly, text("1.0")),
            ResourceDefinition::new(SOFTWARE_VERSION, "Software version", Access::ReadOnly, text("1.0")),
            ResourceDefinition::new(BATTERY_STATUS, "Battery status", Access::ReadOnly, int(0)),
            ResourceDefinition::new(MEMORY_TOTAL, "Memory total", Access::ReadOnly, int(1000)),
            ResourceDefinition::new(EXTERNAL_DEVICE_INFO, "External device info", Access::ReadOnly, int(0)),
        ],
    )
}
