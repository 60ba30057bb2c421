//! LwM2M Server object (`/1`).

use super::{flag, int, text};
use node_object::definition::{ObjectDefinition, ResourceDefinition};
use node_object::{Access, Unit};

pub const OBJECT_ID: u16 = 1;

pub const SHORT_SERVER_ID: u16 = 0;
pub const LIFETIME: u16 = 1;
pub const DEFAULT_MIN_PERIOD: u16 = 2;
pub const DEFAULT_MAX_PERIOD: u16 = 3;
pub const DISABLE: u16 = 4;
pub const DISABLE_TIMEOUT: u16 = 5;
pub const NOTIFICATION_STORING: u16 = 6;
pub const BINDING: u16 = 7;
pub const REGISTRATION_UPDATE_TRIGGER: u16 = 8;

pub const DEFAULT_SHORT_SERVER_ID: i32 = 123;
pub const DEFAULT_LIFETIME: i32 = 600;

pub fn definition() -> ObjectDefinition {
    ObjectDefinition::new(
        OBJECT_ID,
        vec![
            ResourceDefinition::new(SHORT_SERVER_ID, "Short server id", Access::ReadOnly, int(DEFAULT_SHORT_SERVER_ID)),
            ResourceDefinition::new(LIFETIME, "Lifetime", Access::ReadWrite, int(DEFAULT_LIFETIME))
                .with_unit(Unit::Seconds),
            ResourceDefinition::new(DEFAULT_MIN_PERIOD, "Default minimum period", Access::ReadWrite, int(0))
                .with_unit(Unit::Seconds),
            ResourceDefinition::new(DEFAULT_MAX_PERIOD, "Default maximum period", Access::ReadWrite, int(0))
                .with_unit(Unit::Seconds),
            ResourceDefinition::new(DISABLE, "Disable", Access::Execute, int(0)),
            ResourceDefinition::new(DISABLE_TIMEOUT, "Disable timeout", Access::ReadWrite, int(0))
                .with_unit(Unit::Seconds),
            ResourceDefinition::new(
                NOTIFICATION_STORING,
                "Notification storing when disabled or offline",
                Access::ReadWrite,
                flag(false),
            ),
            ResourceDefinition::new(BINDING, "Binding", Access::ReadWrite, text("U")),
            ResourceDefinition::new(
                REGISTRATION_UPDATE_TRIGGER,
                "Registration update trigger",
                Access::Execute,
                int(0),
            ),
        ],
    )
}
