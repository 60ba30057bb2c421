//! # Device Client
//!
//! Application-side API for the Device object (`/3`).
use crate::catalog::device;
use crate::error::NodeError;
use node_object::{FrameworkError, ObjectAccess, ObjectClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct DeviceClient {
    inner: ObjectClient,
}

impl DeviceClient {
    pub fn new(inner: ObjectClient) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ObjectAccess for DeviceClient {
    type Error = NodeError;

    fn inner(&self) -> &ObjectClient {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        NodeError::from_framework(device::OBJECT_ID, e)
    }
}

impl DeviceClient {
    /// Guarded read, so read listeners on the manufacturer fire.
    #[instrument(skip(self))]
    pub async fn manufacturer(&self) -> Result<String, NodeError> {
        debug!("Sending request");
        self.inner
            .read_value::<String>(0, device::MANUFACTURER)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn reboot(&self) -> Result<(), NodeError> {
        debug!("Sending request");
        self.inner
            .execute(0, device::REBOOT)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn factory_reset(&self) -> Result<(), NodeError> {
        debug!("Sending request");
        self.inner
            .execute(0, device::FACTORY_RESET)
            .await
            .map_err(Self::map_error)
    }

    /// Pushes a fresh battery reading into the read-only level resource.
    #[instrument(skip(self))]
    pub async fn set_battery_level(&self, level: i32) -> Result<(), NodeError> {
        debug!("Sending request");
        self.inner
            .set_value(0, device::BATTERY_LEVEL, level)
            .await
            .map_err(Self::map_error)
    }
}
