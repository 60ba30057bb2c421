//! # Battery Client
//!
//! Application-side API for the Battery object (`/3411`). Sensor code reports through here;
//! the protocol side only ever reads these resources.
use crate::catalog::battery;
use crate::error::NodeError;
use node_object::{FrameworkError, ObjectAccess, ObjectClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct BatteryClient {
    inner: ObjectClient,
}

impl BatteryClient {
    pub fn new(inner: ObjectClient) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ObjectAccess for BatteryClient {
    type Error = NodeError;

    fn inner(&self) -> &ObjectClient {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        NodeError::from_framework(battery::OBJECT_ID, e)
    }
}

impl BatteryClient {
    /// Stores a new level and raises the too-low flag against the configured threshold.
    #[instrument(skip(self))]
    pub async fn report_level(&self, level: i32) -> Result<(), NodeError> {
        debug!("Sending request");
        let threshold = self
            .inner
            .get_value::<i32>(0, battery::LOW_THRESHOLD)
            .await
            .map_err(Self::map_error)?;
        self.inner
            .set_value(0, battery::LEVEL, level)
            .await
            .map_err(Self::map_error)?;
        self.inner
            .set_value(0, battery::LEVEL_TOO_LOW, level < threshold)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn level(&self) -> Result<i32, NodeError> {
        debug!("Sending request");
        self.inner
            .get_value::<i32>(0, battery::LEVEL)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn level_too_low(&self) -> Result<bool, NodeError> {
        debug!("Sending request");
        self.inner
            .get_value::<bool>(0, battery::LEVEL_TOO_LOW)
            .await
            .map_err(Self::map_error)
    }
}
