//! # Server Client
//!
//! Application-side API for the LwM2M Server object (`/1`).
use crate::catalog::server;
use crate::error::NodeError;
use node_object::{FrameworkError, ObjectAccess, ObjectClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ServerClient {
    inner: ObjectClient,
}

impl ServerClient {
    pub fn new(inner: ObjectClient) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ObjectAccess for ServerClient {
    type Error = NodeError;

    fn inner(&self) -> &ObjectClient {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        NodeError::from_framework(server::OBJECT_ID, e)
    }
}

impl ServerClient {
    #[instrument(skip(self))]
    pub async fn lifetime(&self) -> Result<i32, NodeError> {
        debug!("Sending request");
        self.inner
            .read_value::<i32>(0, server::LIFETIME)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_lifetime(&self, seconds: i32) -> Result<(), NodeError> {
        debug!("Sending request");
        self.inner
            .write_value(0, server::LIFETIME, seconds)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn trigger_registration_update(&self) -> Result<(), NodeError> {
        debug!("Sending request");
        self.inner
            .execute(0, server::REGISTRATION_UPDATE_TRIGGER)
            .await
            .map_err(Self::map_error)
    }
}
