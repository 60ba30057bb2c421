//! # ObjectAccess Trait
//!
//! Common surface for object-specific clients (`DeviceClient`, `ServerClient`, ...). A wrapper
//! supplies its inner [`ObjectClient`] and an error mapping, and gets instance-level
//! operations for free.
//!
//! ```rust
//! use node_object::{FrameworkError, ObjectAccess, ObjectClient};
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! struct LampError(String);
//!
//! struct LampClient {
//!     inner: ObjectClient,
//! }
//!
//! #[async_trait]
//! impl ObjectAccess for LampClient {
//!     type Error = LampError;
//!
//!     fn inner(&self) -> &ObjectClient {
//!         &self.inner
//!     }
//!
//!     fn map_error(e: FrameworkError) -> Self::Error {
//!         LampError(e.to_string())
//!     }
//! }
//!
//! async fn usage(lamps: LampClient) {
//!     // discover(), read_instance(), create_instance() and delete_instance() are provided
//!     let _ = lamps.discover(0).await;
//!     let _ = lamps.delete_instance(1).await;
//! }
//! ```

use crate::client::ObjectClient;
use crate::error::FrameworkError;
use crate::wire::DataItem;
use async_trait::async_trait;

#[async_trait]
pub trait ObjectAccess: Send + Sync {
    /// The object-specific error type.
    type Error: Send + Sync;

    fn inner(&self) -> &ObjectClient;

    fn map_error(e: FrameworkError) -> Self::Error;

    /// Every resource id of an instance.
    #[tracing::instrument(skip(self))]
    async fn discover(&self, instance: u16) -> Result<Vec<u16>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .discover(instance, Vec::new())
            .await
            .map_err(Self::map_error)
    }

    /// Every readable resource of an instance.
    #[tracing::instrument(skip(self))]
    async fn read_instance(&self, instance: u16) -> Result<Vec<DataItem>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .read(instance, Vec::new())
            .await
            .map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self, items))]
    async fn create_instance(&self, instance: u16, items: Vec<DataItem>) -> Result<(), Self::Error> {
        tracing::debug!(items = items.len(), "Sending request");
        self.inner()
            .create(instance, items)
            .await
            .map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_instance(&self, instance: u16) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(instance).await.map_err(Self::map_error)
    }
}
