//! # Object Client
//!
//! Cheap, cloneable handle to an [`ObjectActor`](crate::ObjectActor). Every method sends one
//! request and awaits the reply; the object itself never leaves its task.

use crate::error::{FrameworkError, ResourceError};
use crate::message::{ObjectRequest, ResourceFn, Response};
use crate::object::WriteMode;
use crate::resource::{ListenerHandle, Resource};
use crate::value::ResourceKind;
use crate::wire::DataItem;
use paste::paste;
use tokio::sync::{mpsc, oneshot};

#[derive(Clone)]
pub struct ObjectClient {
    object_id: u16,
    sender: mpsc::Sender<ObjectRequest>,
}

macro_rules! remote_observer_methods {
    ($($op:ident),* $(,)?) => {
        paste! {
            $(
                #[doc = "Registers a listener on a resource's " $op " operations, inside the object task."]
                pub async fn [<bind_on_ $op>]<K, F>(
                    &self,
                    instance: u16,
                    resource: u16,
                    listener: F,
                ) -> Result<ListenerHandle, FrameworkError>
                where
                    K: ResourceKind,
                    F: Fn(&K) + Send + Sync + 'static,
                {
                    Ok(self
                        .with_resource(instance, resource, move |r| r.[<bind_on_ $op>]::<K, F>(listener))
                        .await??)
                }

                pub async fn [<unbind_on_ $op>]<K: ResourceKind>(
                    &self,
                    instance: u16,
                    resource: u16,
                    handle: ListenerHandle,
                ) -> Result<(), FrameworkError> {
                    Ok(self
                        .with_resource(instance, resource, move |r| r.[<unbind_on_ $op>]::<K>(handle))
                        .await??)
                }
            )*
        }
    };
}

impl ObjectClient {
    pub fn new(object_id: u16, sender: mpsc::Sender<ObjectRequest>) -> Self {
        Self { object_id, sender }
    }

    pub fn object_id(&self) -> u16 {
        self.object_id
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> ObjectRequest,
    ) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        Ok(response.await.map_err(|_| FrameworkError::ActorDropped)??)
    }

    pub async fn discover(&self, instance: u16, resources: Vec<u16>) -> Result<Vec<u16>, FrameworkError> {
        self.request(|respond_to| ObjectRequest::Discover {
            instance,
            resources,
            respond_to,
        })
        .await
    }

    /// Reads `resources`; an empty list reads every readable resource of the instance.
    pub async fn read(&self, instance: u16, resources: Vec<u16>) -> Result<Vec<DataItem>, FrameworkError> {
        let items = resources.into_iter().map(DataItem::unset).collect();
        self.read_items(instance, items).await
    }

    pub async fn read_items(
        &self,
        instance: u16,
        items: Vec<DataItem>,
    ) -> Result<Vec<DataItem>, FrameworkError> {
        self.request(|respond_to| ObjectRequest::Read {
            instance,
            items,
            respond_to,
        })
        .await
    }

    pub async fn write(
        &self,
        instance: u16,
        items: Vec<DataItem>,
        mode: WriteMode,
    ) -> Result<(), FrameworkError> {
        self.request(|respond_to| ObjectRequest::Write {
            instance,
            items,
            mode,
            respond_to,
        })
        .await
    }

    pub async fn execute(&self, instance: u16, resource: u16) -> Result<(), FrameworkError> {
        self.request(|respond_to| ObjectRequest::Execute {
            instance,
            resource,
            respond_to,
        })
        .await
    }

    pub async fn create(&self, instance: u16, items: Vec<DataItem>) -> Result<(), FrameworkError> {
        self.request(|respond_to| ObjectRequest::Create {
            instance,
            items,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, instance: u16) -> Result<(), FrameworkError> {
        self.request(|respond_to| ObjectRequest::Delete {
            instance,
            respond_to,
        })
        .await
    }

    pub async fn instance_ids(&self) -> Result<Vec<u16>, FrameworkError> {
        self.request(|respond_to| ObjectRequest::Instances { respond_to })
            .await
    }

    /// Runs `f` against one resource inside the object task and returns its result.
    pub async fn with_resource<R, F>(
        &self,
        instance: u16,
        resource: u16,
        f: F,
    ) -> Result<R, FrameworkError>
    where
        R: Send + 'static,
        F: FnOnce(&mut Resource) -> R + Send + 'static,
    {
        let (result_tx, result_rx) = oneshot::channel();
        let apply: ResourceFn = Box::new(move |target: &mut Resource| {
            let _ = result_tx.send(f(target));
        });
        self.request(|respond_to| ObjectRequest::WithResource {
            instance,
            resource,
            apply,
            respond_to,
        })
        .await?;
        result_rx.await.map_err(|_| FrameworkError::ActorDropped)
    }

    /// Unguarded typed read, for application code.
    pub async fn get_value<K: ResourceKind>(&self, instance: u16, resource: u16) -> Result<K, FrameworkError> {
        Ok(self
            .with_resource(instance, resource, |r| r.get_value::<K>().cloned())
            .await??)
    }

    /// Unguarded typed store, for application code pushing local state.
    pub async fn set_value<K: ResourceKind>(
        &self,
        instance: u16,
        resource: u16,
        value: K,
    ) -> Result<(), FrameworkError> {
        Ok(self
            .with_resource(instance, resource, move |r| r.set_value(value))
            .await??)
    }

    /// Guarded typed read: access rights apply and read listeners fire.
    pub async fn read_value<K: ResourceKind>(&self, instance: u16, resource: u16) -> Result<K, FrameworkError> {
        Ok(self
            .with_resource(instance, resource, |r| r.read::<K>().cloned())
            .await??)
    }

    /// Guarded typed write: access rights apply and write listeners fire.
    pub async fn write_value<K: ResourceKind>(
        &self,
        instance: u16,
        resource: u16,
        value: K,
    ) -> Result<(), FrameworkError> {
        Ok(self
            .with_resource(instance, resource, move |r| r.write(value))
            .await??)
    }

    /// Returns and clears the resource's last recorded error.
    pub async fn take_error(&self, instance: u16, resource: u16) -> Result<Option<ResourceError>, FrameworkError> {
        self.with_resource(instance, resource, Resource::take_error)
            .await
    }

    remote_observer_methods!(read, write, exec);
}
