use crate::catalog::{self, device, server};
use crate::clients::{BatteryClient, DeviceClient, ServerClient};
use crate::config::NodeConfig;
use crate::engine::EngineDispatcher;
use crate::error::NodeError;
use node_object::definition::{InitialValue, ObjectDefinition};
use node_object::{NodeObject, ObjectActor};
use std::collections::BTreeSet;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running node: one object task per catalog object, and the dispatcher in front of them.
///
/// ```ignore
/// let system = NodeSystem::start(NodeConfig::load()?).await?;
///
/// let response = system.dispatcher.dispatch(request).await;
/// system.battery()?.report_level(42).await?;
///
/// let objects = system.shutdown().await?;
/// ```
pub struct NodeSystem {
    pub config: NodeConfig,
    /// Routes protocol requests; holds the only long-lived client of each object.
    pub dispatcher: EngineDispatcher,
    handles: Vec<JoinHandle<NodeObject>>,
}

impl NodeSystem {
    /// Starts the node from `config`, using the catalog file it names if any.
    pub async fn start(config: NodeConfig) -> Result<Self, NodeError> {
        let definitions = match &config.catalog {
            Some(path) => catalog::load(path)?,
            None => catalog::definitions(),
        };
        Self::from_definitions(config, definitions).await
    }

    pub async fn from_definitions(
        config: NodeConfig,
        mut definitions: Vec<ObjectDefinition>,
    ) -> Result<Self, NodeError> {
        let mut seen = BTreeSet::new();
        for definition in &definitions {
            if !seen.insert(definition.id) {
                return Err(NodeError::DuplicateObject {
                    object: definition.id,
                });
            }
        }
        seed_lifetime(&mut definitions, config.lifetime);
        let objects = catalog::build(&definitions)?;

        let mut dispatcher = EngineDispatcher::new();
        let mut handles = Vec::with_capacity(objects.len());
        for object in objects {
            let (actor, client) = ObjectActor::new(config.mailbox_size, object);
            handles.push(tokio::spawn(actor.run()));
            dispatcher.register(client)?;
        }

        let system = Self {
            config,
            dispatcher,
            handles,
        };
        system.log_manufacturer_reads().await?;

        info!(
            endpoint = %system.config.endpoint_name,
            server = %system.config.server_uri,
            objects = ?system.dispatcher.object_ids(),
            "Node started"
        );
        Ok(system)
    }

    pub fn device(&self) -> Result<DeviceClient, NodeError> {
        self.object(device::OBJECT_ID).map(DeviceClient::new)
    }

    pub fn server(&self) -> Result<ServerClient, NodeError> {
        self.object(server::OBJECT_ID).map(ServerClient::new)
    }

    pub fn battery(&self) -> Result<BatteryClient, NodeError> {
        self.object(catalog::battery::OBJECT_ID).map(BatteryClient::new)
    }

    fn object(&self, object_id: u16) -> Result<node_object::ObjectClient, NodeError> {
        self.dispatcher
            .client(object_id)
            .cloned()
            .ok_or(NodeError::UnknownObject(object_id))
    }

    async fn log_manufacturer_reads(&self) -> Result<(), NodeError> {
        let Some(device) = self.dispatcher.client(device::OBJECT_ID) else {
            return Ok(());
        };
        device
            .bind_on_read::<String, _>(0, device::MANUFACTURER, |manufacturer| {
                info!(%manufacturer, "Manufacturer read");
            })
            .await
            .map_err(|e| NodeError::from_framework(device::OBJECT_ID, e))?;
        Ok(())
    }

    /// Stops every object task and returns the objects in catalog order.
    ///
    /// Tasks only finish once every client of their object is dropped, so release typed
    /// clients before calling this.
    pub async fn shutdown(self) -> Result<Vec<NodeObject>, NodeError> {
        info!("Shutting down node...");
        drop(self.dispatcher);

        let mut objects = Vec::with_capacity(self.handles.len());
        for handle in self.handles {
            match handle.await {
                Ok(object) => objects.push(object),
                Err(e) => {
                    error!("Object task failed: {:?}", e);
                    return Err(NodeError::Task(e.to_string()));
                }
            }
        }

        info!("Node shutdown complete.");
        Ok(objects)
    }
}

fn seed_lifetime(definitions: &mut [ObjectDefinition], lifetime: i32) {
    let lifetime_resource = definitions
        .iter_mut()
        .filter(|d| d.id == server::OBJECT_ID)
        .flat_map(|d| d.resources.iter_mut())
        .find(|r| r.id == server::LIFETIME);
    if let Some(resource) = lifetime_resource {
        resource.initial = InitialValue::Integer(lifetime);
    }
}
