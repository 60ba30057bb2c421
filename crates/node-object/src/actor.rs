//! # Object Actor
//!
//! The `ObjectActor` owns one object and is the only code that ever touches it. Protocol
//! requests and application updates both arrive as [`ObjectRequest`] messages on the same
//! channel and are handled one at a time, which is what keeps a sensor update from
//! interleaving with a half-finished protocol write.
//!
//! ```rust
//! use node_object::{Access, NodeObject, ObjectActor, Resource, Unit};
//!
//! #[tokio::main]
//! async fn main() {
//!     let object = NodeObject::new(3, [
//!         Resource::new(100, Access::ReadOnly, "Battery level", Unit::Percent, 9),
//!     ]).unwrap();
//!
//!     let (actor, client) = ObjectActor::new(16, object);
//!     let handle = tokio::spawn(actor.run());
//!
//!     client.set_value(0, 9, 87).await.unwrap();
//!     let items = client.read(0, vec![9]).await.unwrap();
//!     assert_eq!(items.len(), 1);
//!
//!     drop(client);
//!     let object = handle.await.unwrap();
//!     assert_eq!(object.instance_ids(), vec![0]);
//! }
//! ```

use crate::client::ObjectClient;
use crate::error::ObjectError;
use crate::handler::ObjectHandler;
use crate::message::ObjectRequest;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct ObjectActor<H: ObjectHandler> {
    receiver: mpsc::Receiver<ObjectRequest>,
    handler: H,
}

impl<H: ObjectHandler> ObjectActor<H> {
    /// Creates the actor and the client that talks to it.
    ///
    /// `buffer_size` is the channel capacity; once full, client calls wait for room.
    pub fn new(buffer_size: usize, handler: H) -> (Self, ObjectClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let client = ObjectClient::new(handler.object_id(), sender);
        (Self { receiver, handler }, client)
    }

    /// Processes requests until every client is dropped, then hands the object back.
    pub async fn run(mut self) -> H {
        let object_id = self.handler.object_id();
        info!(object_id, "Object actor started");

        while let Some(msg) = self.receiver.recv().await {
            self.handle(object_id, msg);
        }

        info!(
            object_id,
            instances = self.handler.instance_ids().len(),
            "Shutdown"
        );
        self.handler
    }

    fn handle(&mut self, object_id: u16, msg: ObjectRequest) {
        match msg {
            ObjectRequest::Discover {
                instance,
                resources,
                respond_to,
            } => {
                debug!(object_id, instance, ?resources, "Discover");
                let result = self.handler.discover(instance, &resources);
                report(object_id, "Discover", &result);
                let _ = respond_to.send(result);
            }
            ObjectRequest::Read {
                instance,
                items,
                respond_to,
            } => {
                debug!(object_id, instance, requested = items.len(), "Read");
                let result = self.handler.read(instance, items);
                report(object_id, "Read", &result);
                let _ = respond_to.send(result);
            }
            ObjectRequest::Write {
                instance,
                items,
                mode,
                respond_to,
            } => {
                debug!(object_id, instance, ?mode, items = items.len(), "Write");
                let result = self.handler.write(instance, &items, mode);
                match &result {
                    Ok(()) => info!(object_id, instance, "Changed"),
                    Err(e) => warn!(object_id, instance, status = %e.status(), error = %e, "Write failed"),
                }
                let _ = respond_to.send(result);
            }
            ObjectRequest::Execute {
                instance,
                resource,
                respond_to,
            } => {
                debug!(object_id, instance, resource, "Execute");
                let result = self.handler.execute(instance, resource);
                match &result {
                    Ok(()) => info!(object_id, instance, resource, "Executed"),
                    Err(e) => warn!(object_id, instance, resource, status = %e.status(), error = %e, "Execute failed"),
                }
                let _ = respond_to.send(result);
            }
            ObjectRequest::Create {
                instance,
                items,
                respond_to,
            } => {
                debug!(object_id, instance, items = items.len(), "Create");
                let result = self.handler.create(instance, &items);
                match &result {
                    Ok(()) => info!(
                        object_id,
                        instance,
                        size = self.handler.instance_ids().len(),
                        "Created"
                    ),
                    Err(e) => warn!(object_id, instance, status = %e.status(), error = %e, "Create failed"),
                }
                let _ = respond_to.send(result);
            }
            ObjectRequest::Delete {
                instance,
                respond_to,
            } => {
                debug!(object_id, instance, "Delete");
                let result = self.handler.delete(instance);
                match &result {
                    Ok(()) => info!(
                        object_id,
                        instance,
                        size = self.handler.instance_ids().len(),
                        "Deleted"
                    ),
                    Err(e) => warn!(object_id, instance, status = %e.status(), error = %e, "Delete failed"),
                }
                let _ = respond_to.send(result);
            }
            ObjectRequest::Instances { respond_to } => {
                let _ = respond_to.send(Ok(self.handler.instance_ids()));
            }
            ObjectRequest::WithResource {
                instance,
                resource,
                apply,
                respond_to,
            } => {
                let result = self
                    .handler
                    .resource_mut(instance, resource)
                    .map(|target| {
                        debug!(
                            object_id,
                            instance,
                            resource,
                            name = target.name(),
                            unit = target.unit().symbol(),
                            "Local access"
                        );
                        apply(target)
                    });
                report(object_id, "Local access", &result);
                let _ = respond_to.send(result);
            }
        }
    }
}

fn report<T>(object_id: u16, operation: &'static str, result: &Result<T, ObjectError>) {
    match result {
        Ok(_) => debug!(object_id, operation, "ok"),
        Err(e) => warn!(object_id, operation, status = %e.status(), error = %e, "failed"),
    }
}
