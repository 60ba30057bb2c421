//! # Object Messages
//!
//! Requests sent from an [`ObjectClient`](crate::ObjectClient) to the
//! [`ObjectActor`](crate::ObjectActor) that owns the object.
//!
//! The first six variants are the protocol operations. `WithResource` carries a closure that
//! runs against one resource inside the object task, which is how application code pushes
//! local state without racing protocol requests.

use crate::error::ObjectError;
use crate::object::WriteMode;
use crate::resource::Resource;
use crate::wire::DataItem;
use tokio::sync::oneshot;

/// One-shot response channel used by the object task.
pub type Response<T> = oneshot::Sender<Result<T, ObjectError>>;

/// Work scheduled on a single resource.
pub type ResourceFn = Box<dyn FnOnce(&mut Resource) + Send>;

pub enum ObjectRequest {
    Discover {
        instance: u16,
        resources: Vec<u16>,
        respond_to: Response<Vec<u16>>,
    },
    Read {
        instance: u16,
        items: Vec<DataItem>,
        respond_to: Response<Vec<DataItem>>,
    },
    Write {
        instance: u16,
        items: Vec<DataItem>,
        mode: WriteMode,
        respond_to: Response<()>,
    },
    Execute {
        instance: u16,
        resource: u16,
        respond_to: Response<()>,
    },
    Create {
        instance: u16,
        items: Vec<DataItem>,
        respond_to: Response<()>,
    },
    Delete {
        instance: u16,
        respond_to: Response<()>,
    },
    Instances {
        respond_to: Response<Vec<u16>>,
    },
    WithResource {
        instance: u16,
        resource: u16,
        apply: ResourceFn,
        respond_to: Response<()>,
    },
}

impl ObjectRequest {
    /// Short name for logs and mock diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ObjectRequest::Discover { .. } => "Discover",
            ObjectRequest::Read { .. } => "Read",
            ObjectRequest::Write { .. } => "Write",
            ObjectRequest::Execute { .. } => "Execute",
            ObjectRequest::Create { .. } => "Create",
            ObjectRequest::Delete { .. } => "Delete",
            ObjectRequest::Instances { .. } => "Instances",
            ObjectRequest::WithResource { .. } => "WithResource",
        }
    }
}
