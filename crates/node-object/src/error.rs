//! # Errors
//!
//! Three layers of failure live here:
//!
//! - [`ResourceError`] is local to one [`Resource`](crate::Resource). It is returned by every
//!   guarded operation *and* recorded in the resource's last-error slot, so a caller that
//!   ignored the `Result` can still poll it with [`Resource::take_error`](crate::Resource::take_error).
//! - [`ObjectError`] is what an object operation aborts with. Each variant maps onto exactly
//!   one protocol [`Status`] through [`ObjectError::status`].
//! - [`FrameworkError`] is what an [`ObjectClient`](crate::ObjectClient) call can fail with: the
//!   object task went away, or the request itself failed.
//!
//! [`CatalogError`] only shows up while building objects from definitions.

use crate::resource::{Access, Operation};
use crate::status::Status;
use crate::value::Kind;

/// Failure of a single resource operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("resource holds no value")]
    ValueEmpty,
    #[error("resource holds {stored} but {requested} was requested")]
    TypeMismatch { stored: Kind, requested: Kind },
    #[error("{operation} is not allowed on a {access} resource")]
    BadAccess { operation: Operation, access: Access },
    #[error("no {operation} listener was ever registered")]
    NoCallbackObject { operation: Operation },
}

/// Terminal failure of an object operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObjectError {
    #[error("instance /{object}/{instance} not found")]
    InstanceNotFound { object: u16, instance: u16 },
    #[error("resource /{object}/{instance}/{resource} not found")]
    ResourceNotFound {
        object: u16,
        instance: u16,
        resource: u16,
    },
    #[error("sub-instance {instance} of resource {resource} not found")]
    SubInstanceNotFound { resource: u16, instance: u16 },
    #[error("{operation} rejected by resource {resource}")]
    Rejected {
        resource: u16,
        operation: Operation,
        #[source]
        source: ResourceError,
    },
    #[error("value for resource {resource} does not decode as {kind}")]
    Decode { resource: u16, kind: Kind },
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),
}

impl ObjectError {
    /// Protocol status reported for this failure.
    pub fn status(&self) -> Status {
        match self {
            ObjectError::InstanceNotFound { .. }
            | ObjectError::ResourceNotFound { .. }
            | ObjectError::SubInstanceNotFound { .. }
            | ObjectError::Decode { .. } => Status::NotFound,
            ObjectError::Rejected {
                operation: Operation::Execute,
                ..
            } => Status::MethodNotAllowed,
            ObjectError::Rejected { .. } => Status::NotFound,
            ObjectError::MethodNotAllowed(_) => Status::MethodNotAllowed,
        }
    }

    /// The resource-level cause, if the object operation failed inside a resource.
    pub fn resource_error(&self) -> Option<ResourceError> {
        match self {
            ObjectError::Rejected { source, .. } => Some(*source),
            _ => None,
        }
    }
}

/// Invalid object or resource definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("object {object} defines resource {resource} twice")]
    DuplicateResource { object: u16, resource: u16 },
    #[error("resource {resource} defines sub-instance {instance} twice")]
    DuplicateSubInstance { resource: u16, instance: u16 },
}

/// Errors that can occur when talking to an object task.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Object actor closed")]
    ActorClosed,
    #[error("Object actor dropped response channel")]
    ActorDropped,
    #[error(transparent)]
    Object(#[from] ObjectError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
}
