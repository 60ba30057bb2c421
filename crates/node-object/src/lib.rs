//! # Node Object
//!
//! The data model of a device-management client: typed, access-controlled resources grouped
//! into objects, and the dispatcher that turns protocol requests (Discover, Read, Write,
//! Execute, Create, Delete) into typed resource calls and back into protocol status codes.
//!
//! ## Layers
//!
//! 1. **Resource** ([`Resource`]): one value cell. Kind tag fixed after the first value,
//!    access right fixed at construction, per-operation listener lists, read-and-clear
//!    last error.
//! 2. **Object** ([`NodeObject`]): the template instance `0` plus instances created at
//!    runtime, each a deep copy of the template. Implements [`ObjectHandler`], the capability
//!    interface a protocol engine is bound to.
//! 3. **Runtime** ([`ObjectActor`] / [`ObjectClient`]): each object lives in its own Tokio
//!    task. Protocol dispatch and application updates are both messages on that task's
//!    channel, so they never interleave.
//!
//! ## Kinds on the wire
//!
//! Payloads are one of `i32`, `bool`, `f32`, `f64`, `String`, or a map of sub-instances.
//! Protocol data arrives as loosely typed [`DataItem`]s and is decoded against the kind the
//! resource already holds; see [`wire`] for the exact rules.
//!
//! ```rust
//! use node_object::{Access, DataItem, NodeObject, Resource, Status, Unit, WireValue, WriteMode};
//!
//! let mut server = NodeObject::new(1, [
//!     Resource::new(123, Access::ReadOnly, "Short server id", Unit::None, 0),
//!     Resource::new(600, Access::ReadWrite, "Lifetime", Unit::Seconds, 1),
//!     Resource::new(0, Access::Execute, "Registration update trigger", Unit::None, 8),
//! ]).unwrap();
//!
//! // the execute-only trigger is left out of a full read
//! assert_eq!(server.read(0, &[]).unwrap().len(), 2);
//!
//! server.write(0, &[DataItem::new(1, WireValue::Integer(300))], WriteMode::Update).unwrap();
//! let err = server.write(0, &[DataItem::new(0, WireValue::Integer(1))], WriteMode::Update).unwrap_err();
//! assert_eq!(err.status(), Status::NotFound);
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers an [`ObjectClient`] from canned expectations, for testing
//! code built on top of a client without running an object.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod definition;
pub mod error;
pub mod handler;
pub mod message;
pub mod mock;
pub mod object;
pub mod resource;
pub mod status;
pub mod value;
pub mod wire;

pub use actor::ObjectActor;
pub use client::ObjectClient;
pub use client_trait::ObjectAccess;
pub use error::{CatalogError, FrameworkError, ObjectError, ResourceError};
pub use handler::ObjectHandler;
pub use message::{ObjectRequest, Response};
pub use object::{NodeObject, ObjectInstance, WriteMode, TEMPLATE_INSTANCE};
pub use resource::{Access, ListenerHandle, Operation, Resource, Unit};
pub use status::Status;
pub use value::{Kind, ResourceKind, Value};
pub use wire::{DataItem, WireCodec, WireValue};
