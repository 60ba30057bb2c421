//! # Resource
//!
//! A [`Resource`] is one named, typed, access-controlled value cell. It is the leaf of the
//! object model: objects own resources, resources own their payload and their listeners.
//!
//! ## Guarded vs privileged access
//!
//! | operation            | checks (in order)              | fires listeners |
//! |----------------------|--------------------------------|-----------------|
//! | [`Resource::read`]   | empty, kind, access            | read            |
//! | [`Resource::write`]  | access, kind (creates if empty) | write          |
//! | [`Resource::exec`]   | empty, kind, access            | execute         |
//! | `bind_on_*`          | access, empty, kind            | -               |
//! | `unbind_on_*`        | access, empty, kind, list      | -               |
//! | [`Resource::get_value`] / [`Resource::set_value`] | empty/kind only | - |
//!
//! Guarded operations are what the protocol side goes through. The privileged pair is for
//! the application pushing local state (sensor levels, counters) and for the object layer
//! assembling multi-instance views.
//!
//! ## Errors
//!
//! Every failing call returns `Err` **and** records the error in a last-error slot. The slot
//! is read-and-clear:
//!
//! ```rust
//! use node_object::{Access, Resource, ResourceError, Unit};
//!
//! let mut lifetime = Resource::new(600, Access::ReadOnly, "Lifetime", Unit::Seconds, 1);
//! assert!(lifetime.write(300).is_err());
//! assert!(matches!(lifetime.take_error(), Some(ResourceError::BadAccess { .. })));
//! assert_eq!(lifetime.take_error(), None);
//! ```
//!
//! ## Copy & move
//!
//! `Clone` deep-copies the payload (nested sub-resources included) and gives the copy its own
//! listener lists; the error slot starts clear. [`Resource::take`] moves the payload and the
//! listener lists out, leaving an empty resource with the same metadata behind.

mod listener;
mod meta;

pub use listener::ListenerHandle;
pub use meta::{Access, Operation, Unit};

use crate::error::{CatalogError, ResourceError};
use crate::value::{Kind, ResourceKind, Value};
use listener::{Callback, Listeners};
use paste::paste;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug)]
pub struct Resource {
    id: u16,
    name: String,
    unit: Unit,
    access: Access,
    value: Option<Value>,
    on_read: Option<Listeners>,
    on_write: Option<Listeners>,
    on_exec: Option<Listeners>,
    last_error: Option<ResourceError>,
}

macro_rules! observer_methods {
    ($($op:ident => $operation:ident),* $(,)?) => {
        paste! {
            $(
                #[doc = "Registers `listener` for successful " $op " operations."]
                ///
                /// Fails when the access right forbids the operation, when the resource is
                /// empty, or when `K` is not the stored kind.
                pub fn [<bind_on_ $op>]<K, F>(&mut self, listener: F) -> Result<ListenerHandle, ResourceError>
                where
                    K: ResourceKind,
                    F: Fn(&K) + Send + Sync + 'static,
                {
                    self.bind::<K, F>(Operation::$operation, listener)
                }

                #[doc = "Removes a listener registered with `bind_on_" $op "`."]
                pub fn [<unbind_on_ $op>]<K: ResourceKind>(&mut self, handle: ListenerHandle) -> Result<(), ResourceError> {
                    self.unbind::<K>(Operation::$operation, handle)
                }
            )*
        }
    };
}

impl Resource {
    pub fn new<K: ResourceKind>(
        value: K,
        access: Access,
        name: impl Into<String>,
        unit: Unit,
        id: u16,
    ) -> Self {
        Self::with_value(Some(value.into_value()), access, name.into(), unit, id)
    }

    /// A resource with sub-instances keyed by their own ids, which must be unique.
    pub fn multiple(
        instances: impl IntoIterator<Item = Resource>,
        access: Access,
        name: impl Into<String>,
        unit: Unit,
        id: u16,
    ) -> Result<Self, CatalogError> {
        let mut subs = BTreeMap::new();
        for sub in instances {
            match subs.entry(sub.id) {
                Entry::Occupied(_) => {
                    return Err(CatalogError::DuplicateSubInstance {
                        resource: id,
                        instance: sub.id,
                    })
                }
                Entry::Vacant(slot) => {
                    slot.insert(sub);
                }
            }
        }
        Ok(Self::with_value(
            Some(Value::Multiple(subs)),
            access,
            name.into(),
            unit,
            id,
        ))
    }

    /// A resource with no payload yet. The first write fixes its kind.
    pub fn empty(access: Access, name: impl Into<String>, unit: Unit, id: u16) -> Self {
        Self::with_value(None, access, name.into(), unit, id)
    }

    fn with_value(value: Option<Value>, access: Access, name: String, unit: Unit, id: u16) -> Self {
        Self {
            id,
            name,
            unit,
            access,
            value,
            on_read: None,
            on_write: None,
            on_exec: None,
            last_error: None,
        }
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Stored kind. An empty resource records [`ResourceError::ValueEmpty`] and yields `None`.
    pub fn kind(&mut self) -> Option<Kind> {
        match self.value.as_ref().map(Value::kind) {
            Some(kind) => Some(kind),
            None => {
                self.last_error = Some(ResourceError::ValueEmpty);
                None
            }
        }
    }

    /// Returns and clears the last recorded error.
    pub fn take_error(&mut self) -> Option<ResourceError> {
        self.last_error.take()
    }

    pub fn listener_count(&self, operation: Operation) -> usize {
        self.listeners(operation).as_ref().map_or(0, Listeners::len)
    }

    /// Privileged typed access: no access check, no listeners.
    pub fn get_value<K: ResourceKind>(&mut self) -> Result<&K, ResourceError> {
        self.expect_kind::<K>()?;
        self.value
            .as_ref()
            .and_then(K::from_value)
            .ok_or(ResourceError::ValueEmpty)
    }

    /// Privileged store: no access check, no listeners. Fixes the kind on an empty resource.
    pub fn set_value<K: ResourceKind>(&mut self, value: K) -> Result<(), ResourceError> {
        self.store(value)
    }

    pub fn read<K: ResourceKind>(&mut self) -> Result<&K, ResourceError> {
        self.expect_kind::<K>()?;
        self.check_access(Operation::Read)?;
        if let (Some(listeners), Some(value)) = (&self.on_read, &self.value) {
            listeners.notify(value);
        }
        self.value
            .as_ref()
            .and_then(K::from_value)
            .ok_or(ResourceError::ValueEmpty)
    }

    pub fn write<K: ResourceKind>(&mut self, value: K) -> Result<(), ResourceError> {
        self.check_access(Operation::Write)?;
        self.store(value)?;
        if let (Some(listeners), Some(value)) = (&self.on_write, &self.value) {
            listeners.notify(value);
        }
        Ok(())
    }

    pub fn exec<K: ResourceKind>(&mut self) -> Result<(), ResourceError> {
        self.expect_kind::<K>()?;
        self.check_access(Operation::Execute)?;
        if let (Some(listeners), Some(value)) = (&self.on_exec, &self.value) {
            listeners.notify(value);
        }
        Ok(())
    }

    observer_methods! {
        read => Read,
        write => Write,
        exec => Execute,
    }

    /// Privileged access to the sub-instances of a multiple-instance resource.
    pub fn instances(&mut self) -> Result<&mut BTreeMap<u16, Resource>, ResourceError> {
        match self.value.as_ref().map(Value::kind) {
            None => self.fail(ResourceError::ValueEmpty),
            Some(Kind::Multiple) => match &mut self.value {
                Some(Value::Multiple(instances)) => Ok(instances),
                _ => Err(ResourceError::ValueEmpty),
            },
            Some(stored) => self.fail(ResourceError::TypeMismatch {
                stored,
                requested: Kind::Multiple,
            }),
        }
    }

    /// Sub-instances for a protocol operation: [`Resource::instances`] plus the access check.
    pub fn instances_for(
        &mut self,
        operation: Operation,
    ) -> Result<&mut BTreeMap<u16, Resource>, ResourceError> {
        if let Some(Kind::Multiple) = self.value.as_ref().map(Value::kind) {
            self.check_access(operation)?;
        }
        self.instances()
    }

    /// Moves payload and listeners out, leaving an empty resource with the same metadata.
    pub fn take(&mut self) -> Resource {
        Resource {
            id: self.id,
            name: self.name.clone(),
            unit: self.unit,
            access: self.access,
            value: self.value.take(),
            on_read: self.on_read.take(),
            on_write: self.on_write.take(),
            on_exec: self.on_exec.take(),
            last_error: self.last_error.take(),
        }
    }

    /// Deep copy registered under another id, used when a sub-instance is cloned from its template.
    pub(crate) fn clone_as(&self, id: u16) -> Resource {
        let mut copy = self.clone();
        copy.id = id;
        copy
    }

    fn fail<T>(&mut self, error: ResourceError) -> Result<T, ResourceError> {
        self.last_error = Some(error);
        Err(error)
    }

    fn expect_kind<K: ResourceKind>(&mut self) -> Result<(), ResourceError> {
        match self.value.as_ref().map(Value::kind) {
            None => self.fail(ResourceError::ValueEmpty),
            Some(stored) if stored != K::KIND => self.fail(ResourceError::TypeMismatch {
                stored,
                requested: K::KIND,
            }),
            Some(_) => Ok(()),
        }
    }

    fn check_access(&mut self, operation: Operation) -> Result<(), ResourceError> {
        if self.access.permits(operation) {
            Ok(())
        } else {
            self.fail(ResourceError::BadAccess {
                operation,
                access: self.access,
            })
        }
    }

    fn store<K: ResourceKind>(&mut self, value: K) -> Result<(), ResourceError> {
        if let Some(stored) = self.value.as_ref().map(Value::kind) {
            if stored != K::KIND {
                return self.fail(ResourceError::TypeMismatch {
                    stored,
                    requested: K::KIND,
                });
            }
        }
        self.value = Some(value.into_value());
        Ok(())
    }

    fn listeners(&self, operation: Operation) -> &Option<Listeners> {
        match operation {
            Operation::Read => &self.on_read,
            Operation::Write => &self.on_write,
            Operation::Execute => &self.on_exec,
        }
    }

    fn listeners_mut(&mut self, operation: Operation) -> &mut Option<Listeners> {
        match operation {
            Operation::Read => &mut self.on_read,
            Operation::Write => &mut self.on_write,
            Operation::Execute => &mut self.on_exec,
        }
    }

    fn bind<K, F>(&mut self, operation: Operation, listener: F) -> Result<ListenerHandle, ResourceError>
    where
        K: ResourceKind,
        F: Fn(&K) + Send + Sync + 'static,
    {
        self.check_access(operation)?;
        self.expect_kind::<K>()?;
        let callback: Callback = Arc::new(move |value: &Value| {
            if let Some(typed) = K::from_value(value) {
                listener(typed);
            }
        });
        Ok(self
            .listeners_mut(operation)
            .get_or_insert_with(Listeners::default)
            .add(callback))
    }

    fn unbind<K: ResourceKind>(
        &mut self,
        operation: Operation,
        handle: ListenerHandle,
    ) -> Result<(), ResourceError> {
        self.check_access(operation)?;
        self.expect_kind::<K>()?;
        let removed = self
            .listeners_mut(operation)
            .as_mut()
            .map(|listeners| listeners.remove(handle));
        match removed {
            Some(_) => Ok(()),
            None => self.fail(ResourceError::NoCallbackObject { operation }),
        }
    }
}

impl Default for Resource {
    /// Empty, read-only, id 0. A placeholder, never exchanged with the protocol engine.
    fn default() -> Self {
        Self::with_value(None, Access::ReadOnly, String::new(), Unit::None, 0)
    }
}

impl Clone for Resource {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            unit: self.unit,
            access: self.access,
            value: self.value.clone(),
            on_read: self.on_read.clone(),
            on_write: self.on_write.clone(),
            on_exec: self.on_exec.clone(),
            last_error: None,
        }
    }
}

/// Compares metadata and payload. Listeners and the error slot are not part of equality.
impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.unit == other.unit
            && self.access == other.access
            && self.value == other.value
    }
}
