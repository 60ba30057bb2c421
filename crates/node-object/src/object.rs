//! # Node Object
//!
//! A [`NodeObject`] is one protocol object class: an ordered registry of instances, each an
//! ordered map of resource id to [`Resource`]. Instance `0` is the template built from the
//! catalog; it is always present and cannot be deleted.
//!
//! ## Operations
//!
//! | operation                 | success      | failure                              |
//! |---------------------------|--------------|--------------------------------------|
//! | [`NodeObject::discover`]  | ids          | not found                            |
//! | [`NodeObject::read`]      | data items   | not found                            |
//! | [`NodeObject::write`]     | `()`         | not found, method not allowed        |
//! | [`NodeObject::execute`]   | `()`         | not found, method not allowed        |
//! | [`NodeObject::create`]    | `()`         | first write failure, method not allowed |
//! | [`NodeObject::delete`]    | `()`         | not found, method not allowed        |
//!
//! Every failure is an [`ObjectError`]; [`ObjectError::status`] gives the protocol status.
//!
//! Writes are applied item by item and stop at the first failure. Items written before the
//! failure stay written.

use crate::error::{CatalogError, ObjectError, ResourceError};
use crate::resource::{Operation, Resource};
use crate::value::Kind;
use crate::wire::{DataItem, WireCodec, WireValue};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Id of the template instance.
pub const TEMPLATE_INSTANCE: u16 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Apply each item to the existing instance.
    #[default]
    Update,
    /// Delete the instance, then create it again from the items.
    ReplaceInstance,
}

/// Runs `$body` with `$k` bound to the scalar type matching `$kind`, in priority order.
macro_rules! with_kind {
    ($kind:expr, $k:ident => $body:expr, multiple => $multiple:expr) => {
        match $kind {
            Kind::Integer => {
                type $k = i32;
                $body
            }
            Kind::Boolean => {
                type $k = bool;
                $body
            }
            Kind::Float => {
                type $k = f32;
                $body
            }
            Kind::Double => {
                type $k = f64;
                $body
            }
            Kind::String => {
                type $k = String;
                $body
            }
            Kind::Multiple => $multiple,
        }
    };
}

/// The resource set of one instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectInstance {
    resources: BTreeMap<u16, Resource>,
}

impl ObjectInstance {
    pub fn resource_ids(&self) -> impl Iterator<Item = u16> + '_ {
        self.resources.keys().copied()
    }

    pub fn resource(&self, id: u16) -> Option<&Resource> {
        self.resources.get(&id)
    }

    pub fn resource_mut(&mut self, id: u16) -> Option<&mut Resource> {
        self.resources.get_mut(&id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeObject {
    object_id: u16,
    instances: BTreeMap<u16, ObjectInstance>,
}

impl NodeObject {
    /// Builds the object with `resources` as its template instance.
    pub fn new(
        object_id: u16,
        resources: impl IntoIterator<Item = Resource>,
    ) -> Result<Self, CatalogError> {
        let mut template = ObjectInstance::default();
        for resource in resources {
            match template.resources.entry(resource.id()) {
                Entry::Occupied(_) => {
                    return Err(CatalogError::DuplicateResource {
                        object: object_id,
                        resource: resource.id(),
                    })
                }
                Entry::Vacant(slot) => {
                    slot.insert(resource);
                }
            }
        }
        let mut instances = BTreeMap::new();
        instances.insert(TEMPLATE_INSTANCE, template);
        Ok(Self {
            object_id,
            instances,
        })
    }

    pub fn object_id(&self) -> u16 {
        self.object_id
    }

    pub fn instance_ids(&self) -> Vec<u16> {
        self.instances.keys().copied().collect()
    }

    pub fn instance(&self, instance: u16) -> Result<&ObjectInstance, ObjectError> {
        self.instances
            .get(&instance)
            .ok_or(ObjectError::InstanceNotFound {
                object: self.object_id,
                instance,
            })
    }

    fn instance_mut(&mut self, instance: u16) -> Result<&mut ObjectInstance, ObjectError> {
        let object = self.object_id;
        self.instances
            .get_mut(&instance)
            .ok_or(ObjectError::InstanceNotFound { object, instance })
    }

    pub fn resource(&self, instance: u16, resource: u16) -> Option<&Resource> {
        self.instances.get(&instance)?.resource(resource)
    }

    /// Direct access for the application side. No access check is applied here.
    pub fn resource_mut(&mut self, instance: u16, resource: u16) -> Result<&mut Resource, ObjectError> {
        let object = self.object_id;
        self.instance_mut(instance)?
            .resource_mut(resource)
            .ok_or(ObjectError::ResourceNotFound {
                object,
                instance,
                resource,
            })
    }

    /// Lists resource ids. With `requested` empty, every id of the instance; otherwise the
    /// requested ids, all of which must exist.
    pub fn discover(&self, instance: u16, requested: &[u16]) -> Result<Vec<u16>, ObjectError> {
        let found = self.instance(instance)?;
        if requested.is_empty() {
            return Ok(found.resource_ids().collect());
        }
        if let Some(&missing) = requested.iter().find(|id| found.resource(**id).is_none()) {
            return Err(ObjectError::ResourceNotFound {
                object: self.object_id,
                instance,
                resource: missing,
            });
        }
        Ok(requested.to_vec())
    }

    /// Reads the requested resources. With `requested` empty, every readable resource.
    pub fn read(&mut self, instance: u16, requested: &[u16]) -> Result<Vec<DataItem>, ObjectError> {
        let items = requested.iter().map(|id| DataItem::unset(*id)).collect();
        self.read_items(instance, items)
    }

    /// Like [`NodeObject::read`], but each item may carry a [`WireValue::Multiple`] naming
    /// the sub-instances wanted from a multiple-instance resource.
    pub fn read_items(
        &mut self,
        instance: u16,
        items: Vec<DataItem>,
    ) -> Result<Vec<DataItem>, ObjectError> {
        let object = self.object_id;
        let target = self.instance_mut(instance)?;
        let items = if items.is_empty() {
            target
                .resources
                .values()
                .filter(|r| r.access().permits(Operation::Read))
                .map(|r| DataItem::unset(r.id()))
                .collect()
        } else {
            items
        };

        items
            .into_iter()
            .map(|item| -> Result<DataItem, ObjectError> {
                let resource =
                    target
                        .resources
                        .get_mut(&item.id)
                        .ok_or(ObjectError::ResourceNotFound {
                            object,
                            instance,
                            resource: item.id,
                        })?;
                Ok(DataItem::new(item.id, read_resource(resource, item.value)?))
            })
            .collect()
    }

    pub fn write(
        &mut self,
        instance: u16,
        items: &[DataItem],
        mode: WriteMode,
    ) -> Result<(), ObjectError> {
        match mode {
            WriteMode::ReplaceInstance => {
                self.delete(instance)?;
                self.create(instance, items)
            }
            WriteMode::Update => {
                let object = self.object_id;
                let target = self.instance_mut(instance)?;
                for item in items {
                    let resource = target.resources.get_mut(&item.id).ok_or(
                        ObjectError::ResourceNotFound {
                            object,
                            instance,
                            resource: item.id,
                        },
                    )?;
                    write_resource(resource, &item.value)?;
                }
                Ok(())
            }
        }
    }

    pub fn execute(&mut self, instance: u16, resource: u16) -> Result<(), ObjectError> {
        let target = self.resource_mut(instance, resource)?;
        let rejected = |source| ObjectError::Rejected {
            resource,
            operation: Operation::Execute,
            source,
        };
        let kind = target.kind().ok_or(rejected(ResourceError::ValueEmpty))?;
        with_kind!(kind, K => target.exec::<K>().map_err(rejected),
            multiple => Err(ObjectError::MethodNotAllowed(format!(
                "resource {resource} has sub-instances and cannot be executed"
            ))))
    }

    /// Registers a copy of the template under `instance`, then writes `items` into it.
    /// A failed write removes the new instance again.
    pub fn create(&mut self, instance: u16, items: &[DataItem]) -> Result<(), ObjectError> {
        if self.instances.contains_key(&instance) {
            return Err(ObjectError::MethodNotAllowed(format!(
                "instance /{}/{instance} already exists",
                self.object_id
            )));
        }
        let fresh = self.instance(TEMPLATE_INSTANCE)?.clone();
        self.instances.insert(instance, fresh);
        if let Err(e) = self.write(instance, items, WriteMode::Update) {
            self.instances.remove(&instance);
            return Err(e);
        }
        Ok(())
    }

    pub fn delete(&mut self, instance: u16) -> Result<(), ObjectError> {
        if instance == TEMPLATE_INSTANCE {
            return Err(ObjectError::MethodNotAllowed(format!(
                "template instance /{}/{TEMPLATE_INSTANCE} cannot be deleted",
                self.object_id
            )));
        }
        self.instances
            .remove(&instance)
            .map(drop)
            .ok_or(ObjectError::InstanceNotFound {
                object: self.object_id,
                instance,
            })
    }
}

fn read_resource(resource: &mut Resource, requested: WireValue) -> Result<WireValue, ObjectError> {
    let id = resource.id();
    let rejected = |source| ObjectError::Rejected {
        resource: id,
        operation: Operation::Read,
        source,
    };
    let kind = resource.kind().ok_or(rejected(ResourceError::ValueEmpty))?;
    with_kind!(kind, K => resource.read::<K>().map(|v| v.encode()).map_err(rejected),
        multiple => read_instances(resource, requested))
}

fn read_instances(resource: &mut Resource, requested: WireValue) -> Result<WireValue, ObjectError> {
    let id = resource.id();
    let instances = resource
        .instances_for(Operation::Read)
        .map_err(|source| ObjectError::Rejected {
            resource: id,
            operation: Operation::Read,
            source,
        })?;
    let wanted: Vec<u16> = match requested {
        WireValue::Multiple(subs) if !subs.is_empty() => subs.iter().map(|s| s.id).collect(),
        _ => instances.keys().copied().collect(),
    };

    let mut items = Vec::with_capacity(wanted.len());
    for sub in wanted {
        let sub_resource = instances
            .get_mut(&sub)
            .ok_or(ObjectError::SubInstanceNotFound {
                resource: id,
                instance: sub,
            })?;
        items.push(DataItem::new(sub, read_resource(sub_resource, WireValue::Unset)?));
    }
    Ok(WireValue::Multiple(items))
}

fn write_resource(resource: &mut Resource, value: &WireValue) -> Result<(), ObjectError> {
    let id = resource.id();
    let rejected = |source| ObjectError::Rejected {
        resource: id,
        operation: Operation::Write,
        source,
    };
    let kind = resource.kind().ok_or(rejected(ResourceError::ValueEmpty))?;
    with_kind!(kind, K => {
        let decoded = K::decode(value).ok_or(ObjectError::Decode { resource: id, kind })?;
        resource.write(decoded).map_err(rejected)
    }, multiple => write_instances(resource, value))
}

/// Adds sub-instances, each cloned from sub-instance 0 and then written.
fn write_instances(resource: &mut Resource, value: &WireValue) -> Result<(), ObjectError> {
    let id = resource.id();
    let WireValue::Multiple(subs) = value else {
        return Err(ObjectError::Decode {
            resource: id,
            kind: Kind::Multiple,
        });
    };
    let instances = resource
        .instances_for(Operation::Write)
        .map_err(|source| ObjectError::Rejected {
            resource: id,
            operation: Operation::Write,
            source,
        })?;

    for sub in subs {
        if instances.contains_key(&sub.id) {
            return Err(ObjectError::MethodNotAllowed(format!(
                "sub-instance {} of resource {id} already exists",
                sub.id
            )));
        }
        let mut fresh = instances
            .get(&TEMPLATE_INSTANCE)
            .ok_or(ObjectError::SubInstanceNotFound {
                resource: id,
                instance: TEMPLATE_INSTANCE,
            })?
            .clone_as(sub.id);
        write_resource(&mut fresh, &sub.value)?;
        instances.insert(sub.id, fresh);
    }
    Ok(())
}
