//! # ObjectHandler Trait
//!
//! The capability interface the protocol side is wired against. An [`ObjectActor`](crate::ObjectActor)
//! owns one handler and forwards every request to it, so any type implementing this trait can
//! sit behind an [`ObjectClient`](crate::ObjectClient). [`NodeObject`] is the implementation
//! used in practice.

use crate::error::ObjectError;
use crate::object::{NodeObject, WriteMode};
use crate::resource::Resource;
use crate::wire::DataItem;

pub trait ObjectHandler: Send + 'static {
    /// Protocol object id, used for routing and in log fields.
    fn object_id(&self) -> u16;

    fn instance_ids(&self) -> Vec<u16>;

    fn discover(&self, instance: u16, resources: &[u16]) -> Result<Vec<u16>, ObjectError>;

    /// Items carry the resource ids to read; an empty list reads the whole instance.
    fn read(&mut self, instance: u16, items: Vec<DataItem>) -> Result<Vec<DataItem>, ObjectError>;

    fn write(&mut self, instance: u16, items: &[DataItem], mode: WriteMode) -> Result<(), ObjectError>;

    fn execute(&mut self, instance: u16, resource: u16) -> Result<(), ObjectError>;

    fn create(&mut self, instance: u16, items: &[DataItem]) -> Result<(), ObjectError>;

    fn delete(&mut self, instance: u16) -> Result<(), ObjectError>;

    /// Unguarded access for application code running inside the object task.
    fn resource_mut(&mut self, instance: u16, resource: u16) -> Result<&mut Resource, ObjectError>;
}

impl ObjectHandler for NodeObject {
    fn object_id(&self) -> u16 {
        NodeObject::object_id(self)
    }

    fn instance_ids(&self) -> Vec<u16> {
        NodeObject::instance_ids(self)
    }

    fn discover(&self, instance: u16, resources: &[u16]) -> Result<Vec<u16>, ObjectError> {
        NodeObject::discover(self, instance, resources)
    }

    fn read(&mut self, instance: u16, items: Vec<DataItem>) -> Result<Vec<DataItem>, ObjectError> {
        self.read_items(instance, items)
    }

    fn write(&mut self, instance: u16, items: &[DataItem], mode: WriteMode) -> Result<(), ObjectError> {
        NodeObject::write(self, instance, items, mode)
    }

    fn execute(&mut self, instance: u16, resource: u16) -> Result<(), ObjectError> {
        NodeObject::execute(self, instance, resource)
    }

    fn create(&mut self, instance: u16, items: &[DataItem]) -> Result<(), ObjectError> {
        NodeObject::create(self, instance, items)
    }

    fn delete(&mut self, instance: u16) -> Result<(), ObjectError> {
        NodeObject::delete(self, instance)
    }

    fn resource_mut(&mut self, instance: u16, resource: u16) -> Result<&mut Resource, ObjectError> {
        NodeObject::resource_mut(self, instance, resource)
    }
}
