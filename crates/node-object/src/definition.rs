//! # Object Definitions
//!
//! Plain data describing an object's template instance: one [`ResourceDefinition`] per
//! resource, each with its initial value, access right, name and unit. Definitions are
//! serde types so a catalog can be written in Rust or loaded from a file.
//!
//! ```rust
//! use node_object::definition::{InitialValue, ObjectDefinition, ResourceDefinition};
//! use node_object::{Access, Unit};
//!
//! let server = ObjectDefinition::new(1, vec![
//!     ResourceDefinition::new(0, "Short server id", Access::ReadOnly, InitialValue::Integer(123)),
//!     ResourceDefinition::new(1, "Lifetime", Access::ReadWrite, InitialValue::Integer(600))
//!         .with_unit(Unit::Seconds),
//! ]);
//! let object = server.build().unwrap();
//! assert_eq!(object.instance_ids(), vec![0]);
//! ```

use crate::error::CatalogError;
use crate::object::NodeObject;
use crate::resource::{Access, Resource, Unit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InitialValue {
    Integer(i32),
    Boolean(bool),
    Float(f32),
    Double(f64),
    String(String),
    /// Sub-instances, each keyed by its own id.
    Multiple(Vec<ResourceDefinition>),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub id: u16,
    pub name: String,
    pub access: Access,
    #[serde(default)]
    pub unit: Unit,
    pub initial: InitialValue,
}

impl ResourceDefinition {
    pub fn new(id: u16, name: impl Into<String>, access: Access, initial: InitialValue) -> Self {
        Self {
            id,
            name: name.into(),
            access,
            unit: Unit::None,
            initial,
        }
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn build(&self) -> Result<Resource, CatalogError> {
        let (access, name, unit, id) = (self.access, self.name.as_str(), self.unit, self.id);
        let resource = match &self.initial {
            InitialValue::Integer(v) => Resource::new(*v, access, name, unit, id),
            InitialValue::Boolean(v) => Resource::new(*v, access, name, unit, id),
            InitialValue::Float(v) => Resource::new(*v, access, name, unit, id),
            InitialValue::Double(v) => Resource::new(*v, access, name, unit, id),
            InitialValue::String(v) => Resource::new(v.clone(), access, name, unit, id),
            InitialValue::Empty => Resource::empty(access, name, unit, id),
            InitialValue::Multiple(subs) => {
                let instances = subs
                    .iter()
                    .map(ResourceDefinition::build)
                    .collect::<Result<Vec<_>, _>>()?;
                Resource::multiple(instances, access, name, unit, id)?
            }
        };
        Ok(resource)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDefinition {
    pub id: u16,
    pub resources: Vec<ResourceDefinition>,
}

impl ObjectDefinition {
    pub fn new(id: u16, resources: Vec<ResourceDefinition>) -> Self {
        Self { id, resources }
    }

    pub fn build(&self) -> Result<NodeObject, CatalogError> {
        let resources = self
            .resources
            .iter()
            .map(ResourceDefinition::build)
            .collect::<Result<Vec<_>, _>>()?;
        NodeObject::new(self.id, resources)
    }
}
