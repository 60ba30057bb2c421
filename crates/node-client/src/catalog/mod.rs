//! # Object Catalog
//!
//! The objects this node exposes, as [`ObjectDefinition`]s. Each submodule owns one object:
//! its id, the ids of the resources application code touches, and the template definition.
//!
//! | object | id | module |
//! |--------|----|--------|
//! | LwM2M Server | 1 | [`server`] |
//! | Device | 3 | [`device`] |
//! | Battery | 3411 | [`battery`] |
//! | LPWAN communication | 3412 | [`lpwan`] |
//!
//! A JSON file with the same shape can replace the built-in catalog; see
//! [`NodeConfig::catalog`](crate::config::NodeConfig::catalog).

pub mod battery;
pub mod device;
pub mod lpwan;
pub mod server;

use crate::error::NodeError;
use node_object::definition::{InitialValue, ObjectDefinition};
use node_object::{CatalogError, NodeObject};
use std::path::Path;

/// The built-in catalog.
pub fn definitions() -> Vec<ObjectDefinition> {
    vec![
        server::definition(),
        device::definition(),
        battery::definition(),
        lpwan::definition(),
    ]
}

/// Reads a catalog from a JSON array of object definitions.
pub fn load(path: &Path) -> Result<Vec<ObjectDefinition>, NodeError> {
    let text = std::fs::read_to_string(path).map_err(|source| NodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| NodeError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn build(definitions: &[ObjectDefinition]) -> Result<Vec<NodeObject>, CatalogError> {
    definitions.iter().map(ObjectDefinition::build).collect()
}

fn int(value: i32) -> InitialValue {
    InitialValue::Integer(value)
}

fn float(value: f32) -> InitialValue {
    InitialValue::Float(value)
}

fn flag(value: bool) -> InitialValue {
    InitialValue::Boolean(value)
}

fn text(value: &str) -> InitialValue {
    InitialValue::String(value.to_owned())
}
