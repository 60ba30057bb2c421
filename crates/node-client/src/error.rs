//! # Node Errors
//!
//! [`NodeError`] is the one error type of the client side: configuration and catalog problems
//! at startup, and failures surfaced through the typed object clients afterwards.

use node_object::{CatalogError, FrameworkError, ObjectError, ResourceError, Status};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("object {0} is not registered")]
    UnknownObject(u16),
    #[error("object {object} is registered twice")]
    DuplicateObject { object: u16 },
    #[error("object {object}: {message}")]
    Communication { object: u16, message: String },
    #[error(transparent)]
    Object(ObjectError),
    #[error(transparent)]
    Resource(ResourceError),
    #[error("object task failed: {0}")]
    Task(String),
}

impl NodeError {
    pub(crate) fn from_framework(object: u16, e: FrameworkError) -> Self {
        match e {
            FrameworkError::Object(e) => NodeError::Object(e),
            FrameworkError::Resource(e) => NodeError::Resource(e),
            other => NodeError::Communication {
                object,
                message: other.to_string(),
            },
        }
    }

    /// Protocol status a server would see for this failure.
    pub fn status(&self) -> Status {
        match self {
            NodeError::Object(e) => e.status(),
            NodeError::Resource(_) | NodeError::UnknownObject(_) => Status::NotFound,
            _ => Status::InternalServerError,
        }
    }
}
