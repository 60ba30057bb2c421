//! # Node Client
//!
//! The device side of an LwM2M node built on [`node_object`]: the object catalog,
//! configuration, typed clients for application code, and the dispatcher a protocol
//! engine calls into.
//!
//! - **[catalog]**: Server, Device, Battery and LPWAN object definitions.
//! - **[clients]**: `DeviceClient`, `ServerClient`, `BatteryClient`.
//! - **[engine]**: [`EngineDispatcher`](engine::EngineDispatcher), routing protocol requests by object id.
//! - **[lifecycle]**: [`NodeSystem`](lifecycle::NodeSystem) start and shutdown, tracing setup.

pub mod catalog;
pub mod clients;
pub mod config;
pub mod engine;
pub mod error;
pub mod lifecycle;

pub use config::NodeConfig;
pub use error::NodeError;
