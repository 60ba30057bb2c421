//! # Node Lifecycle
//!
//! Startup and shutdown of the whole node.
//!
//! ## Startup
//!
//! [`NodeSystem::start`] turns configuration into running objects:
//!
//! 1. Pick the catalog: the built-in one, or the JSON file named by `catalog`.
//! 2. Seed configured values into the definitions (the server lifetime).
//! 3. Build a [`NodeObject`](node_object::NodeObject) per definition and spawn an
//!    [`ObjectActor`](node_object::ObjectActor) for each.
//! 4. Register every object client with the [`EngineDispatcher`](crate::engine::EngineDispatcher).
//! 5. Install application listeners, such as the manufacturer read log.
//!
//! ## Shutdown
//!
//! Every object task stops once all clients for it are gone. [`NodeSystem::shutdown`]
//! drops the dispatcher, which owns the system's clients, then awaits each task and
//! returns the final objects. Typed clients handed out earlier keep their object alive
//! until they are dropped too.
//!
//! ## Tracing
//!
//! [`setup_tracing`] installs the subscriber once, from `main`:
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle and protocol outcomes
//! RUST_LOG=debug cargo run     # every request
//! ```

pub mod node_system;
pub mod tracing;

pub use self::node_system::NodeSystem;
pub use self::tracing::setup_tracing;
