//! Typed wrappers around [`ObjectClient`](node_object::ObjectClient), one per catalog object.

pub mod battery_client;
pub mod device_client;
pub mod server_client;

pub use battery_client::BatteryClient;
pub use device_client::DeviceClient;
pub use server_client::ServerClient;
