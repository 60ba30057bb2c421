//! # Node Client
//!
//! Starts the node and plays a short server session against it through the dispatcher,
//! the same calls a protocol engine makes.
//!
//! ## 🚀 What it does
//!
//! 1. Loads [`NodeConfig`] (see `NODE_CLIENT_CONFIG`) and starts the [`NodeSystem`].
//! 2. Reads the Device object, which fires the manufacturer read listener.
//! 3. Writes the server lifetime and executes a reboot.
//! 4. Creates, reads and deletes an LPWAN instance.
//! 5. Pushes a battery reading from application code, then shuts down.

use node_client::catalog::{device, lpwan, server};
use node_client::engine::{EngineOperation, EngineRequest};
use node_client::lifecycle::{setup_tracing, NodeSystem};
use node_client::{NodeConfig, NodeError};
use node_object::{DataItem, WireValue, WriteMode};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), NodeError> {
    setup_tracing();

    let config = NodeConfig::load()?;
    info!(endpoint = %config.endpoint_name, "Starting node");
    let system = NodeSystem::start(config).await?;

    let session = tracing::info_span!("server_session");
    async {
        let requests = [
            EngineRequest::new(
                device::OBJECT_ID,
                EngineOperation::Read {
                    instance: 0,
                    items: Vec::new(),
                },
            ),
            EngineRequest::new(
                server::OBJECT_ID,
                EngineOperation::Write {
                    instance: 0,
                    items: vec![DataItem::new(server::LIFETIME, WireValue::Integer(300))],
                    mode: WriteMode::Update,
                },
            ),
            EngineRequest::new(
                device::OBJECT_ID,
                EngineOperation::Execute {
                    instance: 0,
                    resource: device::REBOOT,
                },
            ),
            EngineRequest::new(
                lpwan::OBJECT_ID,
                EngineOperation::Create {
                    instance: 1,
                    items: vec![DataItem::new(lpwan::MAC_ADDRESS, WireValue::text("02:00:00:00:00:01"))],
                },
            ),
            EngineRequest::new(
                lpwan::OBJECT_ID,
                EngineOperation::Read {
                    instance: 1,
                    items: vec![DataItem::unset(lpwan::MAC_ADDRESS)],
                },
            ),
            EngineRequest::new(lpwan::OBJECT_ID, EngineOperation::Delete { instance: 1 }),
            EngineRequest::new(lpwan::OBJECT_ID, EngineOperation::Delete { instance: 0 }),
        ];

        for request in requests {
            let path = format!("/{}", request.object_id);
            let operation = request.operation.name();
            let response = system.dispatcher.dispatch(request).await;
            if response.status.is_success() {
                info!(%path, operation, status = %response.status, items = response.items.len());
            } else {
                warn!(%path, operation, status = %response.status, "Rejected");
            }
        }
    }
    .instrument(session)
    .await;

    let battery = system.battery()?;
    battery.report_level(12).await?;
    let level = battery.level().await?;
    let too_low = battery.level_too_low().await?;
    info!(level, too_low, "Battery reported");
    drop(battery);

    let lifetime = system.server()?.lifetime().await?;
    info!(lifetime, "Server lifetime");

    system.shutdown().await?;
    info!("Node stopped");
    Ok(())
}
