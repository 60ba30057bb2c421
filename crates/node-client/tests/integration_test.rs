use node_client::catalog::{battery, device, lpwan, server};
use node_client::engine::{EngineOperation, EngineRequest, EngineResponse};
use node_client::lifecycle::NodeSystem;
use node_client::{NodeConfig, NodeError};
use node_object::{DataItem, ObjectAccess, Status, WireValue, WriteMode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

async fn start() -> NodeSystem {
    NodeSystem::start(NodeConfig::default()).await.unwrap()
}

fn read(object_id: u16, instance: u16, ids: &[u16]) -> EngineRequest {
    EngineRequest::new(
        object_id,
        EngineOperation::Read {
            instance,
            items: ids.iter().copied().map(DataItem::unset).collect(),
        },
    )
}

fn write(object_id: u16, instance: u16, items: Vec<DataItem>) -> EngineRequest {
    EngineRequest::new(
        object_id,
        EngineOperation::Write {
            instance,
            items,
            mode: WriteMode::Update,
        },
    )
}

fn execute(object_id: u16, resource: u16) -> EngineRequest {
    EngineRequest::new(object_id, EngineOperation::Execute { instance: 0, resource })
}

#[tokio::test]
async fn builtin_catalog_is_registered() {
    let system = start().await;
    assert_eq!(system.dispatcher.object_ids(), vec![1, 3, 3411, 3412]);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn server_reads_device_identity() {
    let system = start().await;

    let response = system
        .dispatcher
        .dispatch(read(device::OBJECT_ID, 0, &[device::MANUFACTURER, device::SERIAL_NUMBER]))
        .await;
    assert_eq!(response.status, Status::Content);
    assert_eq!(
        response.items,
        vec![
            DataItem::new(device::MANUFACTURER, WireValue::text("OMA")),
            DataItem::new(device::SERIAL_NUMBER, WireValue::text("345000123")),
        ]
    );

    // Whole-instance read skips the execute-only resources.
    let all = system.dispatcher.dispatch(read(device::OBJECT_ID, 0, &[])).await;
    let ids: Vec<u16> = all.items.iter().map(|item| item.id).collect();
    assert!(ids.contains(&device::MEMORY_TOTAL));
    assert!(!ids.contains(&device::REBOOT));
    assert!(!ids.contains(&device::FACTORY_RESET));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn protocol_reads_fire_application_listeners() {
    let system = start().await;
    let reads = Arc::new(AtomicUsize::new(0));
    let counter = reads.clone();
    let device_client = system.device().unwrap();
    device_client
        .inner()
        .bind_on_read::<String, _>(0, device::MANUFACTURER, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .unwrap();

    system
        .dispatcher
        .dispatch(read(device::OBJECT_ID, 0, &[device::MANUFACTURER]))
        .await;
    assert_eq!(device_client.manufacturer().await.unwrap(), "OMA");
    assert_eq!(reads.load(Ordering::SeqCst), 2);

    drop(device_client);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn access_rights_decide_write_and_execute_status() {
    let system = start().await;
    let dispatcher = &system.dispatcher;

    let changed = dispatcher
        .dispatch(write(
            server::OBJECT_ID,
            0,
            vec![DataItem::new(server::LIFETIME, WireValue::Integer(300))],
        ))
        .await;
    assert_eq!(changed, EngineResponse::status(Status::Changed));
    assert_eq!(system.server().unwrap().lifetime().await.unwrap(), 300);

    let read_only = dispatcher
        .dispatch(write(
            server::OBJECT_ID,
            0,
            vec![DataItem::new(server::SHORT_SERVER_ID, WireValue::Integer(1))],
        ))
        .await;
    assert_eq!(read_only.status, Status::NotFound);

    let not_executable = dispatcher.dispatch(execute(server::OBJECT_ID, server::LIFETIME)).await;
    assert_eq!(not_executable.status, Status::MethodNotAllowed);

    let trigger = dispatcher
        .dispatch(execute(server::OBJECT_ID, server::REGISTRATION_UPDATE_TRIGGER))
        .await;
    assert_eq!(trigger.status, Status::Changed);

    let missing = dispatcher.dispatch(execute(server::OBJECT_ID, 99)).await;
    assert_eq!(missing.status, Status::NotFound);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn undecodable_write_is_not_found() {
    let system = start().await;
    let response = system
        .dispatcher
        .dispatch(write(
            server::OBJECT_ID,
            0,
            vec![DataItem::new(server::LIFETIME, WireValue::text("soon"))],
        ))
        .await;
    assert_eq!(response.status, Status::NotFound);
    assert_eq!(system.server().unwrap().lifetime().await.unwrap(), 600);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn instances_are_created_and_deleted() {
    let system = start().await;
    let dispatcher = &system.dispatcher;

    let created = dispatcher
        .dispatch(EngineRequest::new(
            lpwan::OBJECT_ID,
            EngineOperation::Create {
                instance: 1,
                items: vec![DataItem::new(lpwan::MAC_ADDRESS, WireValue::text("02:00:00:00:00:01"))],
            },
        ))
        .await;
    assert_eq!(created.status, Status::Created);

    let mac = dispatcher.dispatch(read(lpwan::OBJECT_ID, 1, &[lpwan::MAC_ADDRESS])).await;
    assert_eq!(mac.items, vec![DataItem::new(lpwan::MAC_ADDRESS, WireValue::text("02:00:00:00:00:01"))]);
    let template_mac = dispatcher.dispatch(read(lpwan::OBJECT_ID, 0, &[lpwan::MAC_ADDRESS])).await;
    assert_eq!(template_mac.items, vec![DataItem::new(lpwan::MAC_ADDRESS, WireValue::text(""))]);

    let again = dispatcher
        .dispatch(EngineRequest::new(
            lpwan::OBJECT_ID,
            EngineOperation::Create {
                instance: 1,
                items: Vec::new(),
            },
        ))
        .await;
    assert_eq!(again.status, Status::MethodNotAllowed);

    let delete = |instance| EngineRequest::new(lpwan::OBJECT_ID, EngineOperation::Delete { instance });
    assert_eq!(dispatcher.dispatch(delete(1)).await.status, Status::Deleted);
    assert_eq!(dispatcher.dispatch(delete(1)).await.status, Status::NotFound);
    assert_eq!(dispatcher.dispatch(delete(0)).await.status, Status::MethodNotAllowed);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn failed_create_leaves_no_instance() {
    let system = start().await;
    let response = system
        .dispatcher
        .dispatch(EngineRequest::new(
            battery::OBJECT_ID,
            EngineOperation::Create {
                instance: 2,
                items: vec![DataItem::new(battery::LEVEL, WireValue::Integer(50))],
            },
        ))
        .await;
    assert_eq!(response.status, Status::NotFound);

    let ids = system.battery().unwrap().inner().instance_ids().await.unwrap();
    assert_eq!(ids, vec![0]);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn multiple_instance_resources_read_and_grow() {
    let system = start().await;
    let dispatcher = &system.dispatcher;

    let sources = dispatcher
        .dispatch(read(device::OBJECT_ID, 0, &[device::AVAILABLE_POWER_SOURCES]))
        .await;
    assert_eq!(
        sources.items,
        vec![DataItem::new(
            device::AVAILABLE_POWER_SOURCES,
            WireValue::Multiple(vec![
                DataItem::new(0, WireValue::Integer(0)),
                DataItem::new(1, WireValue::Integer(1)),
                DataItem::new(2, WireValue::Integer(2)),
            ]),
        )]
    );

    let added = dispatcher
        .dispatch(write(
            lpwan::OBJECT_ID,
            0,
            vec![DataItem::new(
                lpwan::IPV4_ADDRESS,
                WireValue::Multiple(vec![DataItem::new(3, WireValue::text("10.0.0.7"))]),
            )],
        ))
        .await;
    assert_eq!(added.status, Status::Changed);

    let picked = dispatcher
        .dispatch(EngineRequest::new(
            lpwan::OBJECT_ID,
            EngineOperation::Read {
                instance: 0,
                items: vec![DataItem::new(
                    lpwan::IPV4_ADDRESS,
                    WireValue::Multiple(vec![DataItem::unset(0), DataItem::unset(3)]),
                )],
            },
        ))
        .await;
    assert_eq!(
        picked.items,
        vec![DataItem::new(
            lpwan::IPV4_ADDRESS,
            WireValue::Multiple(vec![
                DataItem::new(0, WireValue::text("192.168.0.1")),
                DataItem::new(3, WireValue::text("10.0.0.7")),
            ]),
        )]
    );

    let existing = dispatcher
        .dispatch(write(
            lpwan::OBJECT_ID,
            0,
            vec![DataItem::new(
                lpwan::IPV4_ADDRESS,
                WireValue::Multiple(vec![DataItem::new(0, WireValue::text("1.1.1.1"))]),
            )],
        ))
        .await;
    assert_eq!(existing.status, Status::MethodNotAllowed);

    // Sub-instances are written through their container; the read-only list refuses.
    let read_only = dispatcher
        .dispatch(write(
            device::OBJECT_ID,
            0,
            vec![DataItem::new(
                device::AVAILABLE_POWER_SOURCES,
                WireValue::Multiple(vec![DataItem::new(5, WireValue::Integer(5))]),
            )],
        ))
        .await;
    assert_eq!(read_only.status, Status::NotFound);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn discover_lists_instance_resources() {
    let system = start().await;
    let response = system
        .dispatcher
        .dispatch(EngineRequest::new(
            server::OBJECT_ID,
            EngineOperation::Discover {
                instance: 0,
                resources: Vec::new(),
            },
        ))
        .await;
    assert_eq!(response.status, Status::Content);
    assert_eq!(response.ids, (0..=8).collect::<Vec<u16>>());

    let missing_instance = system
        .dispatcher
        .dispatch(EngineRequest::new(
            server::OBJECT_ID,
            EngineOperation::Discover {
                instance: 4,
                resources: Vec::new(),
            },
        ))
        .await;
    assert_eq!(missing_instance.status, Status::NotFound);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn unknown_object_is_not_found() {
    let system = start().await;
    let response = system.dispatcher.dispatch(read(5, 0, &[])).await;
    assert_eq!(response, EngineResponse::status(Status::NotFound));
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn configured_lifetime_seeds_server_object() {
    let config = NodeConfig {
        lifetime: 120,
        ..NodeConfig::default()
    };
    let system = NodeSystem::start(config).await.unwrap();
    assert_eq!(system.server().unwrap().lifetime().await.unwrap(), 120);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn catalog_file_replaces_builtin_objects() {
    let path = std::env::temp_dir().join(format!("node-catalog-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"[{
            "id": 42,
            "resources": [
                { "id": 0, "name": "Counter", "access": "read_write",
                  "initial": { "kind": "integer", "value": 7 } }
            ]
        }]"#,
    )
    .unwrap();
    let config = NodeConfig {
        catalog: Some(path.clone()),
        ..NodeConfig::default()
    };
    let system = NodeSystem::start(config).await.unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(system.dispatcher.object_ids(), vec![42]);
    assert!(matches!(system.device(), Err(NodeError::UnknownObject(3))));
    let counter = system.dispatcher.dispatch(read(42, 0, &[0])).await;
    assert_eq!(counter.items, vec![DataItem::new(0, WireValue::Integer(7))]);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn shutdown_returns_final_object_state() {
    let system = start().await;
    system
        .dispatcher
        .dispatch(write(
            battery::OBJECT_ID,
            0,
            vec![DataItem::new(battery::LOW_THRESHOLD, WireValue::Integer(20))],
        ))
        .await;

    let battery_client = system.battery().unwrap();
    battery_client.report_level(12).await.unwrap();
    assert!(battery_client.level_too_low().await.unwrap());
    drop(battery_client);

    let mut objects = system.shutdown().await.unwrap();
    let battery_object = objects
        .iter_mut()
        .find(|o| o.object_id() == battery::OBJECT_ID)
        .unwrap();
    let level = battery_object.resource_mut(0, battery::LEVEL).unwrap();
    assert_eq!(level.get_value::<i32>(), Ok(&12));
}
