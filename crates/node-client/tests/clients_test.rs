use node_client::catalog::{battery, device, server};
use node_client::clients::{BatteryClient, DeviceClient, ServerClient};
use node_client::NodeError;
use node_object::mock::MockClient;
use node_object::{Access, ObjectAccess, ObjectError, Resource, ResourceError, Status, Unit};

/// Typed clients against a mocked object: no catalog, no real object task.
#[tokio::test]
async fn device_client_executes_reboot() {
    let mut mock = MockClient::new(device::OBJECT_ID);
    mock.expect_execute(0, device::REBOOT).return_ok(());
    mock.expect_execute(0, device::FACTORY_RESET)
        .return_err(ObjectError::MethodNotAllowed("factory reset disabled".into()));

    let client = DeviceClient::new(mock.client());
    client.reboot().await.unwrap();

    let err = client.factory_reset().await.unwrap_err();
    assert!(matches!(err, NodeError::Object(ObjectError::MethodNotAllowed(_))));
    assert_eq!(err.status(), Status::MethodNotAllowed);
    mock.verify();
}

#[tokio::test]
async fn device_client_reads_manufacturer_fixture() {
    let mut mock = MockClient::new(device::OBJECT_ID);
    mock.expect_resource(0, device::MANUFACTURER).return_ok(Resource::new(
        "ACME".to_string(),
        Access::ReadOnly,
        "Manufacturer",
        Unit::None,
        device::MANUFACTURER,
    ));

    let client = DeviceClient::new(mock.client());
    assert_eq!(client.manufacturer().await.unwrap(), "ACME");
    mock.verify();
}

#[tokio::test]
async fn server_client_surfaces_resource_errors() {
    let mut mock = MockClient::new(server::OBJECT_ID);
    mock.expect_resource(0, server::LIFETIME).return_ok(Resource::new(
        600,
        Access::WriteOnly,
        "Lifetime",
        Unit::Seconds,
        server::LIFETIME,
    ));

    let client = ServerClient::new(mock.client());
    let err = client.lifetime().await.unwrap_err();
    assert!(matches!(err, NodeError::Resource(ResourceError::BadAccess { .. })));
    mock.verify();
}

#[tokio::test]
async fn battery_client_compares_against_threshold() {
    let mut mock = MockClient::new(battery::OBJECT_ID);
    mock.expect_resource(0, battery::LOW_THRESHOLD).return_ok(Resource::new(
        20,
        Access::ReadWrite,
        "Low battery threshold",
        Unit::Percent,
        battery::LOW_THRESHOLD,
    ));
    mock.expect_resource(0, battery::LEVEL).return_ok(Resource::new(
        100,
        Access::ReadOnly,
        "Battery level",
        Unit::Percent,
        battery::LEVEL,
    ));
    mock.expect_resource(0, battery::LEVEL_TOO_LOW).return_ok(Resource::new(
        false,
        Access::ReadOnly,
        "Battery level too low",
        Unit::None,
        battery::LEVEL_TOO_LOW,
    ));

    let client = BatteryClient::new(mock.client());
    client.report_level(5).await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn provided_instance_operations_use_mapped_errors() {
    let mut mock = MockClient::new(battery::OBJECT_ID);
    mock.expect_delete(0)
        .return_err(ObjectError::MethodNotAllowed("template".into()));
    mock.expect_discover(0).return_ok(vec![1, 5]);

    let client = BatteryClient::new(mock.client());
    let err = client.delete_instance(0).await.unwrap_err();
    assert_eq!(err.status(), Status::MethodNotAllowed);
    assert_eq!(client.discover(0).await.unwrap(), vec![1, 5]);
    mock.verify();
}

#[tokio::test]
async fn closed_object_is_a_communication_error() {
    let (inner, receiver) = node_object::mock::create_mock_client(device::OBJECT_ID, 1);
    drop(receiver);

    let err = DeviceClient::new(inner).reboot().await.unwrap_err();
    assert!(matches!(err, NodeError::Communication { object: 3, .. }));
    assert_eq!(err.status(), Status::InternalServerError);
}
