//! # Engine Dispatcher
//!
//! The seam between a protocol engine and the objects. The engine decodes a server request
//! into an [`EngineRequest`], hands it to [`EngineDispatcher::dispatch`], and encodes the
//! [`EngineResponse`] it gets back. Routing is by object id; the dispatcher holds one
//! [`ObjectClient`] per registered object and never touches an object directly.
//!
//! | outcome | status |
//! |---------|--------|
//! | read / discover succeeded | `2.05 Content` |
//! | write / execute succeeded | `2.04 Changed` |
//! | create succeeded | `2.01 Created` |
//! | delete succeeded | `2.02 Deleted` |
//! | object not registered | `4.04 Not Found` |
//! | operation failed | whatever [`ObjectError::status`] says |
//! | object task gone | `5.00 Internal Server Error` |

use crate::error::NodeError;
use node_object::{DataItem, FrameworkError, ObjectClient, Status, WriteMode};
use std::collections::HashMap;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineOperation {
    /// An empty `resources` list discovers the whole instance.
    Discover { instance: u16, resources: Vec<u16> },
    /// An empty `items` list reads every readable resource.
    Read { instance: u16, items: Vec<DataItem> },
    Write {
        instance: u16,
        items: Vec<DataItem>,
        mode: WriteMode,
    },
    Execute { instance: u16, resource: u16 },
    Create { instance: u16, items: Vec<DataItem> },
    Delete { instance: u16 },
}

impl EngineOperation {
    pub fn name(&self) -> &'static str {
        match self {
            EngineOperation::Discover { .. } => "Discover",
            EngineOperation::Read { .. } => "Read",
            EngineOperation::Write { .. } => "Write",
            EngineOperation::Execute { .. } => "Execute",
            EngineOperation::Create { .. } => "Create",
            EngineOperation::Delete { .. } => "Delete",
        }
    }

    fn success(&self) -> Status {
        match self {
            EngineOperation::Discover { .. } | EngineOperation::Read { .. } => Status::Content,
            EngineOperation::Write { .. } | EngineOperation::Execute { .. } => Status::Changed,
            EngineOperation::Create { .. } => Status::Created,
            EngineOperation::Delete { .. } => Status::Deleted,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineRequest {
    pub object_id: u16,
    pub operation: EngineOperation,
}

impl EngineRequest {
    pub fn new(object_id: u16, operation: EngineOperation) -> Self {
        Self {
            object_id,
            operation,
        }
    }
}

/// Status plus payload. `items` is filled by reads, `ids` by discovers.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineResponse {
    pub status: Status,
    pub items: Vec<DataItem>,
    pub ids: Vec<u16>,
}

impl EngineResponse {
    pub fn status(status: Status) -> Self {
        Self {
            status,
            items: Vec::new(),
            ids: Vec::new(),
        }
    }
}

#[derive(Clone, Default)]
pub struct EngineDispatcher {
    objects: HashMap<u16, ObjectClient>,
}

impl EngineDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, client: ObjectClient) -> Result<(), NodeError> {
        let object = client.object_id();
        if self.objects.contains_key(&object) {
            return Err(NodeError::DuplicateObject { object });
        }
        debug!(object_id = object, "Registered with dispatcher");
        self.objects.insert(object, client);
        Ok(())
    }

    /// Registered object ids, ascending.
    pub fn object_ids(&self) -> Vec<u16> {
        let mut ids: Vec<u16> = self.objects.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn client(&self, object_id: u16) -> Option<&ObjectClient> {
        self.objects.get(&object_id)
    }

    pub async fn dispatch(&self, request: EngineRequest) -> EngineResponse {
        let EngineRequest {
            object_id,
            operation,
        } = request;
        let name = operation.name();

        let Some(client) = self.objects.get(&object_id) else {
            warn!(object_id, operation = name, "Unknown object");
            return EngineResponse::status(Status::NotFound);
        };

        let success = operation.success();
        let mut response = EngineResponse::status(success);
        let result = match operation {
            EngineOperation::Discover {
                instance,
                resources,
            } => client
                .discover(instance, resources)
                .await
                .map(|ids| response.ids = ids),
            EngineOperation::Read { instance, items } => client
                .read_items(instance, items)
                .await
                .map(|items| response.items = items),
            EngineOperation::Write {
                instance,
                items,
                mode,
            } => client.write(instance, items, mode).await,
            EngineOperation::Execute { instance, resource } => {
                client.execute(instance, resource).await
            }
            EngineOperation::Create { instance, items } => client.create(instance, items).await,
            EngineOperation::Delete { instance } => client.delete(instance).await,
        };

        match result {
            Ok(()) => {
                info!(object_id, operation = name, status = %success, "Handled");
                response
            }
            Err(e) => {
                let status = failure_status(&e);
                warn!(object_id, operation = name, %status, error = %e, "Request failed");
                EngineResponse::status(status)
            }
        }
    }
}

fn failure_status(e: &FrameworkError) -> Status {
    match e {
        FrameworkError::Object(e) => e.status(),
        FrameworkError::Resource(_) => Status::NotFound,
        FrameworkError::ActorClosed | FrameworkError::ActorDropped => Status::InternalServerError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use node_object::mock::MockClient;
    use node_object::{ObjectError, WireValue};

    fn dispatcher(mock: &MockClient) -> EngineDispatcher {
        let mut dispatcher = EngineDispatcher::new();
        dispatcher.register(mock.client()).unwrap();
        dispatcher
    }

    #[tokio::test]
    async fn unknown_object_is_not_found() {
        let response = EngineDispatcher::new()
            .dispatch(EngineRequest::new(9, EngineOperation::Delete { instance: 1 }))
            .await;
        assert_eq!(response, EngineResponse::status(Status::NotFound));
    }

    #[tokio::test]
    async fn success_statuses_follow_operation() {
        let mut mock = MockClient::new(3);
        mock.expect_read(0)
            .return_ok(vec![DataItem::new(9, WireValue::Integer(100))]);
        mock.expect_discover(0).return_ok(vec![0, 9]);
        mock.expect_write(0).return_ok(());
        mock.expect_execute(0, 4).return_ok(());
        mock.expect_create(1).return_ok(());
        mock.expect_delete(1).return_ok(());
        let dispatcher = dispatcher(&mock);

        let read = dispatcher
            .dispatch(EngineRequest::new(
                3,
                EngineOperation::Read {
                    instance: 0,
                    items: vec![DataItem::unset(9)],
                },
            ))
            .await;
        assert_eq!(read.status, Status::Content);
        assert_eq!(read.items, vec![DataItem::new(9, WireValue::Integer(100))]);

        let discover = dispatcher
            .dispatch(EngineRequest::new(
                3,
                EngineOperation::Discover {
                    instance: 0,
                    resources: Vec::new(),
                },
            ))
            .await;
        assert_eq!(discover.status, Status::Content);
        assert_eq!(discover.ids, vec![0, 9]);

        let statuses = [
            EngineOperation::Write {
                instance: 0,
                items: Vec::new(),
                mode: WriteMode::Update,
            },
            EngineOperation::Execute {
                instance: 0,
                resource: 4,
            },
            EngineOperation::Create {
                instance: 1,
                items: Vec::new(),
            },
            EngineOperation::Delete { instance: 1 },
        ];
        let mut seen = Vec::new();
        for operation in statuses {
            seen.push(dispatcher.dispatch(EngineRequest::new(3, operation)).await.status);
        }
        assert_eq!(
            seen,
            vec![Status::Changed, Status::Changed, Status::Created, Status::Deleted]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn object_errors_map_to_their_status() {
        let mut mock = MockClient::new(3);
        mock.expect_delete(0)
            .return_err(ObjectError::MethodNotAllowed("template".into()));
        mock.expect_execute(0, 99).return_err(ObjectError::ResourceNotFound {
            object: 3,
            instance: 0,
            resource: 99,
        });
        let dispatcher = dispatcher(&mock);

        let delete = dispatcher
            .dispatch(EngineRequest::new(3, EngineOperation::Delete { instance: 0 }))
            .await;
        assert_eq!(delete.status, Status::MethodNotAllowed);

        let execute = dispatcher
            .dispatch(EngineRequest::new(
                3,
                EngineOperation::Execute {
                    instance: 0,
                    resource: 99,
                },
            ))
            .await;
        assert_eq!(execute, EngineResponse::status(Status::NotFound));
        mock.verify();
    }

    #[tokio::test]
    async fn closed_object_task_is_internal_error() {
        let (client, receiver) = node_object::mock::create_mock_client(3, 1);
        drop(receiver);
        let mut dispatcher = EngineDispatcher::new();
        dispatcher.register(client).unwrap();

        let response = dispatcher
            .dispatch(EngineRequest::new(3, EngineOperation::Delete { instance: 1 }))
            .await;
        assert_eq!(response.status, Status::InternalServerError);
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let mock = MockClient::new(1);
        let mut dispatcher = dispatcher(&mock);
        assert!(matches!(
            dispatcher.register(mock.client()),
            Err(NodeError::DuplicateObject { object: 1 })
        ));
        assert_eq!(dispatcher.object_ids(), vec![1]);
    }
}
