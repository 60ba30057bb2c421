//! # Mock Object Client
//!
//! [`MockClient`] hands out a real [`ObjectClient`] whose requests are answered from a queue
//! of expectations instead of an object. Use it to test code *around* an object client, such
//! as typed wrappers or the engine dispatcher, without building a catalog.
//!
//! | | MockClient | Real ObjectActor |
//! |---|---|---|
//! | **State** | none, canned answers | a real [`NodeObject`](crate::NodeObject) |
//! | **Order** | expectations consumed first-in first-out | whatever the test sends |
//! | **Error injection** | `return_err` | needs a catalog that fails |
//!
//! ```rust
//! use node_object::mock::MockClient;
//! use node_object::{FrameworkError, ObjectError};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::new(3);
//!     mock.expect_execute(0, 4).return_ok(());
//!     mock.expect_delete(0)
//!         .return_err(ObjectError::MethodNotAllowed("template".into()));
//!
//!     let client = mock.client();
//!     assert!(client.execute(0, 4).await.is_ok());
//!     assert!(matches!(client.delete(0).await, Err(FrameworkError::Object(_))));
//!     mock.verify();
//! }
//! ```
//!
//! Local resource access (`with_resource`, `get_value`, `set_value`, ...) runs against a
//! fixture resource given to [`MockClient::expect_resource`].
//!
//! For step-by-step control, [`create_mock_client`] returns the client together with the raw
//! request receiver, and the `expect_*` free functions pull the next request off it.

use crate::client::ObjectClient;
use crate::error::ObjectError;
use crate::message::{ObjectRequest, Response};
use crate::object::WriteMode;
use crate::resource::Resource;
use crate::wire::DataItem;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

enum Expectation {
    Discover {
        instance: u16,
        response: Result<Vec<u16>, ObjectError>,
    },
    Read {
        instance: u16,
        response: Result<Vec<DataItem>, ObjectError>,
    },
    Write {
        instance: u16,
        response: Result<(), ObjectError>,
    },
    Execute {
        instance: u16,
        resource: u16,
        response: Result<(), ObjectError>,
    },
    Create {
        instance: u16,
        response: Result<(), ObjectError>,
    },
    Delete {
        instance: u16,
        response: Result<(), ObjectError>,
    },
    Instances {
        response: Result<Vec<u16>, ObjectError>,
    },
    Resource {
        instance: u16,
        resource: u16,
        response: Result<Resource, ObjectError>,
    },
}

type Expectations = Arc<Mutex<VecDeque<Expectation>>>;

fn answer(request: ObjectRequest, expectation: Option<Expectation>) {
    match (request, expectation) {
        (
            ObjectRequest::Discover { instance, respond_to, .. },
            Some(Expectation::Discover { instance: expected, response }),
        ) if instance == expected => {
            let _ = respond_to.send(response);
        }
        (
            ObjectRequest::Read { instance, respond_to, .. },
            Some(Expectation::Read { instance: expected, response }),
        ) if instance == expected => {
            let _ = respond_to.send(response);
        }
        (
            ObjectRequest::Write { instance, respond_to, .. },
            Some(Expectation::Write { instance: expected, response }),
        ) if instance == expected => {
            let _ = respond_to.send(response);
        }
        (
            ObjectRequest::Execute { instance, resource, respond_to },
            Some(Expectation::Execute {
                instance: expected_instance,
                resource: expected_resource,
                response,
            }),
        ) if instance == expected_instance && resource == expected_resource => {
            let _ = respond_to.send(response);
        }
        (
            ObjectRequest::Create { instance, respond_to, .. },
            Some(Expectation::Create { instance: expected, response }),
        ) if instance == expected => {
            let _ = respond_to.send(response);
        }
        (
            ObjectRequest::Delete { instance, respond_to },
            Some(Expectation::Delete { instance: expected, response }),
        ) if instance == expected => {
            let _ = respond_to.send(response);
        }
        (ObjectRequest::Instances { respond_to }, Some(Expectation::Instances { response })) => {
            let _ = respond_to.send(response);
        }
        (
            ObjectRequest::WithResource {
                instance,
                resource,
                apply,
                respond_to,
            },
            Some(Expectation::Resource {
                instance: expected_instance,
                resource: expected_resource,
                response,
            }),
        ) if instance == expected_instance && resource == expected_resource => {
            let result = response.map(|mut fixture| apply(&mut fixture));
            let _ = respond_to.send(result);
        }
        (request, _) => {
            panic!("Unexpected {} request or expectation mismatch", request.name());
        }
    }
}

/// A mock object with expectation tracking.
pub struct MockClient {
    client: ObjectClient,
    expectations: Expectations,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockClient {
    /// Creates a mock standing in for object `object_id`, with no expectations.
    pub fn new(object_id: u16) -> Self {
        let (sender, mut receiver) = mpsc::channel::<ObjectRequest>(100);
        let expectations: Expectations = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();
                answer(request, expectation);
            }
        });

        Self {
            client: ObjectClient::new(object_id, sender),
            expectations,
            _handle: handle,
        }
    }

    pub fn client(&self) -> ObjectClient {
        self.client.clone()
    }

    pub fn expect_discover(&mut self, instance: u16) -> ExpectationBuilder<Vec<u16>> {
        self.builder(move |response| Expectation::Discover { instance, response })
    }

    pub fn expect_read(&mut self, instance: u16) -> ExpectationBuilder<Vec<DataItem>> {
        self.builder(move |response| Expectation::Read { instance, response })
    }

    pub fn expect_write(&mut self, instance: u16) -> ExpectationBuilder<()> {
        self.builder(move |response| Expectation::Write { instance, response })
    }

    pub fn expect_execute(&mut self, instance: u16, resource: u16) -> ExpectationBuilder<()> {
        self.builder(move |response| Expectation::Execute {
            instance,
            resource,
            response,
        })
    }

    pub fn expect_create(&mut self, instance: u16) -> ExpectationBuilder<()> {
        self.builder(move |response| Expectation::Create { instance, response })
    }

    pub fn expect_delete(&mut self, instance: u16) -> ExpectationBuilder<()> {
        self.builder(move |response| Expectation::Delete { instance, response })
    }

    pub fn expect_instances(&mut self) -> ExpectationBuilder<Vec<u16>> {
        self.builder(|response| Expectation::Instances { response })
    }

    /// Expects one local access; `return_ok` supplies the resource the closure runs against.
    pub fn expect_resource(&mut self, instance: u16, resource: u16) -> ExpectationBuilder<Resource> {
        self.builder(move |response| Expectation::Resource {
            instance,
            resource,
            response,
        })
    }

    fn builder<T>(
        &mut self,
        make: impl FnOnce(Result<T, ObjectError>) -> Expectation + Send + 'static,
    ) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Completes an expectation with its canned response.
pub struct ExpectationBuilder<T> {
    make: Box<dyn FnOnce(Result<T, ObjectError>) -> Expectation + Send>,
    expectations: Expectations,
}

impl<T> ExpectationBuilder<T> {
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: ObjectError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, ObjectError>) {
        let expectation = (self.make)(response);
        self.expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(expectation);
    }
}

/// Creates a client and the receiver its requests land on.
pub fn create_mock_client(
    object_id: u16,
    buffer_size: usize,
) -> (ObjectClient, mpsc::Receiver<ObjectRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ObjectClient::new(object_id, sender), receiver)
}

/// Next request, if it is a Read.
pub async fn expect_read(
    receiver: &mut mpsc::Receiver<ObjectRequest>,
) -> Option<(u16, Vec<DataItem>, Response<Vec<DataItem>>)> {
    match receiver.recv().await {
        Some(ObjectRequest::Read {
            instance,
            items,
            respond_to,
        }) => Some((instance, items, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a Write.
pub async fn expect_write(
    receiver: &mut mpsc::Receiver<ObjectRequest>,
) -> Option<(u16, Vec<DataItem>, WriteMode, Response<()>)> {
    match receiver.recv().await {
        Some(ObjectRequest::Write {
            instance,
            items,
            mode,
            respond_to,
        }) => Some((instance, items, mode, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an Execute.
pub async fn expect_execute(
    receiver: &mut mpsc::Receiver<ObjectRequest>,
) -> Option<(u16, u16, Response<()>)> {
    match receiver.recv().await {
        Some(ObjectRequest::Execute {
            instance,
            resource,
            respond_to,
        }) => Some((instance, resource, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameworkError;
    use crate::resource::{Access, Unit};
    use crate::wire::WireValue;

    #[tokio::test]
    async fn raw_receiver_sees_write_request() {
        let (client, mut receiver) = create_mock_client(1, 10);

        let write = tokio::spawn(async move {
            client
                .write(0, vec![DataItem::new(1, WireValue::Integer(300))], WriteMode::Update)
                .await
        });

        let (instance, items, mode, responder) = expect_write(&mut receiver)
            .await
            .expect("Expected Write request");
        assert_eq!(instance, 0);
        assert_eq!(items, vec![DataItem::new(1, WireValue::Integer(300))]);
        assert_eq!(mode, WriteMode::Update);
        responder.send(Ok(())).unwrap();

        assert!(write.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn expectations_answer_in_order() {
        let mut mock = MockClient::new(3);
        mock.expect_read(0)
            .return_ok(vec![DataItem::new(0, WireValue::text("OMA"))]);
        mock.expect_execute(0, 4).return_ok(());
        mock.expect_create(1).return_err(ObjectError::MethodNotAllowed("exists".into()));

        let client = mock.client();
        let items = client.read(0, vec![0]).await.unwrap();
        assert_eq!(items[0].value, WireValue::text("OMA"));
        assert!(client.execute(0, 4).await.is_ok());
        let err = client.create(1, Vec::new()).await.unwrap_err();
        assert!(matches!(err, FrameworkError::Object(ObjectError::MethodNotAllowed(_))));

        mock.verify();
    }

    #[tokio::test]
    async fn local_access_runs_on_fixture() {
        let mut mock = MockClient::new(3);
        mock.expect_resource(0, 9)
            .return_ok(Resource::new(100, Access::ReadOnly, "Battery level", Unit::Percent, 9));
        mock.expect_resource(0, 9).return_err(ObjectError::ResourceNotFound {
            object: 3,
            instance: 0,
            resource: 9,
        });

        let client = mock.client();
        assert_eq!(client.get_value::<i32>(0, 9).await.unwrap(), 100);
        assert!(matches!(
            client.set_value(0, 9, 50).await,
            Err(FrameworkError::Object(ObjectError::ResourceNotFound { .. }))
        ));
        mock.verify();
    }
}
