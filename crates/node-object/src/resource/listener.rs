use crate::value::Value;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Opaque token returned by a successful bind, used to unbind later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    fn next() -> Self {
        Self(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }
}

pub(crate) type Callback = Arc<dyn Fn(&Value) + Send + Sync>;

/// Ordered listener list for one operation.
///
/// Cloning yields a new list holding the same callbacks. Binding or unbinding on
/// the clone never touches the original.
#[derive(Clone, Default)]
pub(crate) struct Listeners {
    entries: Vec<(ListenerHandle, Callback)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, callback: Callback) -> ListenerHandle {
        let handle = ListenerHandle::next();
        self.entries.push((handle, callback));
        handle
    }

    pub(crate) fn remove(&mut self, handle: ListenerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(h, _)| *h != handle);
        self.entries.len() != before
    }

    pub(crate) fn notify(&self, value: &Value) {
        for (_, callback) in &self.entries {
            callback(value);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
