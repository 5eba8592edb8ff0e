//! Mock IngressSource for unit testing
//!
//! Replays scripted list responses and watch sessions in order, and records
//! the resource versions each watch was opened at.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use futures::StreamExt;

use crate::error::IngressClientError;
use crate::models::{ChangeEvent, Snapshot};
use crate::source_trait::{EventStream, IngressSource};

type WatchScript = Result<Vec<Result<ChangeEvent, IngressClientError>>, IngressClientError>;

/// Mock Ingress source for testing
///
/// Each `list()` or `watch()` call consumes the next scripted response.
/// A watch session's stream ends after its last scripted event.
/// Calls beyond the script fail with [`IngressClientError::Stream`].
#[derive(Clone, Default)]
pub struct MockIngressClient {
    lists: Arc<Mutex<VecDeque<Result<Snapshot, IngressClientError>>>>,
    watches: Arc<Mutex<VecDeque<WatchScript>>>,
    list_calls: Arc<Mutex<usize>>,
    watch_calls: Arc<Mutex<Vec<String>>>,
}

impl MockIngressClient {
    /// Create a mock with no scripted responses
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful list response
    pub fn push_list(&self, snapshot: Snapshot) {
        self.lists.lock().unwrap().push_back(Ok(snapshot));
    }

    /// Queue a failed list response
    pub fn push_list_error(&self, error: IngressClientError) {
        self.lists.lock().unwrap().push_back(Err(error));
    }

    /// Queue a watch session that delivers `events` and then closes
    pub fn push_watch(&self, events: Vec<Result<ChangeEvent, IngressClientError>>) {
        self.watches.lock().unwrap().push_back(Ok(events));
    }

    /// Queue a watch request that fails to open
    pub fn push_watch_error(&self, error: IngressClientError) {
        self.watches.lock().unwrap().push_back(Err(error));
    }

    /// Number of `list()` calls made so far
    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }

    /// Resource versions passed to `watch()`, in call order
    pub fn watched_versions(&self) -> Vec<String> {
        self.watch_calls.lock().unwrap().clone()
    }
}

impl std::fmt::Debug for MockIngressClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockIngressClient")
            .field("list_calls", &self.list_calls())
            .field("watched_versions", &self.watched_versions())
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl IngressSource for MockIngressClient {
    async fn list(&self) -> Result<Snapshot, IngressClientError> {
        *self.list_calls.lock().unwrap() += 1;
        self.lists
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(IngressClientError::Stream("no scripted list response".to_string())))
    }

    async fn watch(&self, since_version: &str) -> Result<EventStream, IngressClientError> {
        self.watch_calls.lock().unwrap().push(since_version.to_string());
        let script = self
            .watches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(IngressClientError::Stream("no scripted watch session".to_string())))?;

        Ok(futures::stream::iter(script).boxed())
    }
}
