//! IngressSource trait for mocking
//!
//! Abstracts the list/watch pair so the synchronization loop can be driven
//! by a scripted source in unit tests.

use crate::error::IngressClientError;
use crate::models::{ChangeEvent, Snapshot};
use futures::stream::BoxStream;

/// Incremental events from a single watch request.
pub type EventStream = BoxStream<'static, Result<ChangeEvent, IngressClientError>>;

/// List/watch operations against the Ingress resource.
///
/// All async methods must be `Send` to work with Tokio's runtime.
#[async_trait::async_trait]
pub trait IngressSource: Send + Sync {
    /// Lists current Ingresses along with the list's resource version.
    async fn list(&self) -> Result<Snapshot, IngressClientError>;

    /// Opens a watch delivering every change after `since_version`.
    async fn watch(&self, since_version: &str) -> Result<EventStream, IngressClientError>;
}
