//! Kubernetes-backed implementation of [`IngressSource`].

use futures::{StreamExt, TryStreamExt};
use k8s_openapi::api::networking::v1::Ingress;
use kube::api::{Api, ApiResource, DynamicObject, ListParams, WatchParams};
use kube::Client;
use tracing::debug;

use crate::error::IngressClientError;
use crate::models::{ChangeEvent, Snapshot};
use crate::source_trait::{EventStream, IngressSource};

/// Lists typed Ingresses and watches them untyped.
///
/// The watch goes through `DynamicObject` so that a payload of the wrong
/// kind surfaces to the consumer instead of failing deserialization deep
/// inside the transport.
#[derive(Clone)]
pub struct IngressClient {
    typed: Api<Ingress>,
    raw: Api<DynamicObject>,
    scope: String,
    watch_timeout: Option<u32>,
}

impl IngressClient {
    /// Create a client scoped to `namespace`, or to all namespaces.
    ///
    /// `watch_timeout` is the server-side watch timeout in seconds.
    #[must_use]
    pub fn new(client: Client, namespace: Option<&str>, watch_timeout: Option<u32>) -> Self {
        let resource = ApiResource::erase::<Ingress>(&());
        let (typed, raw, scope): (Api<Ingress>, Api<DynamicObject>, String) = match namespace {
            Some(ns) => (
                Api::namespaced(client.clone(), ns),
                Api::namespaced_with(client, ns, &resource),
                format!("namespace {ns}"),
            ),
            None => (
                Api::all(client.clone()),
                Api::all_with(client, &resource),
                "all namespaces".to_string(),
            ),
        };

        Self {
            typed,
            raw,
            scope,
            watch_timeout,
        }
    }
}

impl std::fmt::Debug for IngressClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngressClient")
            .field("scope", &self.scope)
            .field("watch_timeout", &self.watch_timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl IngressSource for IngressClient {
    async fn list(&self) -> Result<Snapshot, IngressClientError> {
        let list = self.typed.list(&ListParams::default()).await?;
        let resource_version = list
            .metadata
            .resource_version
            .filter(|version| !version.is_empty())
            .ok_or_else(|| IngressClientError::MissingResourceVersion(self.scope.clone()))?;

        debug!(
            "Listed {} Ingresses in {} at resource version {}",
            list.items.len(),
            self.scope,
            resource_version
        );

        Ok(Snapshot {
            items: list.items,
            resource_version,
        })
    }

    async fn watch(&self, since_version: &str) -> Result<EventStream, IngressClientError> {
        let mut params = WatchParams::default();
        if let Some(timeout) = self.watch_timeout {
            params = params.timeout(timeout);
        }

        debug!("Opening Ingress watch in {} from resource version {}", self.scope, since_version);
        let stream = self.raw.watch(&params, since_version).await?;

        Ok(stream
            .map_ok(ChangeEvent::from)
            .map_err(|e| IngressClientError::Stream(e.to_string()))
            .boxed())
    }
}
