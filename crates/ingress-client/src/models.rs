//! Data model shared by the client and the watcher.

use std::fmt;

use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::{DynamicObject, WatchEvent};

/// Annotation whose value is the externally visible hostname of an Ingress.
pub const HOSTNAME_ANNOTATION: &str = "external-dns.alpha.kubernetes.io/hostname";

/// Ingresses listed at a single point in the cluster's history.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Items in the order the API server returned them
    pub items: Vec<Ingress>,
    /// Version marker to resume a watch from, without gaps
    pub resource_version: String,
}

/// Kind of a change delivered on the watch stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Added,
    Modified,
    Deleted,
    Bookmark,
    Error,
}

impl EventKind {
    /// Wire name used by the Kubernetes watch protocol.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Added => "ADDED",
            EventKind::Modified => "MODIFIED",
            EventKind::Deleted => "DELETED",
            EventKind::Bookmark => "BOOKMARK",
            EventKind::Error => "ERROR",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One event from the watch stream.
///
/// Object payloads are left untyped: the stream is not trusted to deliver
/// the kind it was opened for, so consumers must check before use.
#[derive(Debug, Clone)]
pub enum ChangeEvent {
    Added(DynamicObject),
    Modified(DynamicObject),
    Deleted(DynamicObject),
    /// Progress marker without an object change
    Bookmark { resource_version: String },
    /// Server-side failure status, the watch cannot continue
    Error { message: String },
}

impl ChangeEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            ChangeEvent::Added(_) => EventKind::Added,
            ChangeEvent::Modified(_) => EventKind::Modified,
            ChangeEvent::Deleted(_) => EventKind::Deleted,
            ChangeEvent::Bookmark { .. } => EventKind::Bookmark,
            ChangeEvent::Error { .. } => EventKind::Error,
        }
    }
}

impl From<WatchEvent<DynamicObject>> for ChangeEvent {
    fn from(event: WatchEvent<DynamicObject>) -> Self {
        match event {
            WatchEvent::Added(obj) => ChangeEvent::Added(obj),
            WatchEvent::Modified(obj) => ChangeEvent::Modified(obj),
            WatchEvent::Deleted(obj) => ChangeEvent::Deleted(obj),
            WatchEvent::Bookmark(bookmark) => ChangeEvent::Bookmark {
                resource_version: bookmark.metadata.resource_version,
            },
            WatchEvent::Error(status) => ChangeEvent::Error {
                message: format!("{status:?}"),
            },
        }
    }
}

/// Returns the hostname annotation, treating an empty value as absent.
#[must_use]
pub fn hostname(meta: &ObjectMeta) -> Option<&str> {
    meta.annotations
        .as_ref()
        .and_then(|annotations| annotations.get(HOSTNAME_ANNOTATION))
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

/// `namespace/name` identity of an object, `<unknown>` for missing parts.
#[must_use]
pub fn identity(meta: &ObjectMeta) -> String {
    let name = meta.name.as_deref().unwrap_or("<unknown>");
    match meta.namespace.as_deref() {
        Some(namespace) => format!("{namespace}/{name}"),
        None => name.to_string(),
    }
}
