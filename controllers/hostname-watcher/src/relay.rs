//! Classifies watch events and relays hostname changes.

use ingress_client::{hostname, identity, ChangeEvent, EventKind};
use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::Resource;
use kube::api::DynamicObject;
use tracing::debug;

use crate::error::ControllerError;
use crate::report::{Fact, FactSink};

/// Relays one event to `sink`.
///
/// Object events produce exactly one [`Fact::Change`]. Returns the resource
/// version the watch can resume from after this event, if the event carried
/// one.
///
/// # Errors
///
/// [`ControllerError::UnexpectedObject`] if an object payload is not an
/// Ingress; nothing is reported in that case. [`ControllerError::WatchStatus`]
/// for an error event.
pub fn relay_event(event: ChangeEvent, sink: &mut impl FactSink) -> Result<Option<String>, ControllerError> {
    let kind = event.kind();
    let obj = match event {
        ChangeEvent::Added(obj) | ChangeEvent::Modified(obj) | ChangeEvent::Deleted(obj) => obj,
        ChangeEvent::Bookmark { resource_version } => {
            debug!("Watch bookmark at resource version {}", resource_version);
            return Ok(Some(resource_version));
        }
        ChangeEvent::Error { message } => return Err(ControllerError::WatchStatus(message)),
    };

    let ingress = into_ingress(obj)?;
    sink.report(fact_for(&ingress, kind));

    Ok(ingress.metadata.resource_version)
}

fn fact_for(ingress: &Ingress, kind: EventKind) -> Fact {
    Fact::Change {
        resource: identity(&ingress.metadata),
        hostname: hostname(&ingress.metadata).unwrap_or_default().to_string(),
        kind,
    }
}

/// Checks the payload's declared type, then re-types it as an Ingress.
fn into_ingress(obj: DynamicObject) -> Result<Ingress, ControllerError> {
    let (api_version, kind) = obj
        .types
        .as_ref()
        .map_or(("", ""), |types| (types.api_version.as_str(), types.kind.as_str()));

    if api_version != Ingress::API_VERSION || kind != Ingress::KIND {
        return Err(ControllerError::UnexpectedObject(format!(
            "{} has apiVersion '{}' and kind '{}'",
            identity(&obj.metadata),
            api_version,
            kind
        )));
    }

    let value = serde_json::to_value(&obj)
        .map_err(|e| ControllerError::UnexpectedObject(format!("{}: {}", identity(&obj.metadata), e)))?;
    serde_json::from_value(value)
        .map_err(|e| ControllerError::UnexpectedObject(format!("{}: {}", identity(&obj.metadata), e)))
}
