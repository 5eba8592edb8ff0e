//! Test utilities for unit testing the watcher
//!
//! This module provides helpers for creating Ingress test data and
//! capturing reported facts.

use crate::report::{Fact, FactSink};
use ingress_client::{ChangeEvent, Snapshot, HOSTNAME_ANNOTATION};
use k8s_openapi::api::core::v1::Service;
use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::DynamicObject;
use std::collections::BTreeMap;

/// Sink that keeps every reported fact for assertions
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub facts: Vec<Fact>,
}

impl FactSink for RecordingSink {
    fn report(&mut self, fact: Fact) {
        self.facts.push(fact);
    }
}

fn test_metadata(name: &str, hostname: Option<&str>, resource_version: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: Some("default".to_string()),
        resource_version: Some(resource_version.to_string()),
        annotations: hostname.map(|h| BTreeMap::from([(HOSTNAME_ANNOTATION.to_string(), h.to_string())])),
        ..Default::default()
    }
}

/// Helper to create a test Ingress in the `default` namespace
pub fn create_test_ingress(name: &str, hostname: Option<&str>) -> Ingress {
    Ingress {
        metadata: test_metadata(name, hostname, "1"),
        ..Default::default()
    }
}

/// Helper to create a snapshot at `resource_version`
pub fn create_test_snapshot(items: Vec<Ingress>, resource_version: &str) -> Snapshot {
    Snapshot {
        items,
        resource_version: resource_version.to_string(),
    }
}

/// Helper to create an untyped Ingress payload as delivered by the watch
pub fn create_test_ingress_object(name: &str, hostname: Option<&str>, resource_version: &str) -> DynamicObject {
    let ingress = Ingress {
        metadata: test_metadata(name, hostname, resource_version),
        ..Default::default()
    };
    let value = serde_json::to_value(&ingress).expect("Ingress serializes");
    serde_json::from_value(value).expect("Ingress parses as DynamicObject")
}

/// Helper to create an untyped payload of the wrong kind (a Service)
pub fn create_test_service_object(name: &str, resource_version: &str) -> DynamicObject {
    let service = Service {
        metadata: test_metadata(name, Some("svc.example.com"), resource_version),
        ..Default::default()
    };
    let value = serde_json::to_value(&service).expect("Service serializes");
    serde_json::from_value(value).expect("Service parses as DynamicObject")
}

/// Helper to create a Modified event for an Ingress
pub fn modified(name: &str, hostname: Option<&str>, resource_version: &str) -> ChangeEvent {
    ChangeEvent::Modified(create_test_ingress_object(name, hostname, resource_version))
}

/// Helper to create a relay fact as the watcher reports it
pub fn change_fact(name: &str, hostname: &str, kind: ingress_client::EventKind) -> Fact {
    Fact::Change {
        resource: format!("default/{name}"),
        hostname: hostname.to_string(),
        kind,
    }
}
