//! Facts reported by the watcher and the sinks that receive them.
//!
//! Reporting is fire-and-forget: sinks return nothing and the watcher never
//! waits on or retries a report.

use ingress_client::{EventKind, HOSTNAME_ANNOTATION};
use tracing::info;

/// One observation about Ingress hostnames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fact {
    /// A listed Ingress currently carries a hostname
    Bound { resource: String, hostname: String },
    /// The listing contained no Ingresses at all
    NoResources,
    /// No listed Ingress carried the hostname annotation
    NoBoundResource,
    /// A change was relayed from the watch; `hostname` is empty when absent
    Change {
        resource: String,
        hostname: String,
        kind: EventKind,
    },
}

/// Receives facts in the order they are produced.
pub trait FactSink {
    fn report(&mut self, fact: Fact);
}

/// Writes every fact as a structured log line at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl FactSink for LogSink {
    fn report(&mut self, fact: Fact) {
        match fact {
            Fact::Bound { resource, hostname } => {
                info!(domain = %hostname, resource = %resource, "Hostname currently bound");
            }
            Fact::NoResources => {
                info!("No Ingress found in the cluster");
            }
            Fact::NoBoundResource => {
                info!(annotation = HOSTNAME_ANNOTATION, "No Ingress found with the hostname annotation");
            }
            Fact::Change {
                resource,
                hostname,
                kind,
            } => {
                info!(domain = %hostname, event = %kind, resource = %resource, "A change has been detected");
            }
        }
    }
}
