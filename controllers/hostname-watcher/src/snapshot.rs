//! Reports hostname bindings present in an initial listing.

use ingress_client::{hostname, identity, Snapshot};

use crate::report::{Fact, FactSink};

/// Counts gathered while reporting a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub items: usize,
    pub bound: usize,
}

/// Reports every Ingress with a non-empty hostname, in listing order.
///
/// Afterwards reports [`Fact::NoResources`] if the listing was empty and
/// [`Fact::NoBoundResource`] if nothing carried a hostname. Both can fire
/// for the same snapshot.
pub fn report_snapshot(snapshot: &Snapshot, sink: &mut impl FactSink) -> SnapshotSummary {
    let mut bound = 0;
    for ingress in &snapshot.items {
        if let Some(hostname) = hostname(&ingress.metadata) {
            bound += 1;
            sink.report(Fact::Bound {
                resource: identity(&ingress.metadata),
                hostname: hostname.to_string(),
            });
        }
    }

    if snapshot.items.is_empty() {
        sink.report(Fact::NoResources);
    }
    if bound == 0 {
        sink.report(Fact::NoBoundResource);
    }

    SnapshotSummary {
        items: snapshot.items.len(),
        bound,
    }
}
