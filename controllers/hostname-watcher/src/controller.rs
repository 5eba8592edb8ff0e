//! Main controller implementation.
//!
//! This module contains the `Controller` struct that drives the
//! list-then-watch loop for Ingress hostnames:
//!
//! 1. List Ingresses and report the hostnames bound right now
//! 2. Open a watch at the listing's resource version
//! 3. Relay every change, one event at a time, in stream order
//!
//! Authentication happens in [`Controller::connect`], before the controller
//! exists. The first listing and the first watch are never retried. Once
//! relaying, a stream that stops is handled according to the
//! [`ReconnectPolicy`]; a payload that is not an Ingress always terminates.

use futures::StreamExt;
use ingress_client::{CredentialSource, EventStream, IngressClient, IngressSource};
use tracing::{debug, error, info, warn};

use crate::backoff::ExponentialBackoff;
use crate::config::{Config, ReconnectPolicy};
use crate::error::ControllerError;
use crate::relay::relay_event;
use crate::report::{FactSink, LogSink};
use crate::snapshot::report_snapshot;

/// Where the synchronization loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Listing,
    Relaying,
    Terminated,
}

/// Drives list, snapshot report, watch and relay for one Ingress source.
pub struct Controller<C, S> {
    source: C,
    sink: S,
    reconnect: ReconnectPolicy,
    backoff: ExponentialBackoff,
    state: SyncState,
}

impl Controller<IngressClient, LogSink> {
    /// Authenticates against the cluster and builds a controller that logs facts.
    pub async fn connect(config: &Config) -> Result<Self, ControllerError> {
        let credentials = CredentialSource::from_path(config.kubeconfig.clone());
        let client = ingress_client::connect(&credentials)
            .await
            .map_err(ControllerError::Credentials)?;

        let source = IngressClient::new(client, config.namespace.as_deref(), config.watch_timeout_secs);
        Ok(Self::new(
            source,
            LogSink,
            config.reconnect,
            ExponentialBackoff::new(config.backoff_min_ms, config.backoff_max_ms),
        ))
    }
}

impl<C, S> Controller<C, S>
where
    C: IngressSource,
    S: FactSink,
{
    pub fn new(source: C, sink: S, reconnect: ReconnectPolicy, backoff: ExponentialBackoff) -> Self {
        Self {
            source,
            sink,
            reconnect,
            backoff,
            state: SyncState::Listing,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> SyncState {
        self.state
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Runs until a terminal error.
    ///
    /// The loop has no successful exit: the returned error is why it stopped.
    pub async fn run(&mut self) -> Result<(), ControllerError> {
        let result = self.synchronize().await;
        if let Err(e) = &result {
            error!("Hostname watcher terminated while {:?}: {}", self.state, e);
        }
        self.state = SyncState::Terminated;
        result
    }

    async fn synchronize(&mut self) -> Result<(), ControllerError> {
        let mut resource_version = self.list_and_report().await?;
        let mut stream = self.open_watch(&resource_version).await?;

        loop {
            let (interruption, delivered) = self.relay(&mut stream, &mut resource_version).await;
            if self.reconnect == ReconnectPolicy::Terminate || !interruption.is_recoverable() {
                return Err(interruption);
            }

            warn!("{}, re-establishing the watch", interruption);
            // Only a watch that delivered events counts as a successful reconnect.
            if delivered {
                self.backoff.reset();
            } else {
                self.wait().await;
            }

            // A clean close only means the server timed the watch out.
            let relist = !matches!(interruption, ControllerError::StreamClosed);
            let (version, reopened) = self.recover(relist, resource_version).await;
            resource_version = version;
            stream = reopened;
        }
    }

    /// Relays events until the stream stops.
    ///
    /// Returns why it stopped and whether any event was received first.
    async fn relay(&mut self, stream: &mut EventStream, resource_version: &mut String) -> (ControllerError, bool) {
        info!("Watching for changes...");
        let mut delivered = false;
        while let Some(item) = stream.next().await {
            let event = match item {
                Ok(event) => event,
                Err(e) => return (ControllerError::WatchStream(e), delivered),
            };
            delivered = true;

            match relay_event(event, &mut self.sink) {
                Ok(Some(version)) => *resource_version = version,
                Ok(None) => {}
                Err(e) => return (e, delivered),
            }
        }

        (ControllerError::StreamClosed, delivered)
    }

    /// Re-establishes a watch, re-listing first when `relist` is set.
    ///
    /// Retries with backoff until a watch opens. The backoff is not reset
    /// here; a watch that opens and closes empty keeps growing the delay.
    async fn recover(&mut self, mut relist: bool, mut resource_version: String) -> (String, EventStream) {
        loop {
            if relist {
                match self.list_and_report().await {
                    Ok(version) => {
                        resource_version = version;
                        relist = false;
                    }
                    Err(e) => {
                        warn!("{}", e);
                        self.wait().await;
                        continue;
                    }
                }
            }

            match self.open_watch(&resource_version).await {
                Ok(stream) => return (resource_version, stream),
                Err(e) => {
                    // The version may have expired; start over from a fresh listing.
                    warn!("{}", e);
                    relist = true;
                    self.wait().await;
                }
            }
        }
    }

    async fn list_and_report(&mut self) -> Result<String, ControllerError> {
        self.state = SyncState::Listing;
        info!("Getting current state of the world");
        let snapshot = self.source.list().await.map_err(ControllerError::List)?;
        debug!("Resource version: {}", snapshot.resource_version);

        let summary = report_snapshot(&snapshot, &mut self.sink);
        debug!(items = summary.items, bound = summary.bound, "Snapshot reported");

        Ok(snapshot.resource_version)
    }

    async fn open_watch(&mut self, resource_version: &str) -> Result<EventStream, ControllerError> {
        debug!("Setting up a watch from resource version {}", resource_version);
        let stream = self
            .source
            .watch(resource_version)
            .await
            .map_err(ControllerError::WatchOpen)?;
        self.state = SyncState::Relaying;
        Ok(stream)
    }

    async fn wait(&mut self) {
        let delay = self.backoff.next_backoff();
        debug!("Retrying in {:?}", delay);
        tokio::time::sleep(delay).await;
    }
}

impl<C, S> std::fmt::Debug for Controller<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("reconnect", &self.reconnect)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
