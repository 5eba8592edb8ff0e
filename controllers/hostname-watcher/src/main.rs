//! Hostname Watcher
//!
//! Reports the `external-dns.alpha.kubernetes.io/hostname` annotation of
//! every Ingress in the cluster:
//! - at startup, from a full listing
//! - afterwards, for every change delivered by a watch anchored at that listing
//!
//! Facts are written as structured log lines.

mod backoff;
mod config;
mod controller;
mod error;
mod logging;
mod relay;
mod report;
mod snapshot;
#[cfg(test)]
mod test_utils;

use crate::config::Config;
use crate::error::ControllerError;
use controller::Controller;
use tracing::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ControllerError> {
    let config = Config::from_env()?;
    logging::init(config.log_level);

    if rustls::crypto::ring::default_provider().install_default().is_err() {
        warn!("A rustls crypto provider was already installed");
    }

    info!("Starting Hostname Watcher");
    info!("Configuration:");
    info!("  Log level: {}", config.log_level);
    info!(
        "  Credentials: {}",
        config
            .kubeconfig
            .as_ref()
            .map_or_else(|| "in cluster".to_string(), |path| path.display().to_string())
    );
    info!("  Namespace: {}", config.namespace.as_deref().unwrap_or("all namespaces"));
    info!("  Reconnect: {:?}", config.reconnect);

    let mut controller = Controller::connect(&config).await.map_err(|e| {
        error!("{}", e);
        e
    })?;
    controller.run().await
}
