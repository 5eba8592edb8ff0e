//! Credential resolution for the Kubernetes client.

use std::path::PathBuf;

use kube::config::{Config, KubeConfigOptions, Kubeconfig};
use kube::Client;
use tracing::info;

use crate::error::IngressClientError;

/// Where the cluster identity comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Explicit kubeconfig file, for running outside the cluster
    Kubeconfig(PathBuf),
    /// Service account mounted into the pod
    InCluster,
}

impl CredentialSource {
    /// An explicit path wins, otherwise the in-cluster identity is used.
    #[must_use]
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(CredentialSource::InCluster, CredentialSource::Kubeconfig)
    }
}

/// Builds an authenticated client from the given source.
pub async fn connect(source: &CredentialSource) -> Result<Client, IngressClientError> {
    let config = match source {
        CredentialSource::Kubeconfig(path) => {
            info!("Using out of cluster config from {}", path.display());
            let kubeconfig = Kubeconfig::read_from(path)?;
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?
        }
        CredentialSource::InCluster => {
            info!("Using in cluster config");
            Config::incluster()?
        }
    };

    Ok(Client::try_from(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(CredentialSource::from_path(None), CredentialSource::InCluster);
        assert_eq!(
            CredentialSource::from_path(Some(PathBuf::from("/etc/kube/config.yaml"))),
            CredentialSource::Kubeconfig(PathBuf::from("/etc/kube/config.yaml"))
        );
    }

    #[tokio::test]
    async fn test_missing_kubeconfig_is_error() {
        let source = CredentialSource::Kubeconfig(PathBuf::from("/nonexistent/kubeconfig.yaml"));
        let result = connect(&source).await;
        assert!(matches!(result, Err(IngressClientError::Kubeconfig(_))));
    }
}
