//! Ingress client errors

use kube::config::{InClusterError, KubeconfigError};
use thiserror::Error;

/// Errors that can occur when talking to the Kubernetes API
#[derive(Debug, Error)]
pub enum IngressClientError {
    /// The explicit kubeconfig could not be read or resolved
    #[error("Kubeconfig error: {0}")]
    Kubeconfig(#[from] KubeconfigError),

    /// The in-cluster service account environment is unavailable
    #[error("In-cluster config error: {0}")]
    InCluster(#[from] InClusterError),

    /// Kubernetes API or transport error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// A list response without a resource version cannot anchor a watch
    #[error("List response for {0} carried no resource version")]
    MissingResourceVersion(String),

    /// The event stream failed after it was opened
    #[error("Watch stream error: {0}")]
    Stream(String),
}
