//! Controller-specific error types.
//!
//! This module defines error types specific to the Hostname Watcher
//! that are not covered by the Ingress client errors.

use ingress_client::IngressClientError;
use thiserror::Error;

/// Errors that can occur in the Hostname Watcher.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Could not obtain an authenticated Kubernetes client
    #[error("Failed to create Kubernetes client: {0}")]
    Credentials(#[source] IngressClientError),

    /// Listing Ingresses failed
    #[error("Failed to list Ingresses: {0}")]
    List(#[source] IngressClientError),

    /// Opening the watch failed
    #[error("Failed to open Ingress watch: {0}")]
    WatchOpen(#[source] IngressClientError),

    /// The open watch stream failed
    #[error("Ingress watch stream failed: {0}")]
    WatchStream(#[source] IngressClientError),

    /// The API server ended the watch with an error status
    #[error("Ingress watch returned an error status: {0}")]
    WatchStatus(String),

    /// The watch stream ended
    #[error("Ingress watch stream closed")]
    StreamClosed,

    /// A watch payload was not an Ingress; the stream is no longer trusted
    #[error("Could not cast watch payload to Ingress: {0}")]
    UnexpectedObject(String),
}

impl ControllerError {
    /// Whether a re-list can recover from this error once relaying has started.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ControllerError::WatchStream(_)
                | ControllerError::WatchStatus(_)
                | ControllerError::StreamClosed
                | ControllerError::List(_)
                | ControllerError::WatchOpen(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_violation_is_not_recoverable() {
        assert!(!ControllerError::UnexpectedObject("v1/Service".to_string()).is_recoverable());
        assert!(!ControllerError::InvalidConfig("bad".to_string()).is_recoverable());
        assert!(!ControllerError::Credentials(IngressClientError::Stream("x".to_string())).is_recoverable());
    }

    #[test]
    fn test_stream_failures_are_recoverable() {
        assert!(ControllerError::StreamClosed.is_recoverable());
        assert!(ControllerError::WatchStatus("410".to_string()).is_recoverable());
        assert!(ControllerError::WatchStream(IngressClientError::Stream("reset".to_string())).is_recoverable());
        assert!(ControllerError::List(IngressClientError::Stream("timeout".to_string())).is_recoverable());
    }
}
