//! Ingress List/Watch Client
//!
//! Thin boundary over the Kubernetes API for the hostname watcher.
//! Resolves credentials, lists `Ingress` resources together with the list's
//! resource version, and opens an untyped watch anchored at that version.
//!
//! # Example
//!
//! ```no_run
//! use ingress_client::{connect, CredentialSource, IngressClient, IngressSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = connect(&CredentialSource::InCluster).await?;
//! let ingresses = IngressClient::new(client, None, None);
//!
//! let snapshot = ingresses.list().await?;
//! let events = ingresses.watch(&snapshot.resource_version).await?;
//! # drop(events);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod credentials;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod source_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::IngressClient;
pub use credentials::{connect, CredentialSource};
pub use error::IngressClientError;
pub use models::*;
pub use source_trait::{EventStream, IngressSource};
#[cfg(feature = "test-util")]
pub use mock::MockIngressClient;
