use anyhow::Context;

use crate::config::RemoteConfig;
use crate::model::RemoteEntry;

mod http_client;
use self::http_client::with_retries;

pub mod types;
use self::types::*;
mod listing;
pub mod memory;

pub use self::memory::{FailureKind, MemoryDrive, TreeFixture};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// Network trouble, throttling, server-side failures. Aborts only the
    /// command that triggered the fetch.
    #[error("remote listing failed: {0}")]
    Transient(String),

    /// Rejected credentials or missing permissions. Ends the session.
    #[error("remote authorization failed: {0}")]
    Auth(String),
}

impl RemoteError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, RemoteError::Auth(_))
    }
}

/// Source of direct-children listings for remote containers.
pub trait ListingClient {
    fn list_children(&self, container_id: &str) -> Result<Vec<RemoteEntry>, RemoteError>;
}

impl<T: ListingClient + ?Sized> ListingClient for &T {
    fn list_children(&self, container_id: &str) -> Result<Vec<RemoteEntry>, RemoteError> {
        (**self).list_children(container_id)
    }
}

impl<T: ListingClient + ?Sized> ListingClient for Box<T> {
    fn list_children(&self, container_id: &str) -> Result<Vec<RemoteEntry>, RemoteError> {
        (**self).list_children(container_id)
    }
}

/// Drive v3 `files.list` client.
pub struct DriveClient {
    remote: RemoteConfig,
    token: String,
    client: reqwest::blocking::Client,
}

impl DriveClient {
    pub fn new(remote: RemoteConfig, token: String) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("drivepick")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            remote,
            token,
            client,
        })
    }
}
