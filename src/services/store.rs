use crate::models::{ProfileRecord, RawProfileRow};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when loading worker profiles
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Profile store unavailable: {0}")]
    Unavailable(String),

    #[error("Profile store read failed: {0}")]
    Read(String),

    #[error("Failed to release profile store connection: {0}")]
    Close(String),
}

/// Opens scoped sessions against the profile store
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn StoreSession>, StoreError>;
}

/// A single open connection to the profile store
#[async_trait]
pub trait StoreSession: Send {
    /// Read every worker row, in store order
    async fn fetch_rows(&mut self) -> Result<Vec<RawProfileRow>, StoreError>;

    /// Release the connection
    async fn close(self: Box<Self>) -> Result<(), StoreError>;
}

/// Profile store adapter
///
/// Each fetch opens its own session, reads all rows once and releases the
/// session before returning, whatever the outcome. Rows are normalized into
/// [`ProfileRecord`]s here and nowhere else.
#[derive(Clone)]
pub struct ProfileStore {
    connector: Arc<dyn StoreConnector>,
}

impl ProfileStore {
    pub fn new(connector: Arc<dyn StoreConnector>) -> Self {
        Self { connector }
    }

    /// Fetch all worker profiles
    ///
    /// Any read or decode failure fails the whole fetch; partial results are
    /// never returned.
    pub async fn fetch_profiles(&self) -> Result<Vec<ProfileRecord>, StoreError> {
        let mut session = self.connector.connect().await?;

        let rows = session.fetch_rows().await;

        if let Err(e) = session.close().await {
            tracing::warn!("Failed to close profile store session: {}", e);
        }

        let profiles = rows?
            .into_iter()
            .map(|row| row.into_record().map_err(|e| StoreError::Read(e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Fetched {} worker profiles", profiles.len());

        Ok(profiles)
    }
}
