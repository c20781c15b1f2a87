//! Flat-file persistence for the entry list.
//!
//! The whole list lives in one JSON array and every `save` rewrites the file in
//! place. Writes are not atomic (a crash mid-write can leave a truncated file)
//! and nothing serializes concurrent `load`/`save` pairs, so two overlapping
//! writers lose one update.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::entries::Entry;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("entry store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("entry store at {path} is not a JSON array of entries: {source}")]
    Corruption {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize entries for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn load(&self) -> Result<Vec<Entry>, StorageError>;
    async fn save(&self, entries: &[Entry]) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Creates the parent directory and an empty `[]` document when missing.
    async fn ensure_file(&self) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| self.io_err(e))?;
        }
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| self.io_err(e))?;
        if !exists {
            tokio::fs::write(&self.path, b"[]")
                .await
                .map_err(|e| self.io_err(e))?;
            info!(path = %self.path.display(), "initialized empty entry store");
        }
        Ok(())
    }
}

#[async_trait]
impl EntryStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Entry>, StorageError> {
        self.ensure_file().await?;
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|e| self.io_err(e))?;
        let entries: Vec<Entry> =
            serde_json::from_slice(&raw).map_err(|source| StorageError::Corruption {
                path: self.path.clone(),
                source,
            })?;
        debug!(count = entries.len(), "entries loaded");
        Ok(entries)
    }

    async fn save(&self, entries: &[Entry]) -> Result<(), StorageError> {
        self.ensure_file().await?;
        let body =
            serde_json::to_vec_pretty(entries).map_err(|source| StorageError::Serialize {
                path: self.path.clone(),
                source,
            })?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|e| self.io_err(e))?;
        debug!(count = entries.len(), "entries saved");
        Ok(())
    }
}
