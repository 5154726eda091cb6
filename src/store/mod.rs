//! JSON document persistence for the catalog.
//!
//! The document on disk is the source of truth for all application data and is
//! rewritten in full after every mutation.

mod storage;

pub use storage::*;

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::models::CatalogDocument;

/// Errors raised by the data store.
#[derive(Debug)]
pub enum StoreError {
    /// Another game already uses this title (case-insensitive)
    DuplicateTitle(String),
    /// A stats pointer referenced a game that does not exist
    UnknownGame(String),
    /// The document could not be written
    Persistence(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::DuplicateTitle(title) => write!(f, "title already exists: {}", title),
            StoreError::UnknownGame(id) => write!(f, "game {} does not exist", id),
            StoreError::Persistence(msg) => write!(f, "persistence error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Read the document from disk.
///
/// A missing or malformed file yields an empty catalog with zeroed stats.
pub async fn load_document(path: &Path) -> CatalogDocument {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(
                "Could not read catalog at {}: {}. Starting with an empty catalog",
                path.display(),
                e
            );
            return CatalogDocument::default();
        }
    };

    match serde_json::from_slice(&raw) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!(
                "Catalog at {} is malformed: {}. Starting with an empty catalog",
                path.display(),
                e
            );
            CatalogDocument::default()
        }
    }
}

/// Replace the document on disk by writing a sibling temp file and renaming it.
pub async fn write_document(path: &Path, document: &CatalogDocument) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error("create directory", parent, e))?;
    }

    let bytes = serde_json::to_vec_pretty(document)
        .map_err(|e| StoreError::Persistence(format!("failed to serialize catalog: {}", e)))?;

    let temp_path = temp_path(path);
    if let Err(e) = write_synced(&temp_path, &bytes).await {
        discard_temp(&temp_path).await;
        return Err(io_error("write", &temp_path, e));
    }

    // Atomic rename, only once the data is on disk
    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        discard_temp(&temp_path).await;
        return Err(io_error("replace", path, e));
    }

    tracing::debug!("Saved catalog to {}", path.display());
    Ok(())
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

async fn discard_temp(temp_path: &Path) {
    if let Err(e) = tokio::fs::remove_file(temp_path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Could not remove {}: {}", temp_path.display(), e);
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn io_error(action: &str, path: &Path, err: std::io::Error) -> StoreError {
    StoreError::Persistence(format!("failed to {} {}: {}", action, path.display(), err))
}
