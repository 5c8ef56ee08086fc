//! Generic JSON persistence helpers for ~/.hunter/ files.
//!
//! Shared by the config loader and the JSON file store. Writers to the same
//! file serialize on an `fs2` lock file, which also holds across processes.

use crate::error::StoreError;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Get the ~/.hunter/ directory path, creating it if needed.
pub fn hunter_dir() -> Result<PathBuf, StoreError> {
    let home_dir = dirs::home_dir().ok_or(StoreError::MissingHomeDir)?;
    let dir = home_dir.join(".hunter");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Load a JSON file, returning `T::default()` if it is missing or invalid.
pub fn load_json_or_default<T: Default + DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid JSON in {}: {}", path.display(), e);
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Serialize a value as pretty-printed JSON.
pub fn to_pretty_json<T: Serialize>(data: &T) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Write `contents` to `path` via a sibling temp file and a rename, so a
/// reader never observes a half-written file. Each call gets its own temp
/// name.
pub async fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(
        "{}.{}.{}.tmp",
        file_name,
        std::process::id(),
        Uuid::new_v4().simple()
    ));

    let mut file = tokio::fs::File::create(&tmp).await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;
    drop(file);

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

/// An exclusive advisory lock on a lock file. Released when dropped.
#[derive(Debug)]
pub struct FileLock {
    _file: fs::File,
}

/// Blocks (on the blocking pool) until an exclusive lock on `path` is held.
/// The lock file is created if needed and never removed, so every process
/// agrees on the same inode.
pub async fn lock_exclusive(path: &Path) -> Result<FileLock, StoreError> {
    let path = path.to_path_buf();
    let file = tokio::task::spawn_blocking(move || -> std::io::Result<fs::File> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        FileExt::lock_exclusive(&file)?;
        Ok(file)
    })
    .await
    .map_err(std::io::Error::other)??;
    Ok(FileLock { _file: file })
}
