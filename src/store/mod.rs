//! # Store Module - Document Persistence Layer
//!
//! The whole application state lives in one JSON document at a fixed path.
//! Every logical operation is read-entire-document, mutate in memory,
//! write-entire-document; there is no partial update. Serializing those
//! cycles is the job of [`crate::pets::service::PetService`], not this module.
//!
//! Writes go through a uniquely named temp file in the same directory which
//! is flushed, fsynced, and renamed over the destination while an exclusive
//! `fs2` lock is held on the destination file. A reader never observes a
//! half-written document and two processes cannot interleave their writes.
//!
//! The [`DocumentStore`] trait keeps callers independent of the backing
//! store, so a future swap to a transactional database does not touch the
//! registry, purchase, or care logic.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use log::debug;
use tokio::fs;

use crate::pets::errors::PetError;
use crate::pets::types::Document;

/// Read and write access to the persisted document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return the persisted document, or an empty document if none exists yet.
    async fn load(&self) -> Result<Document, PetError>;

    /// Persist the full document, fully overwriting prior content.
    async fn save(&self, doc: &Document) -> Result<(), PetError>;
}

/// Flat-file JSON store. The makeshift database the whole app runs on.
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
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load(&self) -> Result<Document, PetError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => {
                let doc: Document = serde_json::from_str(&content)?;
                Ok(doc)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("data file {} absent, starting empty", self.path.display());
                Ok(Document::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, doc: &Document) -> Result<(), PetError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(doc)?;
        write_file_locked(&self.path, &json)?;
        Ok(())
    }
}

fn write_file_locked(path: &Path, content: &str) -> Result<(), PetError> {
    use std::fs::{File, OpenOptions};
    use std::io::Write;

    // Synchronous I/O here: fs2 locks don't compose with async file handles.
    // Step 1: open (or create) the destination to take an exclusive lock
    let lock_file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .open(path)?;

    lock_file.lock_exclusive()?;

    // Step 2: write a unique temp file in the same directory
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("data.json");
    let mut counter = 0u32;
    let tmp_path = loop {
        let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(mut tmp) => {
                tmp.write_all(content.as_bytes())?;
                tmp.flush()?;
                let _ = tmp.sync_all();
                break candidate;
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
                continue;
            }
            Err(e) => {
                let _ = FileExt::unlock(&lock_file);
                return Err(e.into());
            }
        }
    };

    // Step 3: atomically replace the destination
    let result = std::fs::rename(&tmp_path, path);
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
    }

    // Step 4: fsync the directory so the rename survives a crash
    if result.is_ok() {
        if let Ok(dir_handle) = File::open(dir) {
            let _ = dir_handle.sync_all();
        }
    }

    let _ = FileExt::unlock(&lock_file);
    result?;
    Ok(())
}
