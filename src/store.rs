// ABOUTME: Document persistence for the quickslides engine
// ABOUTME: A key-value style store holding the single document under a fixed key

use crate::errors::{Result, SlideError};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The one key the document lives under.
pub const DOCUMENT_KEY: &str = "quickslides-content";

/// Document shown when the store has nothing yet.
pub const DEFAULT_DOCUMENT: &str = "# QuickSlides\n\nType your slides here.\n\n---\n\n## Separate slides\n\nPut `---` on a line of its own between two slides.\n\n---\n\n![A cover image](https://picsum.photos/1600/900)\n\n---\n\n<div style=\"text-align:center\"><h1>Raw HTML works too</h1></div>\n";

pub trait DocumentStore {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, text: &str) -> Result<()>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    fn load(&self) -> Result<Option<String>> {
        (**self).load()
    }

    fn save(&self, text: &str) -> Result<()> {
        (**self).save(text)
    }
}

/// Load the stored document, or fall back to `default` when absent.
pub fn load_or_default(store: &dyn DocumentStore, default: &str) -> Result<String> {
    match store.load()? {
        Some(text) => Ok(text),
        None => {
            info!("No stored document, using default");
            Ok(default.to_string())
        }
    }
}

/// Keeps the document as `<dir>/<key>.md`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    key: String,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_key(dir, DOCUMENT_KEY)
    }

    pub fn with_key(dir: impl Into<PathBuf>, key: &str) -> Self {
        Self {
            dir: dir.into(),
            key: key.to_string(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.md", self.key))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentStore for FileStore {
    fn load(&self) -> Result<Option<String>> {
        let path = self.path();
        if !path.exists() {
            debug!("Store file {:?} does not exist", path);
            return Ok(None);
        }
        let text = fs::read_to_string(&path).map_err(SlideError::FileError)?;
        Ok(Some(text))
    }

    fn save(&self, text: &str) -> Result<()> {
        crate::utils::ensure_directory_exists(&self.dir)?;

        // Write next to the target and rename so a crash never leaves half a document.
        let temp = self
            .dir
            .join(format!(".{}.{}.tmp", self.key, uuid::Uuid::new_v4()));
        fs::write(&temp, text).map_err(SlideError::FileError)?;
        if let Err(e) = fs::rename(&temp, self.path()) {
            if let Err(cleanup) = fs::remove_file(&temp) {
                warn!("Failed to clean up temp file {:?}: {}", temp, cleanup);
            }
            return Err(SlideError::StoreError(format!(
                "Failed to replace {:?}: {}",
                self.path(),
                e
            )));
        }
        debug!("Saved {} bytes to {:?}", text.len(), self.path());
        Ok(())
    }
}

/// In-process store, mostly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.entries.lock().get(DOCUMENT_KEY).cloned())
    }

    fn save(&self, text: &str) -> Result<()> {
        self.entries
            .lock()
            .insert(DOCUMENT_KEY.to_string(), text.to_string());
        Ok(())
    }
}
