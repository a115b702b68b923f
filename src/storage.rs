//! Local snapshot persistence.
//!
//! The whole item collection is serialized as one JSON array into a single
//! file: read once at startup, rewritten in full on every mutation. There is
//! no journal and no partial write; the latest snapshot always wins.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::constants::{APP_DIR_NAME, SNAPSHOT_FILE_NAME};
use crate::entities::item::TodoItem;

/// Whole-collection snapshot store backed by one JSON file.
#[derive(Clone, Debug)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Create a store writing to the given file path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a store at the default platform location.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Default snapshot path under the platform data directory.
    pub fn default_path() -> Result<PathBuf> {
        dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join(APP_DIR_NAME).join(SNAPSHOT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot; a missing file yields an empty collection.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn load(&self) -> Result<Vec<TodoItem>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read snapshot file: {}", self.path.display()))?;
        let items: Vec<TodoItem> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot file: {}", self.path.display()))?;
        Ok(items)
    }

    /// Overwrite the snapshot with the full collection.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written
    pub fn save(&self, items: &[TodoItem]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create snapshot directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(items).context("Failed to serialize items")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write snapshot file: {}", self.path.display()))?;
        Ok(())
    }
}
