use crate::error::{StoreError, StoreResult};
use crate::model::{MemberType, Post, Profile, Subscription, User};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Every table of the store, as written to the data file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub member_types: Vec<MemberType>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

impl Snapshot {
    /// Read a snapshot, or `None` if the file does not exist yet.
    pub fn read(path: &Path) -> StoreResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Snapshot(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let snapshot = serde_json::from_str(&content).map_err(|e| {
            StoreError::Snapshot(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Ok(Some(snapshot))
    }

    /// Replace the file atomically: write a sibling temp file, then rename it over `path`.
    pub fn write(&self, path: &Path) -> StoreResult<()> {
        let target_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(target_dir)
            .map_err(|e| StoreError::Snapshot(format!("Failed to create data dir: {}", e)))?;

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| StoreError::Snapshot(format!("Failed to encode snapshot: {}", e)))?;

        let mut temp_file = NamedTempFile::new_in(target_dir)
            .map_err(|e| StoreError::Snapshot(format!("Failed to create temp file: {}", e)))?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| StoreError::Snapshot(format!("Failed to write temp file: {}", e)))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| StoreError::Snapshot(format!("Failed to sync temp file: {}", e)))?;
        temp_file
            .persist(path)
            .map_err(|e| StoreError::Snapshot(format!("Failed to persist temp file: {}", e)))?;

        Ok(())
    }
}
