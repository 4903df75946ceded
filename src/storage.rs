//! Workspace persistence
//!
//! The open files and the active file id are written as one JSON document
//! at a path chosen by the embedder.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::DocumentId;

/// One stored file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: DocumentId,
    pub name: String,
    pub content: String,
}

/// Everything needed to restore a session
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    pub files: Vec<StoredFile>,
    #[serde(default)]
    pub active_id: Option<DocumentId>,
}

impl WorkspaceSnapshot {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Reads and writes [`WorkspaceSnapshot`]s at a fixed path
#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    path: PathBuf,
}

impl WorkspaceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the snapshot, creating parent directories as needed
    pub fn save(&self, snapshot: &WorkspaceSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(snapshot).context("serializing workspace")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("writing {}", self.path.display()))?;
        tracing::info!(
            files = snapshot.files.len(),
            "Saved workspace to {}",
            self.path.display()
        );
        Ok(())
    }

    /// Read the stored snapshot. A missing file is `Ok(None)`.
    pub fn load(&self) -> Result<Option<WorkspaceSnapshot>> {
        if !self.path.exists() {
            tracing::debug!("No workspace at {}", self.path.display());
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let snapshot = serde_json::from_str(&json)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let snapshot = WorkspaceSnapshot {
            files: vec![StoredFile {
                id: DocumentId(3),
                name: "a.js".into(),
                content: "x".into(),
            }],
            active_id: Some(DocumentId(3)),
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "files": [{"id": 3, "name": "a.js", "content": "x"}],
                "active_id": 3
            })
        );
    }

    #[test]
    fn test_missing_active_id_defaults() {
        let snapshot: WorkspaceSnapshot = serde_json::from_str(r#"{"files": []}"#).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.active_id, None);
    }
}
