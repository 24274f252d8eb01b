//! Local snapshot persistence for the aggregate.
//!
//! The whole [`AppState`] is written as one versioned JSON document. Writes
//! go to a sibling temp file and are renamed into place; the last writer
//! wins. Loading merges with defaults, so fields added after a snapshot was
//! written come back empty instead of failing the load.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::store::AppState;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    state: AppState,
}

/// Serialize a state into the snapshot document.
pub fn encode_snapshot(state: &AppState, now: DateTime<Utc>) -> Result<Vec<u8>> {
    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        saved_at: Some(now),
        state: state.clone(),
    };
    serde_json::to_vec_pretty(&snapshot).context("Failed to serialize snapshot")
}

/// Parse a snapshot document. Documents without a version are read as version 1.
pub fn decode_snapshot(bytes: &[u8]) -> Result<AppState> {
    let snapshot: Snapshot =
        serde_json::from_slice(bytes).context("Snapshot is not valid JSON for this schema")?;
    if snapshot.version > SNAPSHOT_VERSION {
        bail!(
            "Snapshot version {} is newer than supported version {}",
            snapshot.version,
            SNAPSHOT_VERSION
        );
    }
    Ok(snapshot.state)
}

/// File-backed snapshot store.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored state. A missing file is an empty state.
    pub async fn load(&self) -> Result<AppState> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No snapshot found, starting empty");
                return Ok(AppState::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read snapshot {}", self.path.display()))
            }
        };

        let state = decode_snapshot(&bytes)
            .with_context(|| format!("Failed to load snapshot {}", self.path.display()))?;
        debug!(
            users = state.users.len(),
            recognitions = state.recognitions.len(),
            notifications = state.notifications.len(),
            "Snapshot loaded"
        );
        Ok(state)
    }

    pub async fn save(&self, state: &AppState, now: DateTime<Utc>) -> Result<()> {
        let bytes = encode_snapshot(state, now)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            warn!(error = %e, "Snapshot rename failed, removing temp file");
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e)
                .with_context(|| format!("Failed to replace {}", self.path.display()));
        }

        debug!(path = %self.path.display(), bytes = bytes.len(), "Snapshot saved");
        Ok(())
    }
}
