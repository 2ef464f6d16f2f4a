use super::codec::{check_version, ENVELOPE_VERSION};
use super::descriptor::PromptDescriptor;
use crate::error::PromptError;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub id: Uuid,
    pub descriptor: PromptDescriptor,
}

/// Persisted prompt state of one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSnapshot {
    #[serde(default)]
    pub version: u32,
    /// Seconds since the Unix epoch of the last save; 0 if never saved.
    #[serde(default)]
    pub saved_at: u64,
    #[serde(default)]
    pub entries: Vec<SnapshotEntry>,
}

impl Default for PromptSnapshot {
    fn default() -> Self {
        Self {
            version: ENVELOPE_VERSION,
            saved_at: 0,
            entries: Vec::new(),
        }
    }
}

impl PromptSnapshot {
    pub fn insert(&mut self, descriptor: PromptDescriptor) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push(SnapshotEntry { id, descriptor });
        id
    }

    pub fn get(&self, id: Uuid) -> Option<&PromptDescriptor> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| &e.descriptor)
    }

    /// Swaps in a new value for an existing entry. Returns false if `id` is unknown.
    pub fn replace(&mut self, id: Uuid, descriptor: PromptDescriptor) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.descriptor = descriptor;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: Uuid) -> Option<PromptDescriptor> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos).descriptor)
    }

    pub fn by_kind(&self, kind: &str) -> Vec<&SnapshotEntry> {
        let kind = kind.trim();
        self.entries
            .iter()
            .filter(|e| {
                e.descriptor
                    .prompt_kind()
                    .is_some_and(|k| k.trim().eq_ignore_ascii_case(kind))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// JSON file holding a [`PromptSnapshot`].
pub struct PromptStore {
    path: PathBuf,
}

impl PromptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<PromptSnapshot, PromptError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No prompt state at '{}', starting empty", self.path.display());
                return Ok(PromptSnapshot::default());
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot: PromptSnapshot = serde_json::from_str(&raw)?;
        check_version(snapshot.version)?;
        log::debug!(
            "Loaded {} prompt(s) from '{}'",
            snapshot.len(),
            self.path.display()
        );
        Ok(snapshot)
    }

    /// Writes a stamped copy of the snapshot and returns its `saved_at`.
    ///
    /// The body goes to a sibling temp file that is synced before it is renamed
    /// over the target, so the target is either the old or the new state. The
    /// temp file is removed on any failure.
    pub async fn save(&self, snapshot: &PromptSnapshot) -> Result<u64, PromptError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let stamped = PromptSnapshot {
            version: ENVELOPE_VERSION,
            saved_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
            entries: snapshot.entries.clone(),
        };
        let body = serde_json::to_string_pretty(&stamped)?;

        let tmp = self.temp_path();
        if let Err(e) = write_and_replace(&tmp, &self.path, body.as_bytes()).await {
            log::warn!("Failed to save prompt state via '{}': {}", tmp.display(), e);
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    log::warn!("Could not remove '{}': {}", tmp.display(), cleanup);
                }
            }
            return Err(e.into());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = sync_dir(parent).await {
                log::debug!("Could not sync directory '{}': {}", parent.display(), e);
            }
        }

        log::info!(
            "💾 Saved {} prompt(s) to '{}'",
            stamped.len(),
            self.path.display()
        );
        Ok(stamped.saved_at)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "prompt_state".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

async fn write_and_replace(tmp: &Path, target: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(tmp).await?;
    file.write_all(body).await?;
    file.sync_all().await?;
    drop(file);
    fs::rename(tmp, target).await
}

// Makes the rename durable.
#[cfg(unix)]
async fn sync_dir(dir: &Path) -> std::io::Result<()> {
    fs::File::open(dir).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}
