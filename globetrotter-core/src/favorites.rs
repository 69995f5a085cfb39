//! Favorites storage.
//!
//! The favorites view only reads the current set and asks for toggles; the store
//! owns the set and decides how it is kept.

use crate::error::GlobetrotterError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

pub trait FavoritesStore {
    /// Snapshot of every favorite country code
    fn ids(&self) -> HashSet<String>;

    fn contains(&self, id: &str) -> bool;

    /// Add the code if missing, remove it otherwise; returns whether it is now a favorite
    fn toggle(&mut self, id: &str) -> Result<bool, GlobetrotterError>;
}

fn toggle_in(set: &mut BTreeSet<String>, id: &str) -> bool {
    if set.remove(id) {
        false
    } else {
        set.insert(id.to_string());
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryFavorites {
    ids: BTreeSet<String>,
}

impl InMemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl FavoritesStore for InMemoryFavorites {
    fn ids(&self) -> HashSet<String> {
        self.ids.iter().cloned().collect()
    }

    fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    fn toggle(&mut self, id: &str) -> Result<bool, GlobetrotterError> {
        Ok(toggle_in(&mut self.ids, id))
    }
}

/// On-disk format of the favorites file
#[derive(Debug, Serialize, Deserialize)]
struct FavoritesFile {
    favorites: BTreeSet<String>,
    updated_at: OffsetDateTime,
}

/// Where an unreadable favorites file is kept, e.g. `favorites.json.corrupt`
fn corrupt_backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".corrupt");
    path.with_file_name(name)
}

/// Favorites persisted as JSON, written through on every toggle
#[derive(Debug)]
pub struct FileFavorites {
    path: PathBuf,
    ids: BTreeSet<String>,
}

impl FileFavorites {
    /// Open the favorites file, starting empty if it does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, GlobetrotterError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                info!(dir = %parent.display(), "Created favorites directory");
            }
        }

        let ids = if path.exists() {
            let content = fs::read_to_string(&path)?;
            match serde_json::from_str::<FavoritesFile>(&content) {
                Ok(file) => {
                    debug!(
                        path = %path.display(),
                        count = file.favorites.len(),
                        updated_at = %file.updated_at,
                        "Loaded favorites"
                    );
                    file.favorites
                }
                Err(e) => {
                    // Move it aside so the next save cannot overwrite it
                    let backup = corrupt_backup_path(&path);
                    fs::rename(&path, &backup)?;
                    warn!(
                        path = %path.display(),
                        backup = %backup.display(),
                        error = %e,
                        "Unreadable favorites file moved aside, starting empty"
                    );
                    BTreeSet::new()
                }
            }
        } else {
            debug!(path = %path.display(), "No favorites file yet");
            BTreeSet::new()
        };

        Ok(Self { path, ids })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), GlobetrotterError> {
        let file = FavoritesFile {
            favorites: self.ids.clone(),
            updated_at: OffsetDateTime::now_utc(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), count = self.ids.len(), "Saved favorites");
        Ok(())
    }
}

impl FavoritesStore for FileFavorites {
    fn ids(&self) -> HashSet<String> {
        self.ids.iter().cloned().collect()
    }

    fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    fn toggle(&mut self, id: &str) -> Result<bool, GlobetrotterError> {
        let now_favorite = toggle_in(&mut self.ids, id);
        if let Err(e) = self.save() {
            // Keep memory and disk in agreement
            toggle_in(&mut self.ids, id);
            return Err(e);
        }
        info!(id, favorite = now_favorite, "Toggled favorite");
        Ok(now_favorite)
    }
}

#[cfg(test)]
pub(crate) fn temp_path(name: &str) -> PathBuf {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    std::env::temp_dir()
        .join(format!("globetrotter-test-{}-{}", std::process::id(), nanos))
        .join(name)
}
