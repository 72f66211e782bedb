//! File-based ProfileRepository implementation.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use progression_core::{LevelFormula, PlayerId, SkillProfile};

use crate::repository::{ProfileRecord, ProfileRepository, RepositoryError, Result};

const RECORD_EXTENSION: &str = "json";
const TEMP_SUFFIX: &str = ".tmp";
const BACKUP_SUFFIX: &str = ".bak";

/// File-based implementation of ProfileRepository.
///
/// Stores one pretty-printed JSON record per player as `{uuid}.json`.
///
/// # Save sequence
///
/// 1. Write the record to `{uuid}.json.tmp` and fsync it
/// 2. Rename the current `{uuid}.json` (if any) to `{uuid}.json.bak`
/// 3. Rename the temp file to `{uuid}.json`
/// 4. Remove the backup
///
/// A crash at any step leaves either the previous record, the backup, or the
/// new record on disk. `load` falls back to the backup when the current file
/// is missing or unreadable.
pub struct FileProfileRepository {
    base_dir: PathBuf,
    formula: LevelFormula,
}

impl FileProfileRepository {
    /// Create a repository rooted at `base_dir`. Nothing touches the disk
    /// until [`ProfileRepository::initialize`].
    pub fn new(base_dir: impl AsRef<Path>, formula: LevelFormula) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            formula,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the current record for `player`.
    pub fn profile_path(&self, player: &PlayerId) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", player, RECORD_EXTENSION))
    }

    pub fn backup_path(&self, player: &PlayerId) -> PathBuf {
        with_suffix(&self.profile_path(player), BACKUP_SUFFIX)
    }

    fn temp_path(&self, player: &PlayerId) -> PathBuf {
        with_suffix(&self.profile_path(player), TEMP_SUFFIX)
    }

    fn read_profile(&self, player: &PlayerId, path: &Path) -> Result<SkillProfile> {
        let bytes = fs::read(path)?;
        ProfileRecord::decode(&bytes, player, self.formula)
    }

    /// Rotate the current record out and move `temp` into place with
    /// `install`. A failed install puts the previous record back.
    fn replace_with_temp<F>(&self, path: &Path, temp: &Path, backup: &Path, install: F) -> Result<()>
    where
        F: FnOnce(&Path, &Path) -> io::Result<()>,
    {
        if path.exists() {
            fs::rename(path, backup)?;
        }

        if let Err(e) = install(temp, path) {
            if backup.exists()
                && let Err(restore) = fs::rename(backup, path)
            {
                tracing::error!(
                    "Failed to restore backup {}: {}",
                    backup.display(),
                    restore
                );
            }
            return Err(RepositoryError::Io(e));
        }

        if backup.exists()
            && let Err(e) = fs::remove_file(backup)
        {
            tracing::warn!("Failed to remove backup {}: {}", backup.display(), e);
        }
        Ok(())
    }

    fn write_record<F>(&self, player: &PlayerId, profile: &SkillProfile, install: F) -> Result<()>
    where
        F: FnOnce(&Path, &Path) -> io::Result<()>,
    {
        let path = self.profile_path(player);
        let temp = self.temp_path(player);
        let backup = self.backup_path(player);

        let bytes = ProfileRecord::from_profile(profile).encode()?;

        let result = write_synced(&temp, &bytes)
            .and_then(|()| self.replace_with_temp(&path, &temp, &backup, install));

        if result.is_err()
            && temp.exists()
            && let Err(e) = fs::remove_file(&temp)
        {
            tracing::warn!("Failed to remove temp file {}: {}", temp.display(), e);
        }
        result?;

        tracing::debug!("Saved profile[{}] to {}", player, path.display());
        Ok(())
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}

impl ProfileRepository for FileProfileRepository {
    fn initialize(&self) -> Result<()> {
        if self.base_dir.exists() {
            if !self.base_dir.is_dir() {
                return Err(RepositoryError::NotADirectory(self.base_dir.clone()));
            }
            return Ok(());
        }
        fs::create_dir_all(&self.base_dir)?;
        tracing::debug!("Created profile directory {}", self.base_dir.display());
        Ok(())
    }

    fn save(&self, player: &PlayerId, profile: &SkillProfile) -> Result<()> {
        self.write_record(player, profile, |from, to| fs::rename(from, to))
    }

    fn load(&self, player: &PlayerId) -> Result<Option<SkillProfile>> {
        let path = self.profile_path(player);
        let backup = self.backup_path(player);

        if !path.exists() {
            if backup.exists() {
                tracing::warn!("Profile[{}] missing, loading from backup", player);
                return self.read_profile(player, &backup).map(Some);
            }
            return Ok(None);
        }

        match self.read_profile(player, &path) {
            Ok(profile) => {
                tracing::debug!("Loaded profile[{}] from {}", player, path.display());
                Ok(Some(profile))
            }
            Err(primary) if backup.exists() => match self.read_profile(player, &backup) {
                Ok(profile) => {
                    tracing::warn!(
                        "Profile[{}] unreadable ({}), recovered from backup",
                        player,
                        primary
                    );
                    Ok(Some(profile))
                }
                Err(secondary) => {
                    tracing::debug!("Backup for profile[{}] also unreadable: {}", player, secondary);
                    Err(primary)
                }
            },
            Err(primary) => Err(primary),
        }
    }

    fn exists(&self, player: &PlayerId) -> bool {
        self.profile_path(player).exists()
    }
}
