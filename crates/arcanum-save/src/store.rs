//! Save storage backends

use std::fs;
use std::path::{Path, PathBuf};

use arcanum_core::GameState;
use chrono::Utc;

use crate::error::{Error, Result};
use crate::{SaveFile, SAVE_VERSION};

/// Where save files live
///
/// Implementations persist one save slot. [`FileStore`] is the disk-backed
/// store; [`MemoryStore`] backs tests and ephemeral sessions.
pub trait SaveStore {
    /// Persist the state, replacing any previous save
    fn save(&mut self, state: &GameState) -> Result<()>;

    /// Load the save, if one exists
    fn load(&self) -> Result<Option<SaveFile>>;

    /// Delete the save
    fn clear(&mut self) -> Result<()>;

    fn exists(&self) -> bool;
}

/// A single RON save file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for FileStore {
    fn save(&mut self, state: &GameState) -> Result<()> {
        let file = SaveFile {
            version: SAVE_VERSION,
            saved_at: Utc::now(),
            state: state.clone(),
        };
        let body = ron::ser::to_string_pretty(&file, ron::ser::PrettyConfig::default())?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Write to a sibling then rename so a crash never truncates the save
        let tmp = self.path.with_extension("ron.tmp");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<SaveFile>> {
        let body = match fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let file: SaveFile = ron::from_str(&body)?;
        if file.version != SAVE_VERSION {
            return Err(Error::UnsupportedVersion(file.version));
        }
        Ok(Some(file))
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// In-memory save slot
#[derive(Debug, Default)]
pub struct MemoryStore {
    file: Option<SaveFile>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemoryStore {
    fn save(&mut self, state: &GameState) -> Result<()> {
        self.file = Some(SaveFile {
            version: SAVE_VERSION,
            saved_at: Utc::now(),
            state: state.clone(),
        });
        Ok(())
    }

    fn load(&self) -> Result<Option<SaveFile>> {
        Ok(self.file.clone())
    }

    fn clear(&mut self) -> Result<()> {
        self.file = None;
        Ok(())
    }

    fn exists(&self) -> bool {
        self.file.is_some()
    }
}
