//! File-based save slot storage.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use adv_core::World;
use chrono::{DateTime, Local};

use crate::codec;
use crate::config::SaveConfig;
use crate::error::{SaveError, SaveResult};
use crate::slot::SlotName;

const EXTENSION: &str = "sav";

/// Summary of one save slot on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInfo {
    pub name: SlotName,
    pub path: PathBuf,
    pub modified: Option<DateTime<Local>>,
    /// World name from the save header, if readable.
    pub world_name: Option<String>,
    /// Declared format version, if readable.
    pub version: Option<u32>,
}

/// Save slots stored as `<dir>/<slot>.sav`.
///
/// Writes go to a temporary file that is renamed over the slot, so a failed
/// save never clobbers the previous one.
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store from a resolved configuration.
    pub fn from_config(config: &SaveConfig) -> Self {
        Self::new(config.dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing a slot.
    pub fn path_for(&self, slot: &SlotName) -> PathBuf {
        self.dir.join(format!("{slot}.{EXTENSION}"))
    }

    /// Whether a save exists for the slot.
    pub fn exists(&self, slot: &SlotName) -> bool {
        self.path_for(slot).is_file()
    }

    /// Write the world's state to a slot, replacing any previous save.
    pub fn save(&self, world: &World, slot: &SlotName, world_name: &str) -> SaveResult<PathBuf> {
        create_private_dir(&self.dir)?;

        let path = self.path_for(slot);
        let temp_path = path.with_extension("sav.tmp");

        fs::write(&temp_path, codec::encode(world, world_name))?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            fs::remove_file(&temp_path).ok();
            return Err(e.into());
        }

        tracing::debug!(slot = %slot, path = %path.display(), "saved game");
        Ok(path)
    }

    /// Restore a slot onto a copy of `base`.
    ///
    /// `base` is typically the live world; it is never modified, so a failed
    /// load leaves the game as it was. Returns the restored world and the world
    /// name recorded in the save.
    pub fn load(&self, base: &World, slot: &SlotName) -> SaveResult<(World, String)> {
        let path = self.path_for(slot);
        let text = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SaveError::NotFound(slot.to_string()),
            _ => SaveError::Io(e),
        })?;

        let snapshot = codec::decode(&text)?;
        let mut world = base.clone();
        codec::apply(&snapshot, &mut world)?;

        tracing::debug!(slot = %slot, version = snapshot.version, "loaded game");
        Ok((world, snapshot.world_name))
    }

    /// All slots in the directory, sorted by name. A missing directory has
    /// no slots.
    pub fn list(&self) -> SaveResult<Vec<SlotInfo>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut slots = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != EXTENSION) {
                continue;
            }
            let Some(name) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| SlotName::new(stem).ok())
            else {
                continue;
            };

            let modified = fs::metadata(&path)
                .and_then(|meta| meta.modified())
                .ok()
                .map(DateTime::<Local>::from);
            let (version, world_name) = fs::read_to_string(&path)
                .map(|text| peek_header(&text))
                .unwrap_or((None, None));

            slots.push(SlotInfo {
                name,
                path,
                modified,
                world_name,
                version,
            });
        }

        slots.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(slots)
    }

    /// Delete a slot.
    pub fn delete(&self, slot: &SlotName) -> SaveResult<()> {
        fs::remove_file(self.path_for(slot)).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SaveError::NotFound(slot.to_string()),
            _ => SaveError::Io(e),
        })?;
        tracing::debug!(slot = %slot, "deleted save");
        Ok(())
    }
}

/// Read the version and world name lines that precede the first section.
fn peek_header(text: &str) -> (Option<u32>, Option<String>) {
    let mut version = None;
    let mut world_name = None;
    for line in text.lines().map(str::trim) {
        if line.starts_with('[') {
            break;
        }
        if let Some(value) = line.strip_prefix("VERSION:") {
            version = value.trim().parse().ok();
        } else if let Some(value) = line.strip_prefix("WORLD:") {
            world_name = Some(value.trim().to_string());
        }
    }
    (version, world_name)
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}
