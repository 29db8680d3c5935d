//! Ini files on disk
//!
//! Every backing file is read once when the store is opened. Edits made to the
//! files afterwards by other programs are not picked up.
//!
//! A failed flush drops the writes it was meant to save, so the cache never
//! holds values that are not on disk once the flush returns.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::ini::IniDocument;
use super::SettingsStore;
use crate::config::StoreConfig;
use crate::setting::IniFile;

#[derive(Debug, Default)]
struct CachedFile {
    document: IniDocument,
    /// Document as it was last read from or written to disk
    saved: IniDocument,
    dirty: bool,
}

impl CachedFile {
    fn loaded(document: IniDocument) -> Self {
        Self {
            saved: document.clone(),
            document,
            dirty: false,
        }
    }
}

/// Store backed by `<config_dir>/<IniFile>.ini`
#[derive(Debug)]
pub struct IniFileStore {
    config: StoreConfig,
    files: HashMap<IniFile, CachedFile>,
}

impl IniFileStore {
    /// Loads all backing files that exist
    ///
    /// A missing file starts out empty. A file that cannot be read is logged
    /// and also treated as empty; it will be overwritten on the next flush.
    pub fn open(config: StoreConfig) -> Self {
        let mut files = HashMap::new();

        for file in IniFile::ALL {
            let path = config.path_for(file);
            let document = match Self::load(&path) {
                Ok(Some(document)) => {
                    info!(path = %path.display(), "Loaded settings file");
                    document
                }
                Ok(None) => {
                    debug!(path = %path.display(), "Settings file not found, starting empty");
                    IniDocument::new()
                }
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Failed to load settings file, starting empty");
                    IniDocument::new()
                }
            };
            files.insert(file, CachedFile::loaded(document));
        }

        Self { config, files }
    }

    /// Opens the store in the directory chosen by `StoreConfig::from_env`
    pub fn open_default() -> Self {
        Self::open(StoreConfig::from_env())
    }

    fn load(path: &Path) -> Result<Option<IniDocument>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        Ok(Some(IniDocument::parse(&contents)))
    }

    fn save(path: &Path, document: &IniDocument) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        fs::write(path, document.render())
            .with_context(|| format!("Failed to write settings to {:?}", path))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn path_for(&self, file: IniFile) -> PathBuf {
        self.config.path_for(file)
    }

    /// True if `file` has writes that were not flushed yet
    pub fn is_dirty(&self, file: IniFile) -> bool {
        self.files.get(&file).is_some_and(|cached| cached.dirty)
    }
}

impl SettingsStore for IniFileStore {
    fn read_string(&self, file: IniFile, section: &str, key: &str) -> Option<String> {
        self.files
            .get(&file)?
            .document
            .get(section, key)
            .map(str::to_string)
    }

    fn write_string(&mut self, file: IniFile, section: &str, key: &str, value: &str) -> Result<()> {
        let cached = self.files.entry(file).or_default();
        cached.document.set(section, key, value)?;
        cached.dirty = true;
        Ok(())
    }

    fn flush(&mut self, file: IniFile) -> Result<()> {
        let path = self.config.path_for(file);
        let Some(cached) = self.files.get_mut(&file) else {
            return Ok(());
        };
        if !cached.dirty {
            return Ok(());
        }

        cached.dirty = false;
        match Self::save(&path, &cached.document) {
            Ok(()) => {
                cached.saved = cached.document.clone();
                info!(path = %path.display(), "Saved settings file");
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), "Discarding unsaved settings after failed write");
                cached.document = cached.saved.clone();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> IniFileStore {
        IniFileStore::open(StoreConfig::new(dir.path()))
    }

    #[test]
    fn test_open_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = IniFileStore::open(StoreConfig::new(dir.path().join("nested")));
        assert_eq!(store.read_string(IniFile::Game, "Audio", "Volume"), None);
    }

    #[test]
    fn test_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Input.ini"), "[Mouse]\nSensitivity=1.5\n").unwrap();

        let store = store_in(&dir);
        assert_eq!(store.read_float(IniFile::Input, "Mouse", "Sensitivity"), Some(1.5));
        assert_eq!(store.read_float(IniFile::Game, "Mouse", "Sensitivity"), None);
    }

    #[test]
    fn test_write_is_buffered_until_flush() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let path = store.path_for(IniFile::GameUserSettings);

        store.write_float(IniFile::GameUserSettings, "Audio", "Volume", 75.0).unwrap();
        assert!(store.is_dirty(IniFile::GameUserSettings));
        assert!(!path.exists());

        store.flush(IniFile::GameUserSettings).unwrap();
        assert!(!store.is_dirty(IniFile::GameUserSettings));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[Audio]\nVolume=75\n");
    }

    #[test]
    fn test_flush_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("Saved").join("Config");
        let mut store = IniFileStore::open(StoreConfig::new(&nested));

        store.write_string(IniFile::Engine, "Render", "Mode", "vulkan").unwrap();
        store.flush(IniFile::Engine).unwrap();

        assert!(nested.join("Engine.ini").exists());
    }

    #[test]
    fn test_flush_clean_file_does_not_touch_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.flush(IniFile::Game).unwrap();
        assert!(!dir.path().join("Game.ini").exists());
    }

    #[test]
    fn test_flush_keeps_unrelated_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Game.ini");
        fs::write(&path, "; hand edited\n[Other]\nKeep=me\n").unwrap();

        let mut store = store_in(&dir);
        store.write_string(IniFile::Game, "Video", "WindowMode", "windowed").unwrap();
        store.flush(IniFile::Game).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("; hand edited"));
        assert!(contents.contains("Keep=me"));
        assert!(contents.contains("WindowMode=windowed"));
    }

    #[test]
    fn test_failed_flush_rolls_back_pending_writes() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("Config");
        let mut store = IniFileStore::open(StoreConfig::new(&config_dir));

        store.write_float(IniFile::Game, "Audio", "Volume", 50.0).unwrap();
        store.flush(IniFile::Game).unwrap();

        // A regular file where the directory should be makes the next save fail
        fs::remove_dir_all(&config_dir).unwrap();
        fs::write(&config_dir, "").unwrap();

        store.write_float(IniFile::Game, "Audio", "Volume", 75.0).unwrap();
        assert!(store.flush(IniFile::Game).is_err());
        assert_eq!(store.read_float(IniFile::Game, "Audio", "Volume"), Some(50.0));
        assert!(!store.is_dirty(IniFile::Game));

        fs::remove_file(&config_dir).unwrap();
        store.write_float(IniFile::Game, "Video", "Gamma", 2.0).unwrap();
        store.flush(IniFile::Game).unwrap();

        assert_eq!(
            fs::read_to_string(config_dir.join("Game.ini")).unwrap(),
            "[Audio]\nVolume=50\n\n[Video]\nGamma=2\n"
        );
    }

    #[test]
    fn test_write_rejects_key_with_separator() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        assert!(store.write_string(IniFile::Game, "Paths", "a=b", "1").is_err());
        assert!(!store.is_dirty(IniFile::Game));
    }

    #[test]
    fn test_reopen_sees_flushed_values() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = store_in(&dir);
            store.write_float(IniFile::Game, "Audio", "Volume", 12.5).unwrap();
            store.flush(IniFile::Game).unwrap();
        }

        let store = store_in(&dir);
        assert_eq!(store.read_float(IniFile::Game, "Audio", "Volume"), Some(12.5));
    }
}
