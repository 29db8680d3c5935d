//! In-process store
//!
//! Same contract as the file store without touching disk. Keeps a flush
//! counter per file and can be told to fail writes.

use anyhow::{bail, Result};
use std::collections::HashMap;
use tracing::warn;

use super::ini::IniDocument;
use super::SettingsStore;
use crate::setting::IniFile;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: HashMap<IniFile, IniDocument>,
    flushes: HashMap<IniFile, usize>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding of a raw value, entries the ini format cannot hold are skipped
    pub fn with_value(mut self, file: IniFile, section: &str, key: &str, value: &str) -> Self {
        if let Err(e) = self.documents.entry(file).or_default().set(section, key, value) {
            warn!(error = %e, "Skipping seeded value");
        }
        self
    }

    /// Makes every following write and flush return an error
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful flushes for `file`
    pub fn flush_count(&self, file: IniFile) -> usize {
        self.flushes.get(&file).copied().unwrap_or(0)
    }

    /// Rendered ini text for `file`
    pub fn contents(&self, file: IniFile) -> String {
        self.documents
            .get(&file)
            .map(IniDocument::render)
            .unwrap_or_default()
    }
}

impl SettingsStore for MemoryStore {
    fn read_string(&self, file: IniFile, section: &str, key: &str) -> Option<String> {
        self.documents
            .get(&file)?
            .get(section, key)
            .map(str::to_string)
    }

    fn write_string(&mut self, file: IniFile, section: &str, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            bail!("Write to {} rejected: [{}] {}", file, section, key);
        }
        self.documents.entry(file).or_default().set(section, key, value)
    }

    fn flush(&mut self, file: IniFile) -> Result<()> {
        if self.fail_writes {
            bail!("Flush of {} rejected", file);
        }
        *self.flushes.entry(file).or_insert(0) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_value_seeds_store() {
        let store = MemoryStore::new().with_value(IniFile::Game, "Video", "Mode", "windowed");
        assert_eq!(
            store.read_string(IniFile::Game, "Video", "Mode").as_deref(),
            Some("windowed")
        );
        assert_eq!(store.flush_count(IniFile::Game), 0);
    }

    #[test]
    fn test_flush_counts_per_file() {
        let mut store = MemoryStore::new();
        store.flush(IniFile::Game).unwrap();
        store.flush(IniFile::Game).unwrap();
        store.flush(IniFile::Input).unwrap();
        assert_eq!(store.flush_count(IniFile::Game), 2);
        assert_eq!(store.flush_count(IniFile::Input), 1);
        assert_eq!(store.flush_count(IniFile::Engine), 0);
    }

    #[test]
    fn test_failing_writes_leave_store_untouched() {
        let mut store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(store.write_string(IniFile::Game, "Audio", "Volume", "1").is_err());
        assert!(store.flush(IniFile::Game).is_err());
        assert_eq!(store.read_string(IniFile::Game, "Audio", "Volume"), None);
        assert_eq!(store.contents(IniFile::Game), "");
    }
}
