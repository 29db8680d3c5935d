//! Persistent key/value backends
//!
//! Settings are addressed by (ini file, section, key). Writes are buffered
//! until `flush` is called for the file they touched.

use anyhow::Result;

use crate::setting::IniFile;

pub mod file;
pub mod ini;
pub mod memory;

pub use file::IniFileStore;
pub use ini::IniDocument;
pub use memory::MemoryStore;

/// Durable backend the registry reads from and writes through
pub trait SettingsStore {
    fn read_string(&self, file: IniFile, section: &str, key: &str) -> Option<String>;

    fn write_string(&mut self, file: IniFile, section: &str, key: &str, value: &str) -> Result<()>;

    /// Persists every buffered write for `file`
    ///
    /// On error the buffered writes are dropped, reads go back to the values
    /// that were last persisted.
    fn flush(&mut self, file: IniFile) -> Result<()>;

    /// Missing keys and values that do not parse as a number both read as `None`
    fn read_float(&self, file: IniFile, section: &str, key: &str) -> Option<f32> {
        self.read_string(file, section, key)?.trim().parse::<f32>().ok()
    }

    fn write_float(&mut self, file: IniFile, section: &str, key: &str, value: f32) -> Result<()> {
        self.write_string(file, section, key, &ini::format_float(value))
    }
}
