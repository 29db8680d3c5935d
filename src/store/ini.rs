//! Line-preserving ini codec
//!
//! Handles the flat layout used by the backing files:
//!
//! ```text
//! ; comment
//! [Section]
//! Key=Value
//! ```
//!
//! Comments, blank lines and lines that are not `key=value` pairs are kept
//! verbatim so a rewrite only changes the values that were set.

use anyhow::{bail, Result};

use crate::constants::ini::{COMMENT_PREFIXES, KEY_VALUE_SEPARATOR};

#[derive(Debug, Clone, PartialEq)]
enum Line {
    Entry { key: String, value: String },
    /// Blank line, comment or anything unparsable
    Verbatim(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Section {
    name: String,
    lines: Vec<Line>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            lines: Vec::new(),
        }
    }

    fn ends_with_blank(&self) -> bool {
        matches!(self.lines.last(), Some(Line::Verbatim(text)) if text.trim().is_empty())
    }

    /// Insert position for a new key: right after the last non-blank line
    fn insert_position(&self) -> usize {
        self.lines
            .iter()
            .rposition(|line| !matches!(line, Line::Verbatim(text) if text.trim().is_empty()))
            .map(|idx| idx + 1)
            .unwrap_or(0)
    }
}

/// Parsed ini file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IniDocument {
    /// Lines before the first section header
    preamble: Vec<String>,
    sections: Vec<Section>,
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsing never fails: unrecognized lines are carried along untouched
    pub fn parse(contents: &str) -> Self {
        let mut doc = Self::new();

        for raw in contents.lines() {
            let trimmed = raw.trim();

            if let Some(name) = trimmed.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
                doc.sections.push(Section::new(name.trim()));
                continue;
            }

            let Some(section) = doc.sections.last_mut() else {
                doc.preamble.push(raw.to_string());
                continue;
            };

            let line = if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIXES) {
                Line::Verbatim(raw.to_string())
            } else if let Some((key, value)) = trimmed.split_once(KEY_VALUE_SEPARATOR) {
                Line::Entry {
                    key: key.trim().to_string(),
                    value: value.trim().to_string(),
                }
            } else {
                Line::Verbatim(raw.to_string())
            };
            section.lines.push(line);
        }

        doc
    }

    /// Renders the document back to text, always ending with a newline
    pub fn render(&self) -> String {
        let mut out = String::new();

        for line in &self.preamble {
            out.push_str(line);
            out.push('\n');
        }

        for section in &self.sections {
            out.push('[');
            out.push_str(&section.name);
            out.push_str("]\n");
            for line in &section.lines {
                match line {
                    Line::Entry { key, value } => {
                        out.push_str(key);
                        out.push(KEY_VALUE_SEPARATOR);
                        out.push_str(value);
                    }
                    Line::Verbatim(text) => out.push_str(text),
                }
                out.push('\n');
            }
        }

        out
    }

    /// First value stored under `key` in the first `[section]`
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.name == section)?
            .lines
            .iter()
            .find_map(|line| match line {
                Line::Entry { key: k, value } if k == key => Some(value.as_str()),
                _ => None,
            })
    }

    /// Overwrites the first matching entry, or appends one (and its section if needed)
    ///
    /// Fails without touching the document if the entry would read back as
    /// something else, such as a key containing `=`.
    pub fn set(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        check_entry(section, key, value)?;

        let idx = match self.sections.iter().position(|s| s.name == section) {
            Some(idx) => idx,
            None => {
                // Keep a blank line between the previous section and the new one
                if let Some(last) = self.sections.last_mut() {
                    if !last.ends_with_blank() {
                        last.lines.push(Line::Verbatim(String::new()));
                    }
                }
                self.sections.push(Section::new(section));
                self.sections.len() - 1
            }
        };
        let section = &mut self.sections[idx];

        for line in section.lines.iter_mut() {
            if let Line::Entry { key: k, value: v } = line {
                if k == key {
                    *v = value.to_string();
                    return Ok(());
                }
            }
        }

        let pos = section.insert_position();
        section.lines.insert(
            pos,
            Line::Entry {
                key: key.to_string(),
                value: value.to_string(),
            },
        );
        Ok(())
    }
}

/// Rejects entries the line format cannot represent
///
/// Parsing trims names, splits on the first `=` and treats `[`, `;` and `#`
/// at the start of a line as markup, so names that break those rules would
/// be rewritten as a different entry.
fn check_entry(section: &str, key: &str, value: &str) -> Result<()> {
    if section.contains([']', '\n', '\r']) || section.trim() != section {
        bail!("Section name {:?} cannot be stored in an ini file", section);
    }

    if key.contains([KEY_VALUE_SEPARATOR, '\n', '\r'])
        || key.trim() != key
        || key.starts_with(COMMENT_PREFIXES)
        || key.starts_with('[')
    {
        bail!("Key {:?} in [{}] cannot be stored in an ini file", key, section);
    }

    if value.contains(['\n', '\r']) {
        bail!("Value for [{}] {} spans several lines", section, key);
    }

    Ok(())
}

/// Formats a float the way it is written to disk: whole numbers without a decimal point
pub fn format_float(value: f32) -> String {
    value.to_string()
}
