//! Replacement mapping loading.
//!
//! A mapping file is either CSV (columns `original` and `replacement`) or a
//! flat JSON object. Both formats produce the same [`Mapping`] type, so the
//! transform step never needs to know which format the user supplied.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};

/// The set of original -> replacement label pairs driving the substitution.
///
/// Keys and values are whitespace-trimmed at load time. A mapping is built
/// once per run and never modified afterwards.
#[derive(Debug, Default)]
pub struct Mapping {
    entries: HashMap<String, String>,
}

impl Mapping {
    /// Load a mapping from a `.csv` or `.json` file, dispatching on the
    /// file extension (case-insensitive).
    ///
    /// The extension is checked before the file is opened, so an unsupported
    /// format is reported even when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Self::parse_csv(path, &read_file(path)?),
            Some("json") => Self::parse_json(path, &read_file(path)?),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Look up the replacement for a trimmed original label.
    pub fn get(&self, original: &str) -> Option<&str> {
        self.entries.get(original).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// CSV rows only contribute a pair when both fields are non-empty after
    /// trimming; anything else is skipped without an error.
    fn parse_csv(path: &Path, content: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|err| malformed(path, err))?
            .clone();
        let original_idx = headers.iter().position(|column| column == "original");
        let replacement_idx = headers.iter().position(|column| column == "replacement");
        let (Some(original_idx), Some(replacement_idx)) = (original_idx, replacement_idx) else {
            return Err(malformed(
                path,
                "the CSV must have columns: original,replacement",
            ));
        };

        let mut entries = HashMap::new();
        for record in reader.records() {
            let record = record.map_err(|err| malformed(path, err))?;
            let original = record.get(original_idx).unwrap_or("").trim();
            let replacement = record.get(replacement_idx).unwrap_or("").trim();
            if original.is_empty() || replacement.is_empty() {
                continue;
            }
            entries.insert(original.to_string(), replacement.to_string());
        }

        Ok(Self { entries })
    }

    /// JSON keeps every pair, including pairs whose trimmed value is empty.
    /// This asymmetry with the CSV loader is intentional.
    fn parse_json(path: &Path, content: &str) -> Result<Self> {
        let document: Value =
            serde_json::from_str(content).map_err(|err| malformed(path, err))?;
        let Value::Object(object) = document else {
            return Err(malformed(path, "the JSON must be one key-value object"));
        };

        let mut entries = HashMap::new();
        for (key, value) in object {
            let Value::String(replacement) = value else {
                return Err(malformed(
                    path,
                    format!("value for key {key:?} is not a string"),
                ));
            };
            entries.insert(key.trim().to_string(), replacement.trim().to_string());
        }

        Ok(Self { entries })
    }
}

/// Build a mapping from ready-made pairs. Entries are used as-is; only the
/// file loaders trim.
impl FromIterator<(String, String)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn malformed(path: &Path, reason: impl fmt::Display) -> Error {
    Error::MalformedMapping {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::MissingFile {
        path: path.to_path_buf(),
        source,
    })
}
