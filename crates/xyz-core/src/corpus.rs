//! Ordered record collections and their JSON persistence.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::errors::{ErrorInfo, XyzError};
use crate::record::Record;

/// Ordered sequence of records persisted as a single JSON array.
///
/// Order is insertion order. Duplicate records are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    records: Vec<Record>,
}

impl Corpus {
    /// Creates an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing record sequence.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when the corpus holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record at the end. Existing records are never touched.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Parses a corpus from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, XyzError> {
        serde_json::from_str(text)
            .map_err(|err| XyzError::CorpusLoad(ErrorInfo::new("corpus-parse", err.to_string())))
    }

    /// Loads a corpus from disk. A missing or malformed file is an error.
    pub fn load(path: &Path) -> Result<Self, XyzError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            XyzError::CorpusLoad(
                ErrorInfo::new("corpus-read", err.to_string())
                    .with_path(path)
                    .with_hint("create one with `xyz-grid build` or `xyz-grid append`"),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            XyzError::CorpusLoad(ErrorInfo::new("corpus-parse", err.to_string()).with_path(path))
        })
    }

    /// Loads a corpus from disk, starting empty when the file is missing or
    /// cannot be parsed.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(corpus) => corpus,
            Err(_) if !path.exists() => {
                tracing::debug!(path = %path.display(), "no corpus yet, starting empty");
                Self::new()
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "starting from an empty corpus");
                Self::new()
            }
        }
    }

    /// Writes the corpus to `path`, replacing any existing file.
    ///
    /// The JSON is written to a temporary file next to `path` and renamed over
    /// it, so readers see either the old or the new corpus.
    pub fn store(&self, path: &Path) -> Result<(), XyzError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|err| XyzError::io("corpus-mkdir", parent, err))?;
        let json = serde_json::to_vec(self).map_err(|err| {
            XyzError::Serde(ErrorInfo::new("corpus-serialize", err.to_string()).with_path(path))
        })?;
        let mut staged =
            NamedTempFile::new_in(parent).map_err(|err| XyzError::io("corpus-stage", parent, err))?;
        staged
            .write_all(&json)
            .and_then(|_| staged.as_file().sync_all())
            .map_err(|err| XyzError::io("corpus-write", path, err))?;
        staged
            .persist(path)
            .map_err(|err| XyzError::io("corpus-rename", path, err.error))?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<Record> for Corpus {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}
