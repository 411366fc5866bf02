//! Structured error types shared across xyz-grid crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`XyzError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (paths, counts, axis labels).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Adds the `path` context entry.
    pub fn with_path(self, path: &Path) -> Self {
        self.with_context("path", path.display().to_string())
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for xyz-grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum XyzError {
    /// Fewer source images than the requested sample count.
    #[error("capacity error: {0}")]
    Capacity(ErrorInfo),
    /// No captions could be harvested.
    #[error("caption error: {0}")]
    Caption(ErrorInfo),
    /// Sampling without replacement cannot satisfy the request.
    #[error("sampling error: {0}")]
    Sampling(ErrorInfo),
    /// Corpus file missing or unparseable where it is required.
    #[error("corpus load error: {0}")]
    CorpusLoad(ErrorInfo),
    /// Axis type label outside the fixed enumeration.
    #[error("axis type error: {0}")]
    AxisType(ErrorInfo),
    /// Synthesis backend failure.
    #[error("backend error: {0}")]
    Backend(ErrorInfo),
    /// A record that cannot be executed as stored.
    #[error("record error: {0}")]
    Record(ErrorInfo),
    /// Filesystem failures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl XyzError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            XyzError::Capacity(info)
            | XyzError::Caption(info)
            | XyzError::Sampling(info)
            | XyzError::CorpusLoad(info)
            | XyzError::AxisType(info)
            | XyzError::Backend(info)
            | XyzError::Record(info)
            | XyzError::Io(info)
            | XyzError::Serde(info) => info,
        }
    }

    /// Wraps a filesystem error for `path` under the given code.
    pub fn io(code: &str, path: &Path, err: impl ToString) -> Self {
        XyzError::Io(ErrorInfo::new(code, err.to_string()).with_path(path))
    }
}
