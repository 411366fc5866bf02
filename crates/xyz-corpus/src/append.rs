use std::path::Path;

use xyz_core::errors::XyzError;
use xyz_core::{Corpus, Record};

/// Appends `record` to the corpus at `path` and writes the result back.
///
/// A missing or unreadable corpus counts as empty. The record is stored as
/// given, without duplicate or prompt checks.
pub fn append_record(path: &Path, record: Record) -> Result<Corpus, XyzError> {
    let mut corpus = Corpus::load_or_empty(path);
    corpus.push(record);
    corpus.store(path)?;
    tracing::info!(records = corpus.len(), path = %path.display(), "record appended");
    Ok(corpus)
}
