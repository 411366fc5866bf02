//! Caption harvesting for corpus builds.
//!
//! Captions come from one of two places under a root directory:
//!
//! - image filenames: `input/a man and his dog_01.jpg` yields `a man and his dog`
//! - text sidecars: the first line of every `*.txt` file
//!
//! Traversal is recursive and visits entries sorted by file name.

#![deny(missing_docs)]

mod sniff;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

pub use sniff::{is_source_format, sniff_bytes, sniff_file};

/// Where captions are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionSource {
    /// Derive captions from the names of image files.
    Filename,
    /// Read the first line of `.txt` sidecar files.
    Sidecar,
}

impl CaptionSource {
    /// Selects the source from the `--filename-caption` toggle.
    pub fn from_filename_flag(filename_caption: bool) -> Self {
        if filename_caption {
            CaptionSource::Filename
        } else {
            CaptionSource::Sidecar
        }
    }
}

fn files_under(root: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
}

fn is_image_entry(entry: &DirEntry) -> bool {
    match sniff_file(entry.path()) {
        Ok(format) => format.is_some(),
        Err(err) => {
            tracing::debug!(path = %entry.path().display(), error = %err, "cannot sniff file");
            false
        }
    }
}

/// Counts the files under `root` whose content is a recognised image.
pub fn count_images(root: &Path) -> usize {
    files_under(root).filter(is_image_entry).count()
}

/// Caption encoded in an image file name: the stem up to the first `_`.
pub fn caption_from_filename(file_name: &Path) -> String {
    let stem = file_name
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.split_once('_') {
        Some((caption, _)) => caption.to_string(),
        None => stem,
    }
}

/// Captions derived from the names of every image file under `root`.
pub fn captions_from_filenames(root: &Path) -> Vec<String> {
    files_under(root)
        .filter(is_image_entry)
        .map(|entry| caption_from_filename(Path::new(entry.file_name())))
        .collect()
}

fn first_line(path: &Path) -> std::io::Result<String> {
    let mut line = String::new();
    BufReader::new(File::open(path)?).read_line(&mut line)?;
    Ok(line.trim_end().to_string())
}

/// First lines of every `.txt` file under `root`.
///
/// Files that cannot be read are logged and skipped.
pub fn captions_from_sidecars(root: &Path) -> Vec<String> {
    let mut captions = Vec::new();
    for entry in files_under(root) {
        if !entry.file_name().to_string_lossy().ends_with(".txt") {
            continue;
        }
        match first_line(entry.path()) {
            Ok(caption) => captions.push(caption),
            Err(err) => {
                tracing::warn!(path = %entry.path().display(), error = %err, "cannot read caption file");
            }
        }
    }
    captions
}

/// Harvests captions under `root` from the selected source.
pub fn harvest(root: &Path, source: CaptionSource) -> Vec<String> {
    match source {
        CaptionSource::Filename => captions_from_filenames(root),
        CaptionSource::Sidecar => captions_from_sidecars(root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_caption_drops_suffix_and_extension() {
        assert_eq!(
            caption_from_filename(Path::new("a man and his dog_01.jpg")),
            "a man and his dog"
        );
        assert_eq!(caption_from_filename(Path::new("a_b_c.png")), "a");
        assert_eq!(caption_from_filename(Path::new("portrait.webp")), "portrait");
        assert_eq!(caption_from_filename(Path::new("_leading.png")), "");
    }

    #[test]
    fn flag_selects_source() {
        assert_eq!(CaptionSource::from_filename_flag(true), CaptionSource::Filename);
        assert_eq!(CaptionSource::from_filename_flag(false), CaptionSource::Sidecar);
    }
}
