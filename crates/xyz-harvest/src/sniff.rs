use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use image::ImageFormat;

const SNIFF_LEN: usize = 32;

/// Formats counted as source images.
pub fn is_source_format(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Jpeg
            | ImageFormat::Png
            | ImageFormat::Gif
            | ImageFormat::Bmp
            | ImageFormat::Tiff
            | ImageFormat::WebP
    )
}

/// Detects the image format of the bytes at the start of `head`.
pub fn sniff_bytes(head: &[u8]) -> Option<ImageFormat> {
    image::guess_format(head)
        .ok()
        .filter(|format| is_source_format(*format))
}

/// Detects whether the file at `path` holds an image, by content.
///
/// The extension is ignored. Unreadable files are reported as errors so the
/// caller can decide whether to log them.
pub fn sniff_file(path: &Path) -> io::Result<Option<ImageFormat>> {
    let mut head = Vec::with_capacity(SNIFF_LEN);
    File::open(path)?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut head)?;
    Ok(sniff_bytes(&head))
}
