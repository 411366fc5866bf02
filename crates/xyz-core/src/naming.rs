//! Deterministic artifact naming.
//!
//! Every executed record produces `<stem>.png` and `<stem>.txt` where the stem
//! is `<seq>-<seed>-<width>x<height>-<prompt>`.
//!
//! The prompt component is cut at [`PROMPT_COMPONENT_CHARS`] characters. When
//! multi-byte text would push the file name past [`MAX_FILE_NAME_BYTES`], it is
//! cut further on a character boundary and tagged with `~` and a short digest
//! of the full prompt.

use sha2::{Digest, Sha256};

/// Number of prompt characters kept in an artifact stem.
pub const PROMPT_COMPONENT_CHARS: usize = 100;

/// Longest file name, in bytes, accepted by common filesystems.
pub const MAX_FILE_NAME_BYTES: usize = 255;

// `.png` and `.txt`
const EXTENSION_BYTES: usize = 4;
// `~` plus eight hex digits
const DIGEST_SUFFIX_BYTES: usize = 9;

/// Returns the first [`PROMPT_COMPONENT_CHARS`] characters of `prompt`.
pub fn truncate_prompt(prompt: &str) -> &str {
    match prompt.char_indices().nth(PROMPT_COMPONENT_CHARS) {
        Some((byte_idx, _)) => &prompt[..byte_idx],
        None => prompt,
    }
}

/// Replaces characters that are unsafe in file names with `_`.
///
/// The mapping is one character to one character, so the result has as many
/// characters as the input.
pub fn sanitize_component(component: &str) -> String {
    component
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | '<' | '>' | ':' | '"' | '|' | '?' | '*' => '_',
            ch if ch.is_control() => '_',
            ch => ch,
        })
        .collect()
}

fn floor_char_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn prompt_digest(prompt: &str) -> String {
    Sha256::digest(prompt.as_bytes())[..4]
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// Builds the artifact stem for the 1-based sequence number `seq`.
///
/// `<stem>.png` never exceeds [`MAX_FILE_NAME_BYTES`] bytes.
pub fn artifact_stem(seq: usize, seed: i64, width: u32, height: u32, prompt: &str) -> String {
    let prefix = format!("{seq:04}-{seed}-{width}x{height}-");
    let component = sanitize_component(truncate_prompt(prompt));
    let budget = MAX_FILE_NAME_BYTES.saturating_sub(prefix.len() + EXTENSION_BYTES);
    if component.len() <= budget {
        return format!("{prefix}{component}");
    }
    let kept = floor_char_boundary(&component, budget.saturating_sub(DIGEST_SUFFIX_BYTES));
    format!("{prefix}{kept}~{}", prompt_digest(prompt))
}
