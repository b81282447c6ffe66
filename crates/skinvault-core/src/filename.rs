//! Texture filename parsing
//!
//! Uploaded filenames carry the texture's logical name and its model variant:
//! `<name>_alex.png` or `<name>_steve.png`. The variant tag is matched
//! case-insensitively and always stored lowercase.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ParsedName, Variant};

static TEXTURE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.+)_(alex|steve)$").expect("texture name pattern is a valid regex")
});

/// Last path component of a client-supplied filename.
///
/// Clients are untrusted and may send either separator style.
fn base_name(filename: &str) -> &str {
    filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename)
}

/// Lowercased extension (text after the final dot), or an empty string.
pub fn file_extension(filename: &str) -> String {
    base_name(filename)
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Parse `<name>_<alex|steve>.<ext>` into its name and variant.
///
/// Returns `None` when the filename does not follow the pattern; callers treat
/// that as a validation failure for the single file, not as an error.
pub fn parse_texture_filename(filename: &str) -> Option<ParsedName> {
    let base = base_name(filename);
    let stem = base.rsplit_once('.').map_or(base, |(stem, _)| stem);

    let captures = TEXTURE_NAME_PATTERN.captures(stem)?;
    let name = captures.get(1)?.as_str().to_string();
    let variant = captures.get(2)?.as_str().parse::<Variant>().ok()?;

    Some(ParsedName { name, variant })
}
