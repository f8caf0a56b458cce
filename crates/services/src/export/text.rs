//! Text normalization for the single-byte PDF font encoding.

/// Substitute for characters the Latin-1 target cannot represent.
pub const REPLACEMENT: u8 = b'?';

/// Encode `text` for the summary document.
///
/// En-dashes become plain hyphens, then every character is mapped to its
/// Latin-1 byte. Anything above U+00FF degrades to `?`. The mapping is lossy
/// and never fails.
#[must_use]
pub fn to_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\u{2013}' => b'-',
            other => u8::try_from(u32::from(other)).unwrap_or(REPLACEMENT),
        })
        .collect()
}
