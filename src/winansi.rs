//! WinAnsi (Windows-1252) mapping used by the built-in PDF fonts.
//!
//! Card text is drawn with the standard Helvetica font, which can only show
//! characters from this code page. Anything else is replaced with
//! [`REPLACEMENT`] before drawing, and inspection maps bytes back with the
//! same table.

use std::borrow::Cow;

/// Character drawn in place of text the built-in fonts cannot show.
pub const REPLACEMENT: char = '?';

/// Code points of bytes 0x80..=0x9F; `None` marks undefined slots.
const HIGH_CONTROL_RANGE: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

/// Returns the WinAnsi byte for `c`, if the code page has one.
pub fn encode_char(c: char) -> Option<u8> {
    match c as u32 {
        code @ (0x20..=0x7E | 0xA0..=0xFF) => Some(code as u8),
        _ => HIGH_CONTROL_RANGE
            .iter()
            .position(|slot| *slot == Some(c))
            .map(|index| 0x80 + index as u8),
    }
}

/// Maps a WinAnsi byte back to its character.
pub fn decode_byte(byte: u8) -> char {
    match byte {
        0x80..=0x9F => HIGH_CONTROL_RANGE[usize::from(byte - 0x80)].unwrap_or(REPLACEMENT),
        _ => char::from(byte),
    }
}

/// Decodes WinAnsi bytes into a string.
pub fn decode(bytes: &[u8]) -> String {
    bytes.iter().copied().map(decode_byte).collect()
}

/// Replaces every character WinAnsi cannot represent with [`REPLACEMENT`].
pub fn printable(text: &str) -> Cow<'_, str> {
    if text.chars().all(|c| encode_char(c).is_some()) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(
            text.chars()
                .map(|c| if encode_char(c).is_some() { c } else { REPLACEMENT })
                .collect(),
        )
    }
}
