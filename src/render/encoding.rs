//! Text encoding for the standard Type1 fonts.

use unicode_normalization::UnicodeNormalization;

/// Byte used for characters WinAnsiEncoding cannot represent.
const REPLACEMENT: u8 = b'?';

/// Encode `text` as WinAnsiEncoding bytes.
///
/// Text is NFC-normalized first so decomposed accents (common in file
/// names coming from macOS) map onto their Latin-1 code points.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.nfc()
        .map(|c| win_ansi_byte(c).unwrap_or(REPLACEMENT))
        .collect()
}

/// Check whether every character of `text` has a WinAnsi code.
pub fn is_win_ansi(text: &str) -> bool {
    text.nfc().all(|c| win_ansi_byte(c).is_some())
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    if (0x20..=0x7E).contains(&code) || (0xA0..=0xFF).contains(&code) {
        return Some(code as u8);
    }
    let byte = match c {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(encode_win_ansi("Problem 1"), b"Problem 1");
        assert!(is_win_ansi("Problem 1"));
    }

    #[test]
    fn test_latin1_and_specials() {
        assert_eq!(encode_win_ansi("é"), [0xE9]);
        assert_eq!(encode_win_ansi("a–b"), [b'a', 0x96, b'b']);
        assert_eq!(encode_win_ansi("€5"), [0x80, b'5']);
    }

    #[test]
    fn test_decomposed_accent_is_composed() {
        // "e" + COMBINING ACUTE ACCENT
        assert_eq!(encode_win_ansi("Caf\u{0065}\u{0301}"), b"Caf\xE9");
    }

    #[test]
    fn test_unmappable_replaced() {
        assert_eq!(encode_win_ansi("x²→y"), [b'x', 0xB2, b'?', b'y']);
        assert!(!is_win_ansi("数学"));
        assert_eq!(encode_win_ansi("数学"), b"??");
    }
}
