//! Hex color strings: formatting, parsing and shortening.

use std::borrow::Cow;
use std::fmt::Write as FmtWrite;

/// Fill used for boxes grown beyond 1x1 when highlighting is enabled.
pub const HIGHLIGHT: &str = "#bb3388";

/// Color values that have a shorter SVG color name. Only exact attribute
/// values are replaced, see [`crate::minify`].
pub const NAMED_COLORS: &[(&str, &str)] = &[
    ("#f0ffff", "azure"),
    ("#f5f5dc", "beige"),
    ("#ffe4c4", "bisque"),
    ("#a52a2a", "brown"),
    ("#ff7f50", "coral"),
    ("#ffd700", "gold"),
    ("#808080", "gray"),
    ("#008000", "green"),
    ("#4b0082", "indigo"),
    ("#fffff0", "ivory"),
    ("#f0e68c", "khaki"),
    ("#faf0e6", "linen"),
    ("#800000", "maroon"),
    ("#000080", "navy"),
    ("#808000", "olive"),
    ("#ffa500", "orange"),
    ("#da70d6", "orchid"),
    ("#cd853f", "peru"),
    ("#ffc0cb", "pink"),
    ("#dda0dd", "plum"),
    ("#800080", "purple"),
    ("#f00", "red"),
    ("#fa8072", "salmon"),
    ("#a0522d", "sienna"),
    ("#c0c0c0", "silver"),
    ("#fffafa", "snow"),
    ("#d2b48c", "tan"),
    ("#008080", "teal"),
    ("#ff6347", "tomato"),
    ("#ee82ee", "violet"),
    ("#f5deb3", "wheat"),
];

/// Formats a color as `#rrggbb` with lowercase digits.
pub fn to_hex(rgb: [u8; 3]) -> String {
    let mut s = String::with_capacity(7);
    write!(&mut s, "#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]).ok();
    s
}

/// Only the length is checked; the first character is assumed to be `#`.
fn is_long_hex(hex: &str) -> bool {
    hex.len() == 7 && hex.is_ascii()
}

fn first_digits(hex: &str) -> String {
    let b = hex.as_bytes();
    ['#', b[1] as char, b[3] as char, b[5] as char]
        .iter()
        .collect()
}

/// Shortens `#aabbcc` to `#abc` when no precision is lost, that is when both
/// digits of every channel are equal. Anything else is returned unchanged.
pub fn shorten_lossless(hex: &str) -> Cow<'_, str> {
    if !is_long_hex(hex) {
        return Cow::Borrowed(hex);
    }
    let b = hex.as_bytes();
    if b[1] == b[2] && b[3] == b[4] && b[5] == b[6] {
        Cow::Owned(first_digits(hex))
    } else {
        Cow::Borrowed(hex)
    }
}

/// Shortens `#rrggbb` to `#rgb` by keeping the first digit of each channel.
/// Inputs that are not 7 characters long are returned unchanged.
pub fn shorten_lossy(hex: &str) -> Cow<'_, str> {
    if is_long_hex(hex) {
        Cow::Owned(first_digits(hex))
    } else {
        Cow::Borrowed(hex)
    }
}

/// Parses `#rgb` or `#rrggbb` into its channels. `#abc` expands to `#aabbcc`.
pub fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => {
            let mut rgb = [0; 3];
            for (i, c) in digits.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                rgb[i] = v * 16 + v;
            }
            Some(rgb)
        }
        6 => Some([
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_lowercase_hex() {
        assert_eq!(to_hex([10, 20, 30]), "#0a141e");
        assert_eq!(to_hex([255, 255, 255]), "#ffffff");
    }

    #[test]
    fn lossless_only_shortens_doubled_digits() {
        assert_eq!(shorten_lossless("#aabbcc"), "#abc");
        assert_eq!(shorten_lossless("#ffffff"), "#fff");
        assert_eq!(shorten_lossless("#123456"), "#123456");
        assert_eq!(shorten_lossless("#0c0000"), "#0c0000");
        assert_eq!(shorten_lossless("#aabbcd"), "#aabbcd");
    }

    #[test]
    fn lossless_shortening_round_trips() {
        let short = shorten_lossless("#aabbcc");
        assert_eq!(parse_hex(&short), parse_hex("#aabbcc"));
        assert_eq!(parse_hex(&short), Some([0xaa, 0xbb, 0xcc]));
    }

    #[test]
    fn lossy_keeps_first_digits() {
        assert_eq!(shorten_lossy("#0c0000"), "#000");
        assert_eq!(shorten_lossy("#112233"), "#123");
        assert_eq!(shorten_lossy("#ffffff"), "#fff");
    }

    #[test]
    fn other_lengths_pass_through() {
        for input in ["#abc", "red", "", "#abcdef0"] {
            assert_eq!(shorten_lossless(input), input);
            assert_eq!(shorten_lossy(input), input);
        }
    }

    #[test]
    fn shortening_only_looks_at_the_length() {
        assert_eq!(shorten_lossless("xaabbcc"), "#abc");
        assert_eq!(shorten_lossy("x0c0000"), "#000");
    }

    #[test]
    fn parses_short_and_long_forms() {
        assert_eq!(parse_hex("#0a141e"), Some([10, 20, 30]));
        assert_eq!(parse_hex("#f00"), Some([255, 0, 0]));
        assert_eq!(parse_hex("#ggg"), None);
        assert_eq!(parse_hex("0a141e"), None);
    }

    #[test]
    fn named_colors_match_their_values() {
        for (hex, _) in NAMED_COLORS {
            assert!(parse_hex(hex).is_some(), "{hex} should parse");
        }
        assert!(NAMED_COLORS.iter().all(|(hex, name)| name.len() < hex.len()));
    }
}
