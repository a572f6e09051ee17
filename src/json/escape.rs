//! Conversion of raw text into JSON string literal bodies.

/// Escapes `value` for use inside a JSON string literal.
///
/// Double quotes and backslashes gain a backslash prefix; backspace,
/// form feed, line feed, carriage return and tab use their two-character
/// escapes; any other control character below U+0020 is written as a
/// `\u00XX` escape. All remaining characters pass through unchanged, so
/// the result parses back to `value` under any compliant JSON parser.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\u{0008}' => escaped.push_str("\\b"),
            '\u{000c}' => escaped.push_str("\\f"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c < ' ' => escaped.push_str(&format!("\\u{:04x}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape;

    #[test]
    fn quotes_and_backslashes() {
        assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape(r"a\b"), r"a\\b");
    }

    #[test]
    fn short_escapes() {
        assert_eq!(escape("\u{8}\u{c}\n\r\t"), "\\b\\f\\n\\r\\t");
    }

    #[test]
    fn other_control_characters_use_four_hex_digits() {
        assert_eq!(escape("\u{1}"), "\\u0001");
        assert_eq!(escape("\u{1f}"), "\\u001f");
        assert_eq!(escape("a\u{0}b"), "a\\u0000b");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(escape("hello, wörld/[]{}"), "hello, wörld/[]{}");
        assert_eq!(escape(""), "");
    }
}
