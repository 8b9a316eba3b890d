//! tskv field escaping
//!
//! Records are tab-separated `key=value` pairs, so a handful of characters
//! must never appear raw inside a key or value: tab, newline, carriage
//! return, the `=` separator and the `\` escape character itself. Each is
//! replaced by its two-character escaped form. Key position additionally
//! rewrites `.` to `_` so dotted keys cannot be mistaken for nested
//! structure by downstream parsers.
//!
//! Numeric and hex renderings skip this module entirely; their alphabet
//! cannot collide with the reserved set.

use std::fmt;

/// Escaping applied to one appended value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// Verbatim output.
    None,
    /// Value position: the five reserved characters are escaped.
    #[default]
    Value,
    /// Key position: `Value` escaping plus `.` replaced by `_`.
    Key,
}

/// Escape `src` into `dst` under `mode`.
pub fn escape_into(dst: &mut String, src: &str, mode: EscapeMode) {
    if !needs_escaping(src, mode) {
        dst.push_str(src);
        return;
    }
    for c in src.chars() {
        escape_char_into(dst, c, mode);
    }
}

/// Escape a single character into `dst` under `mode`.
pub(crate) fn escape_char_into(dst: &mut String, c: char, mode: EscapeMode) {
    if mode == EscapeMode::None {
        dst.push(c);
        return;
    }
    match c {
        '\t' => dst.push_str("\\t"),
        '\n' => dst.push_str("\\n"),
        '\r' => dst.push_str("\\r"),
        '=' => dst.push_str("\\="),
        '\\' => dst.push_str("\\\\"),
        '.' if mode == EscapeMode::Key => dst.push('_'),
        c => dst.push(c),
    }
}

/// Escape `src` into a fresh string.
pub fn escape(src: &str, mode: EscapeMode) -> String {
    let mut out = String::with_capacity(src.len());
    escape_into(&mut out, src, mode);
    out
}

// All reserved characters are ASCII, so a byte scan is exact on UTF-8 input.
pub(crate) fn needs_escaping(src: &str, mode: EscapeMode) -> bool {
    if mode == EscapeMode::None {
        return false;
    }
    src.bytes().any(|b| {
        matches!(b, b'\t' | b'\n' | b'\r' | b'=' | b'\\')
            || (mode == EscapeMode::Key && b == b'.')
    })
}

/// Reverse of value-mode escaping.
///
/// A trailing lone `\` and unrecognized escape pairs are passed through
/// leniently; for any string produced by [`escape`] under
/// [`EscapeMode::Value`] this returns the original input.
pub fn unescape(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut chars = src.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('=') => out.push('='),
            Some('\\') => out.push('\\'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// `fmt::Write` bridge that escapes as it streams and stops consuming once
/// the record's size limit is reached.
pub(crate) struct EscapingWriter<'a> {
    dst: &'a mut String,
    mode: EscapeMode,
    limit: usize,
}

impl<'a> EscapingWriter<'a> {
    pub(crate) fn new(dst: &'a mut String, mode: EscapeMode, limit: usize) -> Self {
        Self { dst, mode, limit }
    }
}

impl fmt::Write for EscapingWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.dst.len() >= self.limit {
            return Ok(());
        }
        escape_into(self.dst, s, self.mode);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        if self.dst.len() >= self.limit {
            return Ok(());
        }
        escape_char_into(self.dst, c, self.mode);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_reserved_characters() {
        assert_eq!(escape("a\tb", EscapeMode::Value), "a\\tb");
        assert_eq!(escape("a\nb", EscapeMode::Value), "a\\nb");
        assert_eq!(escape("a\rb", EscapeMode::Value), "a\\rb");
        assert_eq!(escape("a=b", EscapeMode::Value), "a\\=b");
        assert_eq!(escape("a\\b", EscapeMode::Value), "a\\\\b");
    }

    #[test]
    fn test_escape_passes_plain_text_through() {
        assert_eq!(escape("hello world", EscapeMode::Value), "hello world");
        assert_eq!(escape("ключ", EscapeMode::Value), "ключ");
        assert_eq!(escape("", EscapeMode::Value), "");
    }

    #[test]
    fn test_escape_none_mode_is_verbatim() {
        assert_eq!(escape("a\t=\\b", EscapeMode::None), "a\t=\\b");
    }

    #[test]
    fn test_key_mode_replaces_periods() {
        assert_eq!(escape("http.request.size", EscapeMode::Key), "http_request_size");
        assert_eq!(escape("plain", EscapeMode::Key), "plain");
        // Value mode leaves periods alone
        assert_eq!(escape("http.request", EscapeMode::Value), "http.request");
    }

    #[test]
    fn test_unescape_round_trip() {
        for s in ["", "plain", "a\tb", "line1\nline2", "k=v", "back\\slash", "\t\n\r=\\"] {
            assert_eq!(unescape(&escape(s, EscapeMode::Value)), s);
        }
    }

    #[test]
    fn test_unescape_lenient_on_unknown_pairs() {
        assert_eq!(unescape("a\\qb"), "aqb");
        assert_eq!(unescape("dangling\\"), "dangling\\");
    }

    #[test]
    fn test_escaping_writer_respects_limit() {
        use std::fmt::Write;

        let mut out = String::new();
        let mut writer = EscapingWriter::new(&mut out, EscapeMode::Value, 4);
        writer.write_str("abcd").unwrap();
        writer.write_str("efgh").unwrap();
        assert_eq!(out, "abcd");
    }

    #[test]
    fn test_escaping_writer_escapes() {
        use std::fmt::Write;

        let mut out = String::new();
        let mut writer = EscapingWriter::new(&mut out, EscapeMode::Value, usize::MAX);
        write!(writer, "k={}", "v\twith tab").unwrap();
        assert_eq!(out, "k\\=v\\twith tab");
    }
}
