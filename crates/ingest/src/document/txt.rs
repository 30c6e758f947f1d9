use super::DocumentError;

/// Decode a cleaned text file. Unlike a lossy read, invalid UTF-8 is an error:
/// replacement characters would shift every character offset after them.
pub fn decode_txt(bytes: &[u8], filename: &str) -> Result<String, DocumentError> {
    let text = std::str::from_utf8(bytes).map_err(|_| DocumentError::InvalidUtf8(filename.to_string()))?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_simple_text() {
        let text = decode_txt(b"Hello, world!\nThis is a test file.", "a.txt").unwrap();
        assert!(text.contains("Hello, world!"));
    }

    #[test]
    fn decode_utf8_text() {
        let content = "Zürich, Küsnacht, Bollingen".as_bytes();
        assert_eq!(decode_txt(content, "a.txt").unwrap(), "Zürich, Küsnacht, Bollingen");
    }

    #[test]
    fn decode_empty_text() {
        assert_eq!(decode_txt(b"", "a.txt").unwrap(), "");
    }

    #[test]
    fn byte_order_mark_is_dropped() {
        assert_eq!(decode_txt(b"\xef\xbb\xbfText", "a.txt").unwrap(), "Text");
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = decode_txt(&[0x66, 0xff, 0x6f], "broken.txt").unwrap_err();
        assert!(matches!(err, DocumentError::InvalidUtf8(ref name) if name == "broken.txt"));
    }

    #[test]
    fn whitespace_is_preserved() {
        assert_eq!(decode_txt(b"  \n  Hello  \n  ", "a.txt").unwrap(), "  \n  Hello  \n  ");
    }
}
