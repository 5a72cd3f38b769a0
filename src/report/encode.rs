//! Payload encoding for JSON transport.

use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Base64-encode a serialized fragment's UTF-8 bytes.
///
/// No chunking, no line wrapping, no compression.
pub fn encode_fragment(fragment: &str) -> String {
    STANDARD.encode(fragment.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let fragment = "\n<h1>Foo</h1>\n<p>text</p>";
        let encoded = encode_fragment(fragment);
        let decoded = STANDARD.decode(&encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), fragment);
    }

    #[test]
    fn test_no_wrapping() {
        // Long fragments encode to a single unbroken line
        let encoded = encode_fragment(&"x".repeat(10_000));
        assert!(!encoded.contains('\n'));
    }

    #[test]
    fn test_known_value() {
        assert_eq!(encode_fragment("hello"), "aGVsbG8=");
    }
}
