//! Character encoding detection for plain-text documents.
//!
//! Detection never fails: a byte-order mark wins, valid UTF-8 stays UTF-8,
//! and anything else goes through `chardetng`'s byte-frequency heuristic,
//! which always settles on some legacy encoding.

use encoding_rs::{Encoding, UTF_8};

/// Guesses the encoding of `bytes`.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if std::str::from_utf8(bytes).is_ok() {
        return UTF_8;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Decodes `bytes` with the detected encoding, replacing malformed
/// sequences with U+FFFD.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let encoding = detect_encoding(bytes);
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(
            encoding = actual.name(),
            "replaced malformed byte sequences while decoding"
        );
    }
    text.into_owned()
}
