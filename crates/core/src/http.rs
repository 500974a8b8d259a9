//! Small HTTP-adjacent helpers that stay framework-free.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// RFC 5987 `attr-char` complement: everything except ALPHA / DIGIT and
/// the listed marks must be percent-encoded in `filename*` values.
const ATTR_CHAR_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Build a `Content-Disposition` value with an RFC 5987 encoded filename.
///
/// Non-ASCII filenames (user names, movie titles) survive intact:
/// `content_disposition("review_иван_Alien.pdf")` yields
/// `filename*=UTF-8''review_%D0%B8...`.
pub fn content_disposition(filename: &str) -> String {
    let encoded = utf8_percent_encode(filename, ATTR_CHAR_ENCODE_SET);
    format!("filename*=UTF-8''{encoded}")
}
