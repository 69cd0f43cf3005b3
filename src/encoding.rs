use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;

/// Everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, i.e. the set escaped by
/// ECMAScript's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a cookie value.
pub(crate) fn encode(string: &str) -> impl std::fmt::Display + '_ {
    percent_encoding::utf8_percent_encode(string, COMPONENT)
}

/// Percent-decode a cookie value.
///
/// If the decoded bytes are not valid UTF-8 the raw value is returned as is.
pub(crate) fn decode(string: &str) -> Cow<'_, str> {
    match percent_encoding::percent_decode_str(string).decode_utf8() {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(string),
    }
}

/// `true` if `name` is a non-empty RFC 7230 token.
pub(crate) fn is_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'!' | b'#'
                        | b'$'
                        | b'%'
                        | b'&'
                        | b'\''
                        | b'*'
                        | b'+'
                        | b'-'
                        | b'.'
                        | b'^'
                        | b'_'
                        | b'`'
                        | b'|'
                        | b'~'
                )
        })
}

/// `true` if `value` can be used as an attribute value without breaking
/// out of the `Set-Cookie` header.
pub(crate) fn is_attribute_value(value: &str) -> bool {
    value
        .bytes()
        .all(|b| b == b'\t' || ((b' '..=b'~').contains(&b) && b != b';'))
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, is_attribute_value, is_token};

    #[test]
    fn encodes_like_uri_components() {
        assert_eq!(encode("a space").to_string(), "a%20space");
        assert_eq!(encode("-_.!~*'()").to_string(), "-_.!~*'()");
        assert_eq!(encode("a=b;c,d").to_string(), "a%3Db%3Bc%2Cd");
        assert_eq!(encode("caffè").to_string(), "caff%C3%A8");
        assert_eq!(encode("100%").to_string(), "100%25");
    }

    #[test]
    fn decoding_keeps_invalid_utf8_verbatim() {
        assert_eq!(decode("a%20space"), "a space");
        assert_eq!(decode("caff%C3%A8"), "caffè");
        assert_eq!(decode("%F1%F2%F3%C0%C1%C2"), "%F1%F2%F3%C0%C1%C2");
        assert_eq!(decode("no-escapes"), "no-escapes");
    }

    #[test]
    fn token_grammar() {
        assert!(is_token("foo"));
        assert!(is_token("__Host-session"));
        assert!(is_token("a.b|c~d"));
        assert!(!is_token(""));
        assert!(!is_token("foo bar"));
        assert!(!is_token("foo=bar"));
        assert!(!is_token("foo;"));
        assert!(!is_token("foo\n"));
        assert!(!is_token("caffè"));
    }

    #[test]
    fn attribute_values() {
        assert!(is_attribute_value("/"));
        assert!(is_attribute_value("example.com"));
        assert!(is_attribute_value("/a path/with spaces"));
        assert!(!is_attribute_value("/; HttpOnly"));
        assert!(!is_attribute_value("/\r\nX-Injected: 1"));
    }
}
