use crate::error::ParseError;

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Percent-encodes everything except RFC 3986 unreserved characters.
pub(crate) fn encode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.as_bytes() {
        let is_unreserved = matches!(
            byte,
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~'
        );
        if is_unreserved {
            encoded.push(*byte as char);
        } else {
            encoded.push('%');
            encoded.push(HEX[(byte >> 4) as usize] as char);
            encoded.push(HEX[(byte & 0x0F) as usize] as char);
        }
    }
    encoded
}

/// Strict percent-decoding: every `%` must introduce two hex digits and the result must be UTF-8.
/// `+` is a literal plus, not a space.
pub(crate) fn decode(value: &str) -> Result<String, ParseError> {
    if !value.as_bytes().contains(&b'%') {
        return Ok(value.to_string());
    }

    let malformed = || ParseError::InvalidPercentEncoding {
        component: value.to_string(),
    };

    let mut out = Vec::with_capacity(value.len());
    let mut bytes = value.as_bytes().iter().copied();
    while let Some(b) = bytes.next() {
        if b != b'%' {
            out.push(b);
            continue;
        }
        let hi = bytes.next().and_then(hex_value).ok_or_else(malformed)?;
        let lo = bytes.next().and_then(hex_value).ok_or_else(malformed)?;
        out.push((hi << 4) | lo);
    }

    String::from_utf8(out).map_err(|_| malformed())
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
