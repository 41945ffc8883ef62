//! Escape-sequence encoding and decoding.

use std::borrow::Cow;

/// Decode backslash escapes in collapsed terminal text.
///
/// Recognizes `\n`, `\r`, `\t`, `\0`, `\\`, `\"`, `\'`, `\/`, `\uXXXX` and
/// `\u{X..}`. Unknown or malformed sequences are kept verbatim.
pub fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('\\') {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        let Some(&next) = chars.peek() else {
            result.push(c);
            break;
        };
        let simple = match next {
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            '0' => Some('\0'),
            '\\' | '"' | '\'' | '/' => Some(next),
            _ => None,
        };
        if let Some(decoded) = simple {
            chars.next();
            result.push(decoded);
            continue;
        }
        if next == 'u' {
            let rest: String = chars.clone().skip(1).take(10).collect();
            if let Some((decoded, consumed)) = decode_unicode(&rest) {
                chars.next();
                for _ in 0..consumed {
                    chars.next();
                }
                result.push(decoded);
                continue;
            }
        }
        result.push(c);
    }
    Cow::Owned(result)
}

/// Decode the part after `\u`. Returns the character and how many chars
/// were consumed.
fn decode_unicode(rest: &str) -> Option<(char, usize)> {
    if let Some(braced) = rest.strip_prefix('{') {
        let end = braced.find('}')?;
        let hex = &braced[..end];
        if hex.is_empty() || hex.len() > 6 {
            return None;
        }
        let code = u32::from_str_radix(hex, 16).ok()?;
        return char::from_u32(code).map(|c| (c, end + 2));
    }

    let hex: String = rest.chars().take(4).collect();
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let code = u32::from_str_radix(&hex, 16).ok()?;
    char::from_u32(code).map(|c| (c, 4))
}

/// Escape text for display inside double quotes.
pub fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            c if c.is_control() => result.push_str(&format!("\\u{{{:04x}}}", c as u32)),
            c => result.push(c),
        }
    }
    result
}
