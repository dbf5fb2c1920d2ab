//! Text codecs behind the encoder/decoder page.
//!
//! All functions are pure: the same input always gives the same output.

use base64::{engine::general_purpose, Engine as _};

use crate::error::{Result, ToolboxError};

pub fn encode_url(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

pub fn decode_url(text: &str) -> Result<String> {
    urlencoding::decode(text)
        .map(|cow| cow.into_owned())
        .map_err(|e| ToolboxError::decode(format!("URL payload is not valid UTF-8 ({})", e)))
}

/// Escapes every UTF-16 code unit as `\uXXXX`, so characters outside the
/// BMP come out as surrogate pairs.
pub fn encode_unicode(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 6);
    for unit in text.encode_utf16() {
        result.push_str(&format!("\\u{:04X}", unit));
    }
    result
}

pub fn decode_unicode(text: &str) -> Result<String> {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    // High surrogate waiting for its partner.
    let mut pending: Option<u16> = None;

    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&'u') {
            chars.next();

            let mut hex = String::with_capacity(4);
            for _ in 0..4 {
                match chars.next() {
                    Some(h) => hex.push(h),
                    None => {
                        return Err(ToolboxError::decode(format!(
                            "incomplete escape sequence \\u{}",
                            hex
                        )))
                    }
                }
            }
            if !hex.chars().all(|h| h.is_ascii_hexdigit()) {
                return Err(ToolboxError::decode(format!("invalid hex digits: {}", hex)));
            }
            let unit = u16::from_str_radix(&hex, 16)
                .map_err(|_| ToolboxError::decode(format!("invalid hex digits: {}", hex)))?;

            match (pending.take(), unit) {
                (None, 0xD800..=0xDBFF) => pending = Some(unit),
                (Some(high), 0xDC00..=0xDFFF) => {
                    let code = 0x10000 + (((high as u32) - 0xD800) << 10) + ((unit as u32) - 0xDC00);
                    let ch = char::from_u32(code).ok_or_else(|| {
                        ToolboxError::decode(format!("invalid code point U+{:X}", code))
                    })?;
                    result.push(ch);
                }
                (Some(high), _) => return Err(unpaired_surrogate(high)),
                (None, 0xDC00..=0xDFFF) => return Err(unpaired_surrogate(unit)),
                (None, _) => {
                    // Everything left is a plain BMP scalar value.
                    if let Some(ch) = char::from_u32(unit as u32) {
                        result.push(ch);
                    }
                }
            }
        } else {
            if let Some(high) = pending {
                return Err(unpaired_surrogate(high));
            }
            result.push(c);
        }
    }

    if let Some(high) = pending {
        return Err(unpaired_surrogate(high));
    }
    Ok(result)
}

fn unpaired_surrogate(unit: u16) -> ToolboxError {
    ToolboxError::decode(format!("unpaired surrogate \\u{:04X}", unit))
}

pub fn encode_base64(text: &str) -> String {
    general_purpose::STANDARD.encode(text.as_bytes())
}

pub fn encode_base64_bytes(data: &[u8]) -> String {
    general_purpose::STANDARD.encode(data)
}

pub fn decode_base64(text: &str) -> Result<String> {
    let bytes = general_purpose::STANDARD.decode(text.trim())?;
    Ok(String::from_utf8(bytes)?)
}

pub fn encode_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{00A0}'),
    ("copy", '\u{00A9}'),
    ("reg", '\u{00AE}'),
    ("trade", '\u{2122}'),
    ("hellip", '\u{2026}'),
    ("mdash", '\u{2014}'),
    ("ndash", '\u{2013}'),
    ("laquo", '\u{00AB}'),
    ("raquo", '\u{00BB}'),
];

// Longest reference we try to resolve, e.g. `&#x10FFFF;`.
const MAX_ENTITY_LEN: usize = 10;

/// Resolves named, decimal and hex character references. Anything that does
/// not resolve is copied through untouched.
pub fn decode_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        // Only look a bounded distance ahead for the closing `;`.
        let window = &tail.as_bytes()[1..tail.len().min(MAX_ENTITY_LEN + 2)];
        let resolved = window
            .iter()
            .position(|&b| b == b';')
            .and_then(|end| resolve_entity(&tail[1..=end]).map(|ch| (ch, end + 2)));

        match resolved {
            Some((ch, consumed)) => {
                result.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                result.push('&');
                rest = &tail[1..];
            }
        }
    }
    result.push_str(rest);
    result
}

fn resolve_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code).filter(|&c| c != '\0');
    }
    NAMED_ENTITIES
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|&(_, ch)| ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod url_tests {
        use super::*;

        #[test]
        fn encodes_spaces_and_reserved() {
            assert_eq!(encode_url("hello world"), "hello%20world");
            assert_eq!(encode_url("a=1&b=2"), "a%3D1%26b%3D2");
        }

        #[test]
        fn leaves_unreserved_alone() {
            assert_eq!(encode_url("AZaz09-_.~"), "AZaz09-_.~");
        }

        #[test]
        fn decodes_utf8_sequences() {
            assert_eq!(decode_url("%E4%BD%A0%E5%A5%BD").unwrap(), "你好");
            assert_eq!(decode_url(&encode_url("夏天 summer")).unwrap(), "夏天 summer");
        }

        #[test]
        fn rejects_invalid_utf8() {
            assert!(decode_url("%FF%FE").is_err());
        }
    }

    mod unicode_tests {
        use super::*;

        #[test]
        fn encodes_each_unit_uppercase() {
            assert_eq!(encode_unicode("Aé"), "\\u0041\\u00E9");
        }

        #[test]
        fn encodes_astral_as_surrogate_pair() {
            assert_eq!(encode_unicode("😀"), "\\uD83D\\uDE00");
        }

        #[test]
        fn decodes_mixed_text() {
            assert_eq!(decode_unicode("hi \\u4F60\\u597D!").unwrap(), "hi 你好!");
        }

        #[test]
        fn decodes_surrogate_pair() {
            assert_eq!(decode_unicode("\\uD83D\\uDE00").unwrap(), "😀");
        }

        #[test]
        fn lowercase_hex_is_accepted() {
            assert_eq!(decode_unicode("\\u00e9").unwrap(), "é");
        }

        #[test]
        fn backslash_without_u_passes_through() {
            assert_eq!(decode_unicode("C:\\path").unwrap(), "C:\\path");
        }

        #[test]
        fn incomplete_escape_is_error() {
            let err = decode_unicode("\\u12").unwrap_err();
            assert!(err.to_string().contains("incomplete"));
        }

        #[test]
        fn non_hex_digits_are_error() {
            let err = decode_unicode("\\uZZZZ").unwrap_err();
            assert!(err.to_string().contains("ZZZZ"));
        }

        #[test]
        fn signed_hex_is_error() {
            assert!(decode_unicode("\\u+041").is_err());
            assert!(decode_unicode("\\u-041").is_err());
        }

        #[test]
        fn lone_high_surrogate_is_error() {
            assert!(decode_unicode("\\uD83Dx").is_err());
            assert!(decode_unicode("\\uD83D").is_err());
        }

        #[test]
        fn lone_low_surrogate_is_error() {
            assert!(decode_unicode("\\uDE00").is_err());
        }
    }

    mod base64_tests {
        use super::*;

        #[test]
        fn encodes_text() {
            assert_eq!(encode_base64("hello"), "aGVsbG8=");
        }

        #[test]
        fn encodes_raw_bytes() {
            assert_eq!(encode_base64_bytes(&[0xff, 0x00, 0x10]), "/wAQ");
        }

        #[test]
        fn decode_trims_whitespace() {
            assert_eq!(decode_base64("  aGVsbG8=\n").unwrap(), "hello");
        }

        #[test]
        fn decode_rejects_malformed() {
            assert!(decode_base64("not base64!").is_err());
        }

        #[test]
        fn decode_rejects_binary_payload() {
            let err = decode_base64("/wAQ").unwrap_err();
            assert!(matches!(err, ToolboxError::Decode(_)));
        }
    }

    mod html_tests {
        use super::*;

        #[test]
        fn escapes_markup() {
            assert_eq!(
                encode_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
                "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
            );
        }

        #[test]
        fn decodes_named_and_numeric() {
            assert_eq!(decode_html("&lt;b&gt; &amp; &#65;&#x42;&copy;"), "<b> & AB©");
        }

        #[test]
        fn decode_inverts_encode() {
            let text = r#"if (a < b && c > "d") { 'e' }"#;
            assert_eq!(decode_html(&encode_html(text)), text);
        }

        #[test]
        fn unknown_entities_are_kept() {
            assert_eq!(decode_html("&bogus; & &;"), "&bogus; & &;");
        }

        #[test]
        fn invalid_numeric_reference_is_kept() {
            assert_eq!(decode_html("&#xD800; &#0;"), "&#xD800; &#0;");
        }

        #[test]
        fn ampersand_followed_by_reference() {
            assert_eq!(decode_html("&&amp;"), "&&");
        }

        #[test]
        fn reference_longer_than_limit_is_kept() {
            assert_eq!(decode_html("&abcdefghijk;"), "&abcdefghijk;");
            assert_eq!(decode_html("&#x10FFFF;"), "\u{10FFFF}");
        }

        #[test]
        fn long_ampersand_run_decodes_quickly() {
            let text = "&".repeat(400_000);
            let started = std::time::Instant::now();
            assert_eq!(decode_html(&text), text);
            assert!(started.elapsed() < std::time::Duration::from_secs(2));

            let mixed = format!("{}&lt;{}", "&".repeat(100_000), ";".repeat(10));
            assert!(decode_html(&mixed).ends_with("&<;;;;;;;;;;"));
        }

        #[test]
        fn multibyte_text_after_ampersand_is_safe() {
            assert_eq!(decode_html("&你好世界;"), "&你好世界;");
            assert_eq!(decode_html("a&é"), "a&é");
        }
    }
}
