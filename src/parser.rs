//! State-machine parser for the tagged URN grammar
//!
//! ```text
//! descriptor := prefix ":" [ tag (";" tag)* [";"] ]
//! tag        := key [ "=" value ]        ; bare key == key=*
//! value      := "?" | "!" | "*" | unquoted | quoted
//! ```
//!
//! One state transition per character. Unquoted keys and values are ASCII
//! lowercased; quoted values keep their case and may contain any character,
//! with `\"` and `\\` as the only escapes.

use std::collections::BTreeMap;

use crate::chars::{is_key_char, is_purely_numeric, is_unquoted_value_char};
use crate::error::TaggedUrnError;
use crate::urn::TaggedUrn;
use crate::value::TagValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    ExpectingKey,
    InKey,
    ExpectingValue,
    InUnquotedValue,
    /// Holds the byte position of the opening quote
    InQuotedValue(usize),
    /// Holds the opening quote and the backslash positions
    InQuotedValueEscape(usize, usize),
    ExpectingSemiOrEnd,
}

/// Parse a tagged URN string
pub fn parse(input: &str) -> Result<TaggedUrn, TaggedUrnError> {
    let (prefix, tags) = parse_parts(input).inspect_err(|e| {
        tracing::trace!(input, error = %e, code = e.name(), "rejected tagged URN");
    })?;
    Ok(TaggedUrn::from_parts(prefix, tags))
}

/// Parse into a lowercase prefix and a validated tag map
pub(crate) fn parse_parts(
    input: &str,
) -> Result<(String, BTreeMap<String, TagValue>), TaggedUrnError> {
    if input.trim_matches(|c: char| c.is_ascii_whitespace()).len() != input.len() {
        return Err(TaggedUrnError::WhitespaceInInput(input.to_string()));
    }

    let colon = input.find(':').ok_or(TaggedUrnError::MissingPrefix)?;
    let prefix = &input[..colon];
    if prefix.is_empty() {
        return Err(TaggedUrnError::EmptyPrefix);
    }
    if let Some((pos, c)) = prefix.char_indices().find(|&(_, c)| !is_key_char(c)) {
        return Err(invalid_char(c, pos, "prefix character"));
    }
    let prefix = prefix.to_ascii_lowercase();

    let body_offset = colon + 1;
    let body = &input[body_offset..];
    let mut tags = BTreeMap::new();
    if body.is_empty() || body == ";" {
        return Ok((prefix, tags));
    }

    let mut state = ParseState::ExpectingKey;
    let mut key = String::new();
    let mut value = String::new();

    for (i, c) in body.char_indices() {
        let pos = body_offset + i;
        state = match state {
            ParseState::ExpectingKey => {
                if c == ';' {
                    ParseState::ExpectingKey
                } else if is_key_char(c) {
                    key.push(c.to_ascii_lowercase());
                    ParseState::InKey
                } else {
                    return Err(invalid_char(c, pos, "key"));
                }
            }
            ParseState::InKey => {
                if c == '=' {
                    ParseState::ExpectingValue
                } else if c == ';' {
                    finish_tag(&mut tags, &mut key, Some(TagValue::MustHaveAny))?;
                    ParseState::ExpectingKey
                } else if is_key_char(c) {
                    key.push(c.to_ascii_lowercase());
                    ParseState::InKey
                } else {
                    return Err(invalid_char(c, pos, "key character, '=' or ';'"));
                }
            }
            ParseState::ExpectingValue => {
                if c == '"' {
                    ParseState::InQuotedValue(pos)
                } else if c == ';' {
                    return Err(TaggedUrnError::EmptyTag(format!("{}=", key)));
                } else if is_unquoted_value_char(c) {
                    value.push(c.to_ascii_lowercase());
                    ParseState::InUnquotedValue
                } else {
                    return Err(invalid_char(c, pos, "value"));
                }
            }
            ParseState::InUnquotedValue => {
                if c == ';' {
                    let parsed = TagValue::from_text(&value);
                    value.clear();
                    finish_tag(&mut tags, &mut key, parsed)?;
                    ParseState::ExpectingKey
                } else if is_unquoted_value_char(c) {
                    value.push(c.to_ascii_lowercase());
                    ParseState::InUnquotedValue
                } else {
                    return Err(invalid_char(c, pos, "unquoted value character or ';'"));
                }
            }
            ParseState::InQuotedValue(open) => match c {
                '"' => ParseState::ExpectingSemiOrEnd,
                '\\' => ParseState::InQuotedValueEscape(open, pos),
                _ => {
                    value.push(c);
                    ParseState::InQuotedValue(open)
                }
            },
            ParseState::InQuotedValueEscape(open, backslash) => match c {
                '"' | '\\' => {
                    value.push(c);
                    ParseState::InQuotedValue(open)
                }
                _ => return Err(TaggedUrnError::InvalidEscapeSequence(backslash)),
            },
            ParseState::ExpectingSemiOrEnd => {
                if c == ';' {
                    let quoted = quoted_value(&mut value);
                    finish_tag(&mut tags, &mut key, quoted)?;
                    ParseState::ExpectingKey
                } else {
                    return Err(invalid_char(c, pos, "';' after quoted value"));
                }
            }
        };
    }

    match state {
        ParseState::ExpectingKey => {}
        ParseState::InKey => finish_tag(&mut tags, &mut key, Some(TagValue::MustHaveAny))?,
        ParseState::ExpectingValue => {
            return Err(TaggedUrnError::EmptyTag(format!("{}=", key)));
        }
        ParseState::InUnquotedValue => {
            let parsed = TagValue::from_text(&value);
            finish_tag(&mut tags, &mut key, parsed)?;
        }
        ParseState::InQuotedValue(open) | ParseState::InQuotedValueEscape(open, _) => {
            return Err(TaggedUrnError::UnterminatedQuote(open));
        }
        ParseState::ExpectingSemiOrEnd => {
            let quoted = quoted_value(&mut value);
            finish_tag(&mut tags, &mut key, quoted)?;
        }
    }

    Ok((prefix, tags))
}

/// Quoted text is always exact, even when it spells a sentinel
fn quoted_value(value: &mut String) -> Option<TagValue> {
    let text = std::mem::take(value);
    if text.is_empty() {
        None
    } else {
        Some(TagValue::Exact(text))
    }
}

fn finish_tag(
    tags: &mut BTreeMap<String, TagValue>,
    key: &mut String,
    value: Option<TagValue>,
) -> Result<(), TaggedUrnError> {
    let key = std::mem::take(key);
    let value = match value {
        Some(v) if !key.is_empty() => v,
        _ => return Err(TaggedUrnError::EmptyTag(key)),
    };
    if tags.contains_key(&key) {
        return Err(TaggedUrnError::DuplicateKey(key));
    }
    if is_purely_numeric(&key) {
        return Err(TaggedUrnError::NumericKey(key));
    }
    tags.insert(key, value);
    Ok(())
}

fn invalid_char(c: char, pos: usize, expected: &str) -> TaggedUrnError {
    TaggedUrnError::InvalidCharacter(format!(
        "{:?} at position {} (expected {})",
        c, pos, expected
    ))
}

/// Validate and normalize a key supplied through the programmatic API
pub(crate) fn normalize_key(key: &str) -> Result<String, TaggedUrnError> {
    if key.is_empty() {
        return Err(TaggedUrnError::EmptyTag(key.to_string()));
    }
    if let Some((pos, c)) = key.char_indices().find(|&(_, c)| !is_key_char(c)) {
        return Err(invalid_char(c, pos, "key character"));
    }
    if is_purely_numeric(key) {
        return Err(TaggedUrnError::NumericKey(key.to_string()));
    }
    Ok(key.to_ascii_lowercase())
}

/// Validate and normalize a prefix supplied through the programmatic API
pub(crate) fn normalize_prefix(prefix: &str) -> Result<String, TaggedUrnError> {
    if prefix.is_empty() {
        return Err(TaggedUrnError::EmptyPrefix);
    }
    if let Some((pos, c)) = prefix.char_indices().find(|&(_, c)| !is_key_char(c) || c == ':') {
        return Err(invalid_char(c, pos, "prefix character"));
    }
    Ok(prefix.to_ascii_lowercase())
}
