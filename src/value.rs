//! Tag values: one exact value or one of three sentinel constraints

use std::fmt;

/// The constraint a tagged URN places on one key
///
/// Sentinels are variants rather than magic strings, so an exact value that
/// happens to be spelled `*` (only reachable through a quoted parse) never
/// collides with [`TagValue::MustHaveAny`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagValue {
    /// A concrete value; case preserved as stored
    Exact(String),
    /// `*` - key must be present with any value
    MustHaveAny,
    /// `!` - key must be absent
    MustNotHave,
    /// `?` - no constraint, same as the key being absent
    Unspecified,
}

impl TagValue {
    /// Interpret value text the way an unquoted value is interpreted:
    /// `*`, `?` and `!` select sentinels, anything else is exact.
    ///
    /// Returns `None` for the empty string.
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "" => None,
            "*" => Some(TagValue::MustHaveAny),
            "!" => Some(TagValue::MustNotHave),
            "?" => Some(TagValue::Unspecified),
            other => Some(TagValue::Exact(other.to_string())),
        }
    }

    /// Text of the value as it reads in a URN (without any quoting)
    pub fn as_str(&self) -> &str {
        match self {
            TagValue::Exact(v) => v,
            TagValue::MustHaveAny => "*",
            TagValue::MustNotHave => "!",
            TagValue::Unspecified => "?",
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, TagValue::Exact(_))
    }

    /// The exact value, if this is not a sentinel
    pub fn exact(&self) -> Option<&str> {
        match self {
            TagValue::Exact(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for TagValue {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for TagValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Serialized text of a value, quoting exact values that would otherwise
/// read back as a sentinel or as quoted text
#[cfg(feature = "serde")]
fn to_serde_text(value: &TagValue) -> String {
    match value {
        TagValue::Exact(v) if matches!(v.as_str(), "*" | "?" | "!") || v.starts_with('"') => {
            let mut out = String::with_capacity(v.len() + 2);
            out.push('"');
            for c in v.chars() {
                if c == '"' || c == '\\' {
                    out.push('\\');
                }
                out.push(c);
            }
            out.push('"');
            out
        }
        other => other.as_str().to_string(),
    }
}

/// Inverse of [`to_serde_text`]
#[cfg(feature = "serde")]
fn from_serde_text(text: &str) -> Result<TagValue, String> {
    let Some(quoted) = text.strip_prefix('"') else {
        return TagValue::from_text(text).ok_or_else(|| "tag value cannot be empty".to_string());
    };
    let inner = quoted
        .strip_suffix('"')
        .ok_or_else(|| format!("unterminated quoted tag value: {}", text))?;
    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped @ ('"' | '\\')) => value.push(escaped),
                _ => return Err(format!("invalid escape in tag value: {}", text)),
            },
            '"' => return Err(format!("unescaped quote in tag value: {}", text)),
            _ => value.push(c),
        }
    }
    if value.is_empty() {
        return Err("tag value cannot be empty".to_string());
    }
    Ok(TagValue::Exact(value))
}

// Serde serialization support: sentinels as `*`, `!`, `?`; exact values as
// their text, quoted only when spelled like a sentinel or starting with `"`
#[cfg(feature = "serde")]
impl serde::Serialize for TagValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&to_serde_text(self))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TagValue {
    fn deserialize<D>(deserializer: D) -> Result<TagValue, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        from_serde_text(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // TEST120: Sentinel text maps to sentinel variants
    #[test]
    fn test_from_text() {
        assert_eq!(TagValue::from_text("*"), Some(TagValue::MustHaveAny));
        assert_eq!(TagValue::from_text("!"), Some(TagValue::MustNotHave));
        assert_eq!(TagValue::from_text("?"), Some(TagValue::Unspecified));
        assert_eq!(
            TagValue::from_text("pdf"),
            Some(TagValue::Exact("pdf".to_string()))
        );
        assert_eq!(TagValue::from_text(""), None);
    }

    // TEST121: An exact value spelled like a sentinel is still exact
    #[test]
    fn test_exact_star_is_not_wildcard() {
        let exact = TagValue::Exact("*".to_string());
        assert_ne!(exact, TagValue::MustHaveAny);
        assert_eq!(exact.as_str(), "*");
        assert!(exact.is_exact());
        assert_eq!(exact.exact(), Some("*"));
        assert_eq!(TagValue::MustHaveAny.exact(), None);
    }

    // TEST122: String comparison uses the wire text
    #[test]
    fn test_str_comparison() {
        assert_eq!(TagValue::MustHaveAny, "*");
        assert_eq!(TagValue::Exact("Value".into()), "Value");
        assert_eq!(TagValue::Unspecified.to_string(), "?");
    }

    // TEST123: Serde uses the wire text for every variant
    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_wire_text() {
        let cases = [
            (TagValue::MustHaveAny, r#""*""#),
            (TagValue::MustNotHave, r#""!""#),
            (TagValue::Unspecified, r#""?""#),
            (TagValue::Exact("pdf".into()), r#""pdf""#),
            (TagValue::Exact("Hello World".into()), r#""Hello World""#),
        ];
        for (value, json) in cases {
            assert_eq!(serde_json::to_string(&value).unwrap(), json);
            let back: TagValue = serde_json::from_str(json).unwrap();
            assert_eq!(back, value);
        }

        let empty: Result<TagValue, _> = serde_json::from_str(r#""""#);
        assert!(empty.is_err());
    }

    // TEST124: Exact values spelled like sentinels survive serde
    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_exact_sentinel_spelling() {
        for text in ["*", "?", "!", "\"quoted\"", "\"a\\b"] {
            let value = TagValue::Exact(text.to_string());
            let json = serde_json::to_string(&value).unwrap();
            let back: TagValue = serde_json::from_str(&json).unwrap();
            assert_eq!(back, value, "{} via {}", text, json);
        }
        assert_eq!(
            serde_json::to_string(&TagValue::Exact("*".into())).unwrap(),
            r#""\"*\"""#
        );

        let bad: Result<TagValue, _> = serde_json::from_str(r#""\"abc""#);
        assert!(bad.is_err());
        let bad_escape: Result<TagValue, _> = serde_json::from_str(r#""\"a\\nb\"""#);
        assert!(bad_escape.is_err());
    }
}
