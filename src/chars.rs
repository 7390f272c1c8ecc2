//! Character classes of the tagged URN grammar
//!
//! Keys and prefixes share one alphabet; unquoted values extend it with the
//! three sentinel characters. Everything here is ASCII-only.

/// Characters allowed in prefixes and keys: `[A-Za-z0-9_\-/:.]`
pub fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '/' | ':' | '.')
}

/// Characters allowed in an unquoted value: key characters plus `*`, `?`, `!`
pub fn is_unquoted_value_char(c: char) -> bool {
    is_key_char(c) || matches!(c, '*' | '?' | '!')
}

/// Characters that always force a value into quoted form
pub fn is_quote_trigger(c: char) -> bool {
    matches!(c, ';' | '=' | '"' | '\\' | ' ') || c.is_uppercase()
}

/// Check if a string is purely numeric
pub fn is_purely_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Whether an exact value must be quoted to survive a round-trip.
///
/// Uppercase can only come from a quoted parse, so it is re-quoted. Values
/// spelled like a sentinel are quoted so they stay exact.
pub fn needs_quoting(value: &str) -> bool {
    if value.is_empty() || matches!(value, "*" | "?" | "!") {
        return true;
    }
    value
        .chars()
        .any(|c| is_quote_trigger(c) || !is_unquoted_value_char(c))
}
