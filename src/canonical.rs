//! Canonical serialization with smart quoting
//!
//! Keys come out sorted, with no trailing `;`. `*` renders as a bare key,
//! `?` and `!` render literally, and exact values are quoted only when the
//! unquoted form would not parse back to the same value.

use std::fmt::{self, Write};

use crate::chars::needs_quoting;
use crate::urn::TaggedUrn;
use crate::value::TagValue;

fn write_quoted(out: &mut impl Write, value: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.write_char('\\')?;
        }
        out.write_char(c)?;
    }
    out.write_char('"')
}

fn write_tag(out: &mut impl Write, key: &str, value: &TagValue) -> fmt::Result {
    match value {
        TagValue::MustHaveAny => out.write_str(key),
        TagValue::MustNotHave => write!(out, "{}=!", key),
        TagValue::Unspecified => write!(out, "{}=?", key),
        TagValue::Exact(v) if needs_quoting(v) => {
            write!(out, "{}=", key)?;
            write_quoted(out, v)
        }
        TagValue::Exact(v) => write!(out, "{}={}", key, v),
    }
}

fn write_tags(out: &mut impl Write, urn: &TaggedUrn) -> fmt::Result {
    for (i, (key, value)) in urn.tags().iter().enumerate() {
        if i > 0 {
            out.write_char(';')?;
        }
        write_tag(out, key, value)?;
    }
    Ok(())
}

impl TaggedUrn {
    /// Serialize just the tags portion (without the prefix)
    pub fn tags_to_string(&self) -> String {
        let rendered = self.to_string();
        // Prefix is ASCII key characters, so the byte offset is a char boundary
        rendered[self.prefix().len() + 1..].to_string()
    }
}

impl fmt::Display for TaggedUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.prefix())?;
        write_tags(f, self)
    }
}
