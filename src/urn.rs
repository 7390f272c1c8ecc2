//! Flat Tag-Based URN
//!
//! A tagged URN is a prefix plus an unordered set of key/constraint pairs,
//! e.g. `cap:op=generate;ext=pdf;target=thumbnail`. The prefix names the
//! family; URNs from different families are never compared.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::TaggedUrnError;
use crate::parser::{self, normalize_key, normalize_prefix};
use crate::value::TagValue;

/// A tagged URN using flat, ordered tags
///
/// Examples:
/// - `cap:op=generate;ext=pdf;target=thumbnail`
/// - `media:type=string;v=1;textable`
/// - `cap:key="Value With Spaces";internal=!`
///
/// Immutable once built. Every mutator returns a new URN.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaggedUrn {
    prefix: String,
    /// Stored in sorted order for canonical representation
    tags: BTreeMap<String, TagValue>,
}

impl TaggedUrn {
    pub(crate) fn from_parts(prefix: String, tags: BTreeMap<String, TagValue>) -> Self {
        Self { prefix, tags }
    }

    /// Create a tagged URN from a prefix and a map of value texts
    ///
    /// Keys and the prefix are validated and lowercased. Values are taken as
    /// given; `*`, `?` and `!` select the sentinels.
    pub fn new(prefix: &str, tags: BTreeMap<String, String>) -> Result<Self, TaggedUrnError> {
        let prefix = normalize_prefix(prefix)?;
        let mut normalized = BTreeMap::new();
        for (key, value) in tags {
            let key_lower = normalize_key(&key)?;
            let value = TagValue::from_text(&value).ok_or_else(|| TaggedUrnError::EmptyTag(key))?;
            if normalized.insert(key_lower.clone(), value).is_some() {
                return Err(TaggedUrnError::DuplicateKey(key_lower));
            }
        }
        Ok(Self { prefix, tags: normalized })
    }

    /// Create a URN with no tags - the universal pattern for its prefix
    pub fn empty(prefix: &str) -> Result<Self, TaggedUrnError> {
        Ok(Self {
            prefix: normalize_prefix(prefix)?,
            tags: BTreeMap::new(),
        })
    }

    /// Create a tagged URN from a string representation
    ///
    /// Format: `prefix:key1=value1;key2=value2;...`
    ///
    /// Case handling:
    /// - Prefix and keys: always normalized to lowercase
    /// - Unquoted values: normalized to lowercase
    /// - Quoted values: case preserved exactly as specified
    pub fn from_string(s: &str) -> Result<Self, TaggedUrnError> {
        parser::parse(s)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn tags(&self) -> &BTreeMap<String, TagValue> {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Get a specific tag value as text (`*`, `?` and `!` for sentinels)
    /// Key is normalized to lowercase for lookup
    pub fn get_tag(&self, key: &str) -> Option<&str> {
        self.tag_value(key).map(TagValue::as_str)
    }

    /// Get a specific tag value
    pub fn tag_value(&self, key: &str) -> Option<&TagValue> {
        self.tags.get(&key.to_ascii_lowercase())
    }

    /// Check if this URN has a specific tag with a specific value
    /// Key is normalized to lowercase; value comparison is case-sensitive
    pub fn has_tag(&self, key: &str, value: &str) -> bool {
        self.tag_value(key).is_some_and(|v| v == value)
    }

    /// Add or update a tag
    ///
    /// Key is normalized to lowercase; value is preserved as-is.
    /// Returns error if value is empty (use "*" for wildcard)
    pub fn with_tag(self, key: &str, value: &str) -> Result<Self, TaggedUrnError> {
        let tag_value =
            TagValue::from_text(value).ok_or_else(|| TaggedUrnError::EmptyTag(key.to_string()))?;
        self.with_tag_value(key, tag_value)
    }

    /// Add or update a tag with an explicit [`TagValue`]
    pub fn with_tag_value(mut self, key: &str, value: TagValue) -> Result<Self, TaggedUrnError> {
        if let TagValue::Exact(v) = &value {
            if v.is_empty() {
                return Err(TaggedUrnError::EmptyTag(key.to_string()));
            }
        }
        self.tags.insert(normalize_key(key)?, value);
        Ok(self)
    }

    /// Remove a tag
    /// Key is normalized to lowercase for case-insensitive removal
    pub fn without_tag(mut self, key: &str) -> Self {
        self.tags.remove(&key.to_ascii_lowercase());
        self
    }

    /// Replace an existing tag's value with `*`; absent keys are left absent
    pub fn with_wildcard_tag(mut self, key: &str) -> Self {
        if let Some(value) = self.tags.get_mut(&key.to_ascii_lowercase()) {
            *value = TagValue::MustHaveAny;
        }
        self
    }

    /// Create a subset URN with only specified tags
    pub fn subset(&self, keys: &[&str]) -> Self {
        let tags = keys
            .iter()
            .filter_map(|key| {
                let key_lower = key.to_ascii_lowercase();
                self.tags.get(&key_lower).map(|v| (key_lower, v.clone()))
            })
            .collect();
        Self {
            prefix: self.prefix.clone(),
            tags,
        }
    }

    /// Merge with another URN (other takes precedence for conflicts)
    pub fn merge(&self, other: &TaggedUrn) -> Result<Self, TaggedUrnError> {
        self.check_prefix(other)?;
        let mut tags = self.tags.clone();
        for (key, value) in &other.tags {
            tags.insert(key.clone(), value.clone());
        }
        Ok(Self {
            prefix: self.prefix.clone(),
            tags,
        })
    }

    /// Normalize a URN string to its canonical form
    pub fn canonical(urn: &str) -> Result<String, TaggedUrnError> {
        Ok(TaggedUrn::from_string(urn)?.to_string())
    }

    pub fn canonical_option(urn: Option<&str>) -> Result<Option<String>, TaggedUrnError> {
        urn.map(TaggedUrn::canonical).transpose()
    }

    pub(crate) fn check_prefix(&self, other: &TaggedUrn) -> Result<(), TaggedUrnError> {
        if self.prefix != other.prefix {
            return Err(TaggedUrnError::prefix_mismatch(&self.prefix, &other.prefix));
        }
        Ok(())
    }
}

impl FromStr for TaggedUrn {
    type Err = TaggedUrnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaggedUrn::from_string(s)
    }
}

// Serde serialization support
#[cfg(feature = "serde")]
impl serde::Serialize for TaggedUrn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TaggedUrn {
    fn deserialize<D>(deserializer: D) -> Result<TaggedUrn, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TaggedUrn::from_string(&s).map_err(serde::de::Error::custom)
    }
}
