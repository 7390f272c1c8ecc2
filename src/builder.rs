//! Builder for creating tagged URNs fluently

use std::collections::BTreeMap;

use crate::error::TaggedUrnError;
use crate::parser::{normalize_key, normalize_prefix};
use crate::urn::TaggedUrn;
use crate::value::TagValue;

/// Builder for creating tagged URNs fluently
///
/// ```
/// use tagged_urn::TaggedUrnBuilder;
///
/// let urn = TaggedUrnBuilder::new("cap")
///     .tag("op", "generate").unwrap()
///     .solo_tag("ext").unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(urn.to_string(), "cap:ext;op=generate");
/// ```
#[derive(Debug, Clone)]
pub struct TaggedUrnBuilder {
    prefix: String,
    tags: BTreeMap<String, TagValue>,
}

impl TaggedUrnBuilder {
    /// The prefix is validated when the URN is built
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            tags: BTreeMap::new(),
        }
    }

    /// Add a tag; `*`, `?` and `!` select the sentinels.
    /// Later calls for the same key replace earlier ones.
    pub fn tag(self, key: &str, value: &str) -> Result<Self, TaggedUrnError> {
        let tag_value =
            TagValue::from_text(value).ok_or_else(|| TaggedUrnError::EmptyTag(key.to_string()))?;
        self.tag_value(key, tag_value)
    }

    /// Add a tag with an explicit [`TagValue`]
    pub fn tag_value(mut self, key: &str, value: TagValue) -> Result<Self, TaggedUrnError> {
        if value.exact() == Some("") {
            return Err(TaggedUrnError::EmptyTag(key.to_string()));
        }
        self.tags.insert(normalize_key(key)?, value);
        Ok(self)
    }

    /// Add a value-less tag (`key` alone, meaning `key=*`)
    pub fn solo_tag(self, key: &str) -> Result<Self, TaggedUrnError> {
        self.tag_value(key, TagValue::MustHaveAny)
    }

    /// Build the URN, requiring at least one tag
    pub fn build(self) -> Result<TaggedUrn, TaggedUrnError> {
        if self.tags.is_empty() {
            return Err(TaggedUrnError::InvalidFormat(
                "tagged URN must have at least one tag".to_string(),
            ));
        }
        self.build_allow_empty()
    }

    /// Build the URN, permitting an empty tag set
    pub fn build_allow_empty(self) -> Result<TaggedUrn, TaggedUrnError> {
        let prefix = normalize_prefix(&self.prefix)?;
        Ok(TaggedUrn::from_parts(prefix, self.tags))
    }
}
