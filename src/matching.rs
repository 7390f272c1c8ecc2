//! Matching engine
//!
//! Matching is directional. A *pattern* states requirements; an *instance*
//! states what something actually has. `pattern.accepts(instance)` and
//! `instance.conforms_to(pattern)` are the same question asked from either
//! side. Per key, with rows for the pattern value and columns for the
//! instance value:
//!
//! | pattern \ instance | absent | `?` | `!` | `*` | `v`    |
//! |--------------------|--------|-----|-----|-----|--------|
//! | absent             | OK     | OK  | OK  | OK  | OK     |
//! | `?`                | OK     | OK  | OK  | OK  | OK     |
//! | `!`                | OK     | OK  | OK  | NO  | NO     |
//! | `*`                | NO     | OK  | NO  | OK  | OK     |
//! | `w`                | NO     | OK  | NO  | OK  | v == w |
//!
//! Every comparison requires both URNs to share a prefix and fails with
//! [`TaggedUrnError::PrefixMismatch`] otherwise.

use std::collections::BTreeSet;

use crate::error::TaggedUrnError;
use crate::urn::TaggedUrn;
use crate::value::TagValue;

/// Whether a single instance value satisfies a single pattern value.
/// `None` means the key is absent on that side.
pub fn tag_satisfies(pattern: Option<&TagValue>, instance: Option<&TagValue>) -> bool {
    use TagValue::*;
    match (pattern, instance) {
        (None | Some(Unspecified), _) => true,
        (_, Some(Unspecified)) => true,
        (Some(MustNotHave), None | Some(MustNotHave)) => true,
        (Some(MustNotHave), Some(MustHaveAny | Exact(_))) => false,
        (Some(MustHaveAny), Some(MustHaveAny | Exact(_))) => true,
        (Some(MustHaveAny), None | Some(MustNotHave)) => false,
        (Some(Exact(_)), Some(MustHaveAny)) => true,
        (Some(Exact(w)), Some(Exact(v))) => v == w,
        (Some(Exact(_)), None | Some(MustNotHave)) => false,
    }
}

/// Whether some single instance could satisfy both values as patterns
pub fn tags_compatible(a: Option<&TagValue>, b: Option<&TagValue>) -> bool {
    use TagValue::*;
    match (a, b) {
        (None | Some(Unspecified), _) | (_, None | Some(Unspecified)) => true,
        (Some(MustNotHave), Some(MustNotHave)) => true,
        (Some(MustNotHave), Some(_)) | (Some(_), Some(MustNotHave)) => false,
        (Some(MustHaveAny), Some(_)) | (Some(_), Some(MustHaveAny)) => true,
        (Some(Exact(x)), Some(Exact(y))) => x == y,
    }
}

impl TaggedUrn {
    fn union_keys<'a>(&'a self, other: &'a TaggedUrn) -> BTreeSet<&'a str> {
        self.tags()
            .keys()
            .chain(other.tags().keys())
            .map(String::as_str)
            .collect()
    }

    /// Check if this URN (pattern) accepts the given instance
    ///
    /// The instance must satisfy every constraint the pattern states.
    /// Tags the instance carries beyond the pattern's never break a match.
    pub fn accepts(&self, instance: &TaggedUrn) -> Result<bool, TaggedUrnError> {
        self.check_prefix(instance)?;
        Ok(self
            .union_keys(instance)
            .into_iter()
            .all(|key| tag_satisfies(self.tags().get(key), instance.tags().get(key))))
    }

    /// Check if this URN (instance) satisfies the given pattern.
    /// Equivalent to `pattern.accepts(self)`.
    pub fn conforms_to(&self, pattern: &TaggedUrn) -> Result<bool, TaggedUrnError> {
        pattern.accepts(self)
    }

    pub fn accepts_str(&self, instance_str: &str) -> Result<bool, TaggedUrnError> {
        let instance = TaggedUrn::from_string(instance_str)?;
        self.accepts(&instance)
    }

    pub fn conforms_to_str(&self, pattern_str: &str) -> Result<bool, TaggedUrnError> {
        let pattern = TaggedUrn::from_string(pattern_str)?;
        self.conforms_to(&pattern)
    }

    /// Check if this URN is compatible with another
    ///
    /// Symmetric: true when some single instance could satisfy both URNs
    /// used as patterns.
    pub fn is_compatible_with(&self, other: &TaggedUrn) -> Result<bool, TaggedUrnError> {
        self.check_prefix(other)?;
        Ok(self
            .union_keys(other)
            .into_iter()
            .all(|key| tags_compatible(self.tags().get(key), other.tags().get(key))))
    }

    /// Same prefix and identical tag maps. `?` and an absent key are not
    /// equivalent here even though they constrain identically.
    pub fn is_equivalent(&self, other: &TaggedUrn) -> Result<bool, TaggedUrnError> {
        self.check_prefix(other)?;
        Ok(self.tags() == other.tags())
    }

    /// True when either URN conforms to the other
    pub fn is_comparable(&self, other: &TaggedUrn) -> Result<bool, TaggedUrnError> {
        Ok(self.conforms_to(other)? || other.conforms_to(self)?)
    }
}
