//! Specificity scoring used to rank matches
//!
//! Weights: exact value 3, `*` 2, `!` 1, `?` 0. Absent keys contribute nothing.

use std::cmp::Ordering;

use crate::error::TaggedUrnError;
use crate::urn::TaggedUrn;
use crate::value::TagValue;

impl TagValue {
    /// Specificity weight of a single tag value
    pub fn specificity(&self) -> usize {
        match self {
            TagValue::Exact(_) => 3,
            TagValue::MustHaveAny => 2,
            TagValue::MustNotHave => 1,
            TagValue::Unspecified => 0,
        }
    }
}

impl TaggedUrn {
    /// Graded specificity score; more specific URNs score higher
    pub fn specificity(&self) -> usize {
        self.tags().values().map(TagValue::specificity).sum()
    }

    /// `(exact, must_have_any, must_not_have)` counts, compared
    /// lexicographically to break ties between equal scores
    pub fn specificity_tuple(&self) -> (usize, usize, usize) {
        self.tags()
            .values()
            .fold((0, 0, 0), |(exact, any, not), value| match value {
                TagValue::Exact(_) => (exact + 1, any, not),
                TagValue::MustHaveAny => (exact, any + 1, not),
                TagValue::MustNotHave => (exact, any, not + 1),
                TagValue::Unspecified => (exact, any, not),
            })
    }

    /// Check if this URN scores higher than another of the same prefix
    pub fn is_more_specific_than(&self, other: &TaggedUrn) -> Result<bool, TaggedUrnError> {
        self.check_prefix(other)?;
        Ok(self.specificity() > other.specificity())
    }

    /// Order by score, then by the tuple when scores are equal
    pub fn compare_specificity(&self, other: &TaggedUrn) -> Result<Ordering, TaggedUrnError> {
        self.check_prefix(other)?;
        Ok(self
            .specificity()
            .cmp(&other.specificity())
            .then_with(|| self.specificity_tuple().cmp(&other.specificity_tuple())))
    }
}
