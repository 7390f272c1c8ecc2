//! Selection utilities over collections of tagged URNs

use tracing::debug;

use crate::error::TaggedUrnError;
use crate::urn::TaggedUrn;

/// URN matching and selection utilities
pub struct UrnMatcher;

impl UrnMatcher {
    /// Find the most specific candidate that conforms to a request
    ///
    /// The first candidate wins among equal scores.
    pub fn find_best_match<'a>(
        candidates: &'a [TaggedUrn],
        request: &TaggedUrn,
    ) -> Result<Option<&'a TaggedUrn>, TaggedUrnError> {
        let mut best: Option<&TaggedUrn> = None;
        for candidate in candidates {
            if !candidate.conforms_to(request)? {
                continue;
            }
            match best {
                Some(b) if candidate.specificity() <= b.specificity() => {}
                _ => best = Some(candidate),
            }
        }
        debug!(
            request = %request,
            candidates = candidates.len(),
            best = ?best.map(|b| b.to_string()),
            "best match lookup"
        );
        Ok(best)
    }

    /// Find all candidates that conform to a request, most specific first
    ///
    /// Equal scores keep their input order.
    pub fn find_all_matches<'a>(
        candidates: &'a [TaggedUrn],
        request: &TaggedUrn,
    ) -> Result<Vec<&'a TaggedUrn>, TaggedUrnError> {
        let mut matches = Vec::new();
        for candidate in candidates {
            if candidate.conforms_to(request)? {
                matches.push(candidate);
            }
        }
        matches.sort_by_key(|urn| std::cmp::Reverse(urn.specificity()));
        debug!(
            request = %request,
            candidates = candidates.len(),
            matched = matches.len(),
            "all matches lookup"
        );
        Ok(matches)
    }

    /// Check if any URN of one set is compatible with any URN of the other
    pub fn are_compatible(
        urns1: &[TaggedUrn],
        urns2: &[TaggedUrn],
    ) -> Result<bool, TaggedUrnError> {
        for a in urns1 {
            for b in urns2 {
                if a.is_compatible_with(b)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urns(list: &[&str]) -> Vec<TaggedUrn> {
        list.iter().map(|s| TaggedUrn::from_string(s).unwrap()).collect()
    }

    fn urn(s: &str) -> TaggedUrn {
        TaggedUrn::from_string(s).unwrap()
    }

    // TEST800: Most specific conforming candidate wins
    #[test]
    fn test_best_match() {
        let caps = urns(&["cap:op=*", "cap:op=generate", "cap:op=generate;ext=pdf"]);
        let request = urn("cap:op=generate");
        let best = UrnMatcher::find_best_match(&caps, &request).unwrap().unwrap();
        assert_eq!(best.to_string(), "cap:ext=pdf;op=generate");
    }

    // TEST801: First seen wins exact ties
    #[test]
    fn test_best_match_tie() {
        let caps = urns(&["cap:op=generate;ext=pdf", "cap:op=generate;target=thumbnail"]);
        let best = UrnMatcher::find_best_match(&caps, &urn("cap:op=generate"))
            .unwrap()
            .unwrap();
        assert_eq!(best, &caps[0]);
    }

    // TEST802: No conforming candidate yields None
    #[test]
    fn test_best_match_none() {
        let caps = urns(&["cap:op=extract", "cap:ext=pdf"]);
        assert!(UrnMatcher::find_best_match(&caps, &urn("cap:op=generate"))
            .unwrap()
            .is_none());
        assert!(UrnMatcher::find_best_match(&[], &urn("cap:")).unwrap().is_none());
    }

    // TEST803: All matches sorted descending, stable on ties
    #[test]
    fn test_find_all_matches() {
        let caps = urns(&[
            "cap:op=generate",
            "cap:op=extract",
            "cap:op=generate;ext=pdf",
            "cap:op",
            "cap:op=generate;target=thumbnail",
        ]);
        let matches = UrnMatcher::find_all_matches(&caps, &urn("cap:op=generate")).unwrap();
        let rendered: Vec<String> = matches.iter().map(|u| u.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "cap:ext=pdf;op=generate",
                "cap:op=generate;target=thumbnail",
                "cap:op=generate",
                "cap:op",
            ]
        );
    }

    // TEST804: Candidate prefix mismatch propagates
    #[test]
    fn test_prefix_mismatch_propagates() {
        let caps = urns(&["cap:op=generate", "media:type=pdf"]);
        let request = urn("cap:op=generate");
        assert!(matches!(
            UrnMatcher::find_best_match(&caps, &request),
            Err(TaggedUrnError::PrefixMismatch { .. })
        ));
        assert!(UrnMatcher::find_all_matches(&caps, &request).is_err());
    }

    // TEST805: Set compatibility is existential and symmetric
    #[test]
    fn test_are_compatible() {
        let set1 = urns(&["cap:op=generate;ext=pdf", "cap:op=extract"]);
        let set2 = urns(&["cap:op=extract;target=metadata"]);
        let set3 = urns(&["cap:op=convert"]);
        assert!(UrnMatcher::are_compatible(&set1, &set2).unwrap());
        assert!(UrnMatcher::are_compatible(&set2, &set1).unwrap());
        assert!(!UrnMatcher::are_compatible(&set1, &set3).unwrap());
        assert!(!UrnMatcher::are_compatible(&set1, &[]).unwrap());
    }
}
