//! End-to-end scenarios for parsing, serializing and selecting tagged URNs

use tagged_urn::{parse, TagValue, TaggedUrn, TaggedUrnBuilder, TaggedUrnError, UrnMatcher};

fn urn(s: &str) -> TaggedUrn {
    parse(s).unwrap()
}

// TEST900: Parsing sorts tags into canonical order
#[test]
fn test900_canonical_order() {
    assert_eq!(
        urn("cap:op=generate;ext=pdf;target=thumbnail").to_string(),
        "cap:ext=pdf;op=generate;target=thumbnail"
    );
}

// TEST901: Quoted values keep case, unquoted values fold
#[test]
fn test901_case_handling() {
    assert_eq!(
        urn(r#"cap:KEY="Value With Spaces""#).get_tag("key"),
        Some("Value With Spaces")
    );
    assert_eq!(urn("cap:key=UPPER").get_tag("key"), Some("upper"));
}

// TEST902: Bare key reads as wildcard and serializes without `=*`
#[test]
fn test902_bare_key() {
    let ext = urn("cap:ext");
    assert_eq!(ext.get_tag("ext"), Some("*"));
    assert_eq!(ext.to_string(), "cap:ext");
}

// TEST903: Instance missing a required tag does not conform
#[test]
fn test903_required_tag() {
    assert!(!urn("cap:op=generate").conforms_to(&urn("cap:ext=pdf")).unwrap());
    assert!(urn("cap:op=generate;ext=pdf").conforms_to(&urn("cap:ext=pdf")).unwrap());
}

// TEST904: Extra instance tags never break a match
#[test]
fn test904_extra_tags() {
    assert!(urn("cap:op=generate;ext=pdf;version=2")
        .conforms_to(&urn("cap:op=generate;ext=pdf"))
        .unwrap());
}

// TEST905: Best match picks the most specific conforming candidate
#[test]
fn test905_best_match() {
    let candidates: Vec<TaggedUrn> = ["cap:op=*", "cap:op=generate", "cap:op=generate;ext=pdf"]
        .iter()
        .map(|s| urn(s))
        .collect();
    let best = UrnMatcher::find_best_match(&candidates, &urn("cap:op=generate"))
        .unwrap()
        .unwrap();
    assert_eq!(best.to_string(), "cap:ext=pdf;op=generate");
}

// TEST906: Negation keeps a handler out of requests that carry the key
#[test]
fn test906_negation_routing() {
    let handlers = vec![
        urn("cap:op=render;gpu=!"),
        urn("cap:op=render;gpu"),
    ];
    let cpu_request = urn("cap:op=render");
    let gpu_request = urn("cap:op=render;gpu=cuda");

    // A request is the instance; handlers state what they require
    let for_cpu: Vec<&TaggedUrn> = handlers
        .iter()
        .filter(|h| cpu_request.conforms_to(h).unwrap())
        .collect();
    assert_eq!(for_cpu, vec![&handlers[0]]);

    let for_gpu: Vec<&TaggedUrn> = handlers
        .iter()
        .filter(|h| gpu_request.conforms_to(h).unwrap())
        .collect();
    assert_eq!(for_gpu, vec![&handlers[1]]);
}

// TEST907: Builder and parser agree
#[test]
fn test907_builder_matches_parser() {
    let built = TaggedUrnBuilder::new("media")
        .tag("type", "string")
        .unwrap()
        .tag("v", "1")
        .unwrap()
        .solo_tag("textable")
        .unwrap()
        .tag_value("binary", TagValue::MustNotHave)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(built, urn("media:type=string;v=1;textable;binary=!"));
    assert_eq!(built.to_string(), "media:binary=!;textable;type=string;v=1");
}

// TEST908: Every error kind is reachable with its stable name
#[test]
fn test908_error_taxonomy() {
    let cases: Vec<(&str, &str)> = vec![
        ("op=generate", "MISSING_PREFIX"),
        (":op=generate", "EMPTY_PREFIX"),
        ("cap:op=gen#erate", "INVALID_CHARACTER"),
        ("cap:op=", "EMPTY_TAG"),
        ("cap:op=a;op=b", "DUPLICATE_KEY"),
        ("cap:42=a", "NUMERIC_KEY"),
        (r#"cap:op="open"#, "UNTERMINATED_QUOTE"),
        (r#"cap:op="\t""#, "INVALID_ESCAPE_SEQUENCE"),
        (" cap:op=generate", "WHITESPACE_IN_INPUT"),
    ];
    for (input, name) in cases {
        let err = parse(input).unwrap_err();
        assert_eq!(err.name(), name, "input {input:?} gave {err}");
    }

    let err = urn("cap:").conforms_to(&urn("media:")).unwrap_err();
    assert_eq!(err.name(), "PREFIX_MISMATCH");

    let err = TaggedUrnBuilder::new("cap").build().unwrap_err();
    assert!(matches!(err, TaggedUrnError::InvalidFormat(_)));
}

// TEST909: URNs are shareable across threads without locking
#[test]
fn test909_thread_sharing() {
    let pattern = std::sync::Arc::new(urn("cap:op=generate"));
    let handles: Vec<_> = ["cap:op=generate;ext=pdf", "cap:op=extract"]
        .into_iter()
        .map(|s| {
            let pattern = std::sync::Arc::clone(&pattern);
            std::thread::spawn(move || urn(s).conforms_to(&pattern).unwrap())
        })
        .collect();
    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![true, false]);
}
