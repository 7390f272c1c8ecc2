//! Tagged URN - flat tag-based identifiers with directional matching
//!
//! A tagged URN is a prefix and an unordered set of key/constraint pairs:
//!
//! ```text
//! cap:op=generate;ext=pdf;target=thumbnail
//! media:type=string;v=1;textable;binary=!
//! ```
//!
//! Each value is either exact, `*` (must have any value), `!` (must not have)
//! or `?` (unspecified). A bare key means `key=*`. Quoted values keep their
//! case; unquoted ones are lowercased.
//!
//! ```
//! use tagged_urn::{TaggedUrn, UrnMatcher};
//!
//! let request = TaggedUrn::from_string("cap:op=generate").unwrap();
//! let caps: Vec<TaggedUrn> = ["cap:op=*", "cap:op=generate", "cap:op=generate;ext=pdf"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//!
//! let best = UrnMatcher::find_best_match(&caps, &request).unwrap().unwrap();
//! assert_eq!(best.to_string(), "cap:ext=pdf;op=generate");
//! ```

pub mod builder;
pub mod canonical;
pub mod chars;
pub mod error;
pub mod matcher;
pub mod matching;
pub mod parser;
pub mod specificity;
pub mod urn;
pub mod value;

pub use builder::TaggedUrnBuilder;
pub use error::TaggedUrnError;
pub use matcher::UrnMatcher;
pub use parser::parse;
pub use urn::TaggedUrn;
pub use value::TagValue;
