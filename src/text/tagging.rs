//! Sentence boundary tagging
//!
//! Sentence lists are stored as a single line of text in which every sentence is
//! wrapped by `<t>` and `</t>` markers. [`encode`] and [`decode`] form a strict
//! round-trip pair; [`extract_between_tags`] is a lenient reader for text written
//! with other markers or by less careful producers.

pub mod codec;
pub mod error;
pub mod extract;

pub use codec::{decode, encode, strip_tags, CLOSE_TAG, OPEN_TAG};
pub use error::{Result, TaggingError};
pub use extract::{extract_between_tags, extract_with, tag_pattern};
