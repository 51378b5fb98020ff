//! Reversible `<t> ... </t>` encoding of sentence lists

use super::error::{Result, TaggingError};
use itertools::Itertools;

pub const OPEN_TAG: &str = "<t>";
pub const CLOSE_TAG: &str = "</t>";

// padded forms written by `encode`
const SEN_START: &str = " <t> ";
const SEN_END: &str = " </t> ";

/// Encode sentences into a single tagged string
///
/// Each sentence is wrapped as `" <t> " + sentence + " </t> "`, so consecutive
/// sentences are separated by `" </t>  <t> "`. An empty list encodes to `""`.
/// Sentences are written verbatim: embedded `<t>`/`</t>` are not escaped.
pub fn encode<S: AsRef<str>>(sentences: &[S]) -> String {
    if sentences.is_empty() {
        return String::new();
    }
    let separator = format!("{SEN_END}{SEN_START}");
    let body = sentences.iter().map(|s| s.as_ref()).join(&separator);
    format!("{SEN_START}{body}{SEN_END}")
}

/// Decode a tagged string back into its sentence list
///
/// Whitespace is allowed anywhere outside of tag pairs, any other content
/// outside of them is rejected. Sentences are trimmed, empty ones are kept.
pub fn decode(tagged: &str) -> Result<Vec<String>> {
    let text = tagged.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    // offsets in errors refer to the untrimmed input
    let base = tagged.len() - tagged.trim_start().len();

    let mut sentences = Vec::new();
    let mut pos = 0;
    loop {
        let rest = &text[pos..];
        let Some(open) = rest.find(OPEN_TAG) else {
            if sentences.is_empty() {
                return Err(TaggingError::missing_open_tag(base + pos, rest));
            }
            if !rest.trim().is_empty() {
                return Err(TaggingError::trailing_content(
                    base + pos + leading_ws_len(rest),
                    rest,
                ));
            }
            break;
        };

        let before = &rest[..open];
        if !before.trim().is_empty() {
            return Err(TaggingError::unexpected_content(
                base + pos + leading_ws_len(before),
                before,
            ));
        }

        let body_start = pos + open + OPEN_TAG.len();
        let Some(close) = text[body_start..].find(CLOSE_TAG) else {
            return Err(TaggingError::unterminated_tag(base + pos + open));
        };
        let body_end = body_start + close;
        sentences.push(text[body_start..body_end].trim().to_string());
        pos = body_end + CLOSE_TAG.len();
    }
    Ok(sentences)
}

/// Remove any literal `<t>` / `</t>` markers from raw text before re-tagging
pub fn strip_tags(text: &str) -> String {
    text.replace(OPEN_TAG, "").replace(CLOSE_TAG, "")
}

#[inline]
fn leading_ws_len(s: &str) -> usize {
    s.len() - s.trim_start().len()
}
