//! Lenient sentence extraction by arbitrary start/end markers
//!
//! Unlike [`super::codec::decode`], nothing outside of the markers is validated:
//! stray text is skipped and empty sentences are dropped.

use anyhow::{Context, Result};
use regex::Regex;

/// Extract every `start_tag <sentence> end_tag` occurrence (single space padding required)
pub fn extract_between_tags(text: &str, start_tag: &str, end_tag: &str) -> Result<Vec<String>> {
    let re = tag_pattern(start_tag, end_tag)?;
    Ok(extract_with(&re, text))
}

/// Compile the pattern used by [`extract_between_tags`] once, for reuse across many texts
pub fn tag_pattern(start_tag: &str, end_tag: &str) -> Result<Regex> {
    let pattern = format!(
        r"{} (.+?) {}",
        regex::escape(start_tag),
        regex::escape(end_tag)
    );
    Regex::new(&pattern).with_context(|| format!("invalid tag pattern: {pattern}"))
}

pub fn extract_with(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
