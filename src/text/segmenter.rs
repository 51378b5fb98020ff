//! Sentence segmenters and word tokenizers
//!
//! A segmenter is built once from its [`SegmenterKind`] and then reused for every
//! document passed through a pipeline stage.

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Splits a text into sentences
pub trait SentenceSegmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Splits a text into word tokens
pub trait WordTokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Available sentence segmenters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmenterKind {
    /// punctuation driven, see [`RuleSegmenter`]
    #[default]
    Rule,
    /// one sentence per non blank line
    Line,
}

impl SegmenterKind {
    pub const NAMES: [&'static str; 2] = ["rule", "line"];

    pub fn build(&self, max_sentence_chars: usize) -> Box<dyn SentenceSegmenter> {
        match self {
            Self::Rule => Box::new(RuleSegmenter::new(Some(max_sentence_chars), None, None, None)),
            Self::Line => Box::new(LineSegmenter),
        }
    }
}

impl FromStr for SegmenterKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rule" => Ok(Self::Rule),
            "line" => Ok(Self::Line),
            other => Err(anyhow!(
                "supported sentence segmenters: {}, found {}",
                Self::NAMES.join("/"),
                other
            )),
        }
    }
}

impl fmt::Display for SegmenterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule => write!(f, "rule"),
            Self::Line => write!(f, "line"),
        }
    }
}

/// Available word tokenizers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordTokenizerKind {
    Whitespace,
    #[default]
    Pattern,
}

impl WordTokenizerKind {
    pub const NAMES: [&'static str; 2] = ["whitespace", "pattern"];

    pub fn build(&self) -> Box<dyn WordTokenizer> {
        match self {
            Self::Whitespace => Box::new(WhitespaceTokenizer),
            Self::Pattern => Box::new(PatternTokenizer),
        }
    }
}

impl FromStr for WordTokenizerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whitespace" => Ok(Self::Whitespace),
            "pattern" => Ok(Self::Pattern),
            other => Err(anyhow!(
                "supported word tokenizers: {}, found {}",
                Self::NAMES.join("/"),
                other
            )),
        }
    }
}

/// Buffer based sentence splitter driven by stop characters
///
/// Stop characters inside a bracket or quote pair do not end a sentence, unless
/// they are also listed as `force` characters. A sentence is also cut once the
/// buffer reaches `max_buf_length` characters.
pub struct RuleSegmenter {
    max_buf_length: usize,
    stop_chars: HashSet<char>,
    force: HashSet<char>,
    parentheses: HashMap<char, char>,
}

impl RuleSegmenter {
    pub const DEFAULT_MAX_LENGTH: usize = 512;

    pub const PARENTHESES: [(char, char); 5] = [
        ('(', ')'),
        ('“', '”'),
        ('「', '」'),
        ('『', '』'),
        ('【', '】'),
    ];

    pub const STOP_CHARS: [char; 7] = ['.', '!', '?', '。', '！', '？', '\n'];

    pub fn new(
        max_buf_length: Option<usize>,
        stop_chars: Option<HashSet<char>>,
        force: Option<HashSet<char>>,
        parentheses: Option<HashMap<char, char>>,
    ) -> Self {
        let max_buf_length = max_buf_length
            .filter(|l| *l > 0)
            .unwrap_or(Self::DEFAULT_MAX_LENGTH);
        let mut stop_chars = stop_chars.unwrap_or_else(|| Self::STOP_CHARS.into_iter().collect());
        let force = force.unwrap_or_default();
        stop_chars.extend(force.iter().copied());
        let parentheses =
            parentheses.unwrap_or_else(|| Self::PARENTHESES.into_iter().collect());
        RuleSegmenter {
            max_buf_length,
            stop_chars,
            force,
            parentheses,
        }
    }

    // '.' between non-space characters (numbers, urls, abbreviations like "e.g") does not end a sentence
    fn ends_sentence(&self, c: char, next: Option<char>) -> bool {
        if c == '.' {
            next.is_none_or(char::is_whitespace)
        } else {
            true
        }
    }

    fn flush(buf: &mut String, sentences: &mut Vec<String>) {
        let sentence = buf.trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        buf.clear();
    }
}

impl Default for RuleSegmenter {
    fn default() -> Self {
        Self::new(None, None, None, None)
    }
}

impl SentenceSegmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut buf = String::new();
        let mut buf_chars = 0;
        let mut waiting_stack: Vec<char> = vec![];
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            buf.push(c);
            buf_chars += 1;

            if let Some(close) = self.parentheses.get(&c) {
                waiting_stack.push(*close);
            } else if let Some(close) = waiting_stack.last() {
                if c == *close {
                    waiting_stack.pop();
                } else if self.force.contains(&c) {
                    Self::flush(&mut buf, &mut sentences);
                    buf_chars = 0;
                    waiting_stack.clear();
                }
            } else if self.stop_chars.contains(&c) && self.ends_sentence(c, chars.peek().copied())
            {
                // keep runs like "?!" or "..." in the same sentence
                while let Some(next) = chars.peek().copied() {
                    if next == '\n' || !self.stop_chars.contains(&next) {
                        break;
                    }
                    buf.push(next);
                    chars.next();
                }
                Self::flush(&mut buf, &mut sentences);
                buf_chars = 0;
            }

            if buf_chars >= self.max_buf_length {
                Self::flush(&mut buf, &mut sentences);
                buf_chars = 0;
                waiting_stack.clear();
            }
        }
        Self::flush(&mut buf, &mut sentences);
        sentences
    }
}

/// Treats every non blank line as one sentence
#[derive(Debug, Clone, Copy, Default)]
pub struct LineSegmenter;

impl SentenceSegmenter for LineSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl WordTokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

// words (with inner apostrophes) or single punctuation marks
static WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+(?:['’]\w+)*|[^\w\s]").expect("valid word regex"));

/// Splits words and punctuation marks into separate tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternTokenizer;

impl WordTokenizer for PatternTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        WORD_REGEX
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment() {
        let segmenter = RuleSegmenter::default();
        let sentences = segmenter.segment("Hello world. Goodbye.");
        assert_eq!(sentences, vec!["Hello world.", "Goodbye."]);
    }

    #[test]
    fn test_segment_japanese() {
        let segmenter = RuleSegmenter::default();
        let sentences = segmenter.segment("これはテストです。名前はまだ無い。");
        assert_eq!(sentences, vec!["これはテストです。", "名前はまだ無い。"]);
    }

    #[test]
    fn test_segment_keeps_inner_periods() {
        let segmenter = RuleSegmenter::default();
        let sentences = segmenter.segment("Pi is 3.14 roughly. See example.com for more");
        assert_eq!(
            sentences,
            vec!["Pi is 3.14 roughly.", "See example.com for more"]
        );
    }

    #[test]
    fn test_segment_punctuation_runs() {
        let segmenter = RuleSegmenter::default();
        let sentences = segmenter.segment("Really?! Yes... Fine.");
        assert_eq!(sentences, vec!["Really?!", "Yes...", "Fine."]);
    }

    #[test]
    fn test_segment_with_stop_chars() {
        let stop_chars = HashSet::from([';']);
        let segmenter = RuleSegmenter::new(None, Some(stop_chars), None, None);
        let sentences = segmenter.segment("one; two. three");
        assert_eq!(sentences, vec!["one;", "two. three"]);
    }

    #[test]
    fn test_segment_with_parentheses() {
        let segmenter = RuleSegmenter::default();
        let sentences = segmenter.segment("He said “Stop. Now.” and left. Done.");
        assert_eq!(sentences, vec!["He said “Stop. Now.” and left.", "Done."]);
    }

    #[test]
    fn test_segment_with_force() {
        let force = HashSet::from(['|']);
        let segmenter = RuleSegmenter::new(None, None, Some(force), None);
        let sentences = segmenter.segment("a (b | c) d");
        assert_eq!(sentences, vec!["a (b |", "c) d"]);
    }

    #[test]
    fn test_segment_with_max_buf_length() {
        let segmenter = RuleSegmenter::new(Some(2), None, None, None);
        let sentences = segmenter.segment("これはテストです。");
        assert_eq!(sentences, vec!["これ", "はテ", "スト", "です", "。"]);
    }

    #[test]
    fn test_segment_blank() {
        let segmenter = RuleSegmenter::default();
        assert!(segmenter.segment("").is_empty());
        assert!(segmenter.segment("  \n \n").is_empty());
    }

    #[test]
    fn test_line_segmenter() {
        let sentences = LineSegmenter.segment("first line\n\n  second line  \n");
        assert_eq!(sentences, vec!["first line", "second line"]);
    }

    #[test]
    fn test_word_tokenizers() {
        let text = "Don't stop, world!";
        assert_eq!(
            WhitespaceTokenizer.tokenize(text),
            vec!["Don't", "stop,", "world!"]
        );
        assert_eq!(
            PatternTokenizer.tokenize(text),
            vec!["Don't", "stop", ",", "world", "!"]
        );
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("rule".parse::<SegmenterKind>().unwrap(), SegmenterKind::Rule);
        assert_eq!(" LINE ".parse::<SegmenterKind>().unwrap(), SegmenterKind::Line);
        let err = "spacy".parse::<SegmenterKind>().unwrap_err();
        assert!(err.to_string().contains("rule/line"));

        assert_eq!(
            "whitespace".parse::<WordTokenizerKind>().unwrap(),
            WordTokenizerKind::Whitespace
        );
        assert!("nltk".parse::<WordTokenizerKind>().is_err());
        assert_eq!(SegmenterKind::Line.to_string(), "line");
    }

    #[test]
    fn test_kind_build() {
        let segmenter = SegmenterKind::Line.build(512);
        assert_eq!(segmenter.segment("a. b.\nc"), vec!["a. b.", "c"]);

        let segmenter = SegmenterKind::Rule.build(512);
        assert_eq!(segmenter.segment("a. b.\nc"), vec!["a.", "b.", "c"]);

        let tokenizer = WordTokenizerKind::default().build();
        assert_eq!(tokenizer.tokenize("a, b"), vec!["a", ",", "b"]);
    }
}
