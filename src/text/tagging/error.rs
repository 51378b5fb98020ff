//! Error types for sentence tag decoding

/// Structural failures found while decoding tagged text
///
/// Every variant carries the byte offset into the original (untrimmed) input
/// at which the problem was detected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TaggingError {
    #[error("No open tag found at byte {offset}: {snippet:?}")]
    MissingOpenTag { offset: usize, snippet: String },

    #[error("Unexpected content outside of tags at byte {offset}: {snippet:?}")]
    UnexpectedContent { offset: usize, snippet: String },

    #[error("Open tag at byte {offset} has no matching close tag")]
    UnterminatedTag { offset: usize },

    #[error("Trailing content after last tag at byte {offset}: {snippet:?}")]
    TrailingContent { offset: usize, snippet: String },
}

/// Result type for tag decoding
pub type Result<T> = std::result::Result<T, TaggingError>;

// longest snippet kept in an error message (chars)
const MAX_SNIPPET_CHARS: usize = 40;

fn snippet_of(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= MAX_SNIPPET_CHARS {
        text.to_string()
    } else {
        let mut s: String = text.chars().take(MAX_SNIPPET_CHARS).collect();
        s.push('…');
        s
    }
}

impl TaggingError {
    /// Create a missing open tag error
    pub fn missing_open_tag(offset: usize, text: &str) -> Self {
        Self::MissingOpenTag {
            offset,
            snippet: snippet_of(text),
        }
    }

    /// Create an unexpected content error
    pub fn unexpected_content(offset: usize, text: &str) -> Self {
        Self::UnexpectedContent {
            offset,
            snippet: snippet_of(text),
        }
    }

    /// Create an unterminated tag error
    pub fn unterminated_tag(offset: usize) -> Self {
        Self::UnterminatedTag { offset }
    }

    /// Create a trailing content error
    pub fn trailing_content(offset: usize, text: &str) -> Self {
        Self::TrailingContent {
            offset,
            snippet: snippet_of(text),
        }
    }

    /// Byte offset in the input where decoding stopped
    pub fn offset(&self) -> usize {
        match self {
            Self::MissingOpenTag { offset, .. }
            | Self::UnexpectedContent { offset, .. }
            | Self::UnterminatedTag { offset }
            | Self::TrailingContent { offset, .. } => *offset,
        }
    }

    /// Offending text, if the error was caused by stray content
    pub fn snippet(&self) -> Option<&str> {
        match self {
            Self::MissingOpenTag { snippet, .. }
            | Self::UnexpectedContent { snippet, .. }
            | Self::TrailingContent { snippet, .. } => Some(snippet.as_str()),
            Self::UnterminatedTag { .. } => None,
        }
    }

    /// Whether the input looks like it was never tagged at all
    /// (as opposed to tagging that is partially corrupted)
    pub fn is_untagged_input(&self) -> bool {
        matches!(self, Self::MissingOpenTag { .. })
    }

    /// Structural errors are deterministic, retrying the same input cannot succeed
    pub fn is_recoverable(&self) -> bool {
        false
    }

    /// Get error category for logging/monitoring
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingOpenTag { .. } => "missing_open_tag",
            Self::UnexpectedContent { .. } => "unexpected_content",
            Self::UnterminatedTag { .. } => "unterminated_tag",
            Self::TrailingContent { .. } => "trailing_content",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = TaggingError::unexpected_content(0, "hello ");
        assert!(matches!(error, TaggingError::UnexpectedContent { .. }));
        assert_eq!(
            error.to_string(),
            "Unexpected content outside of tags at byte 0: \"hello\""
        );

        let error = TaggingError::unterminated_tag(3);
        assert_eq!(
            error.to_string(),
            "Open tag at byte 3 has no matching close tag"
        );
        assert_eq!(error.offset(), 3);
        assert_eq!(error.snippet(), None);
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            TaggingError::missing_open_tag(0, "x").category(),
            "missing_open_tag"
        );
        assert_eq!(
            TaggingError::unexpected_content(0, "x").category(),
            "unexpected_content"
        );
        assert_eq!(TaggingError::unterminated_tag(0).category(), "unterminated_tag");
        assert_eq!(
            TaggingError::trailing_content(0, "x").category(),
            "trailing_content"
        );
    }

    #[test]
    fn test_untagged_input_and_recoverability() {
        assert!(TaggingError::missing_open_tag(0, "plain text").is_untagged_input());
        assert!(!TaggingError::trailing_content(9, "world").is_untagged_input());

        assert!(!TaggingError::missing_open_tag(0, "x").is_recoverable());
        assert!(!TaggingError::unterminated_tag(0).is_recoverable());
    }

    #[test]
    fn test_long_snippet_is_truncated() {
        let long = "x".repeat(100);
        let error = TaggingError::trailing_content(5, &long);
        let snippet = error.snippet().unwrap();
        assert_eq!(snippet.chars().count(), MAX_SNIPPET_CHARS + 1);
        assert!(snippet.ends_with('…'));
        assert_eq!(error.offset(), 5);
    }
}
