pub mod partition;
pub mod segmenter;
pub mod tagging;

pub use partition::{partition, partition_with, PartitionBoundary, PartitionError};
pub use segmenter::{
    LineSegmenter, PatternTokenizer, RuleSegmenter, SegmenterKind, SentenceSegmenter,
    WhitespaceTokenizer, WordTokenizer, WordTokenizerKind,
};
pub use tagging::{decode, encode, TaggingError};
