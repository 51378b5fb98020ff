//! Pipeline configuration loaded from `SENTENCE_PREP_*` environment variables

use crate::text::partition::PartitionBoundary;
use crate::text::segmenter::{SegmenterKind, SentenceSegmenter, WordTokenizer, WordTokenizerKind};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "SENTENCE_PREP_";

/// Configuration for the sentence preparation stages
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PrepConfig {
    /// Sentence segmenter used when tagging files
    #[serde(default)]
    pub segmenter: SegmenterKind,
    #[serde(default)]
    pub word_tokenizer: WordTokenizerKind,
    /// Stopping bound of the chunk walk
    #[serde(default)]
    pub partition_boundary: PartitionBoundary,
    /// Log progress every n lines while reading files
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
    /// Maximum sentence length (chars) for the rule segmenter
    #[serde(default = "default_max_sentence_chars")]
    pub max_sentence_chars: usize,
    /// Remove `<t>`/`</t>` already present in input lines before tagging
    #[serde(default)]
    pub remove_existing_tags: bool,
}

fn default_progress_interval() -> usize {
    1000
}

fn default_max_sentence_chars() -> usize {
    crate::text::segmenter::RuleSegmenter::DEFAULT_MAX_LENGTH
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            segmenter: SegmenterKind::default(),
            word_tokenizer: WordTokenizerKind::default(),
            partition_boundary: PartitionBoundary::default(),
            progress_interval: default_progress_interval(),
            max_sentence_chars: default_max_sentence_chars(),
            remove_existing_tags: false,
        }
    }
}

impl PrepConfig {
    pub fn load_from_env() -> Result<Self> {
        let conf = envy::prefixed(ENV_PREFIX)
            .from_env::<PrepConfig>()
            .context("cannot read sentence prep config from env:")?;
        conf.validate()?;
        tracing::debug!("loaded config: {:?}", conf);
        Ok(conf)
    }

    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let conf = envy::prefixed(ENV_PREFIX)
            .from_iter::<_, PrepConfig>(vars)
            .context("cannot read sentence prep config:")?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn validate(&self) -> Result<()> {
        if self.progress_interval == 0 {
            return Err(anyhow!("progress_interval must be greater than 0"));
        }
        if self.max_sentence_chars == 0 {
            return Err(anyhow!("max_sentence_chars must be greater than 0"));
        }
        Ok(())
    }

    pub fn build_segmenter(&self) -> Box<dyn SentenceSegmenter> {
        self.segmenter.build(self.max_sentence_chars)
    }

    pub fn build_word_tokenizer(&self) -> Box<dyn WordTokenizer> {
        self.word_tokenizer.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let conf = PrepConfig::from_vars(Vec::new())?;
        assert_eq!(conf, PrepConfig::default());
        assert_eq!(conf.segmenter, SegmenterKind::Rule);
        assert_eq!(conf.word_tokenizer, WordTokenizerKind::Pattern);
        assert_eq!(conf.partition_boundary, PartitionBoundary::Legacy);
        assert_eq!(conf.progress_interval, 1000);
        assert_eq!(conf.max_sentence_chars, 512);
        assert!(!conf.remove_existing_tags);
        Ok(())
    }

    #[test]
    fn test_from_vars() -> Result<()> {
        let conf = PrepConfig::from_vars(vars(&[
            ("SENTENCE_PREP_SEGMENTER", "line"),
            ("SENTENCE_PREP_WORD_TOKENIZER", "whitespace"),
            ("SENTENCE_PREP_PARTITION_BOUNDARY", "exclusive"),
            ("SENTENCE_PREP_PROGRESS_INTERVAL", "10"),
            ("SENTENCE_PREP_REMOVE_EXISTING_TAGS", "true"),
            ("UNRELATED_VAR", "ignored"),
        ]))?;
        assert_eq!(conf.segmenter, SegmenterKind::Line);
        assert_eq!(conf.word_tokenizer, WordTokenizerKind::Whitespace);
        assert_eq!(conf.partition_boundary, PartitionBoundary::Exclusive);
        assert_eq!(conf.progress_interval, 10);
        assert!(conf.remove_existing_tags);
        Ok(())
    }

    #[test]
    fn test_unknown_segmenter() {
        let res = PrepConfig::from_vars(vars(&[("SENTENCE_PREP_SEGMENTER", "spacy")]));
        assert!(res.is_err());
    }

    #[test]
    fn test_validation() {
        let res = PrepConfig::from_vars(vars(&[("SENTENCE_PREP_PROGRESS_INTERVAL", "0")]));
        assert!(res.is_err());

        let conf = PrepConfig {
            max_sentence_chars: 0,
            ..Default::default()
        };
        assert!(conf.validate().is_err());
        assert!(PrepConfig::default().validate().is_ok());
    }

    #[test]
    fn test_build_components() {
        let conf = PrepConfig {
            segmenter: SegmenterKind::Line,
            ..Default::default()
        };
        let segmenter = conf.build_segmenter();
        assert_eq!(segmenter.segment("a. b.\nc"), vec!["a. b.", "c"]);
        let tokenizer = conf.build_word_tokenizer();
        assert_eq!(tokenizer.tokenize("a b."), vec!["a", "b", "."]);
    }
}
