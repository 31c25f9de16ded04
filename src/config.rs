//! JSON run configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::select::SelectorOptions;

pub const DEFAULT_SEED: u64 = 12;
pub const DEFAULT_LENGTH_DIFF_THRESHOLD: usize = 2;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub src_file: PathBuf,
    pub trg_file: PathBuf,
    pub alignments_file: PathBuf,
    pub bpe_vocab_file: PathBuf,
    pub max_vocab: usize,
    /// Phrase length criterion. Read but not used beyond the length
    /// difference threshold.
    #[serde(default)]
    pub length: usize,
    pub vardrop: f64,
    pub output_src: PathBuf,
    pub output_trg: PathBuf,
    /// Optional `source ||| target` copy of the output.
    #[serde(default)]
    pub output_merged: Option<PathBuf>,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_length_diff_threshold")]
    pub length_diff_threshold: usize,
    #[serde(default)]
    pub max_phrases: Option<usize>,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_length_diff_threshold() -> usize {
    DEFAULT_LENGTH_DIFF_THRESHOLD
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.vardrop.is_finite() || !(0.0..=1.0).contains(&self.vardrop) {
            return Err(Error::InvalidConfig(format!(
                "vardrop must be within [0, 1], got {}",
                self.vardrop
            )));
        }
        if self.length_diff_threshold == 0 {
            return Err(Error::InvalidConfig(
                "length_diff_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn selector_options(&self) -> SelectorOptions {
        SelectorOptions {
            vardrop: self.vardrop,
            length_diff_threshold: self.length_diff_threshold,
            max_phrases: self.max_phrases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "src_file": "train.de",
        "trg_file": "train.en",
        "alignments_file": "de-en.align",
        "bpe_vocab_file": "vocab.bpe",
        "max_vocab": 5000,
        "length": 3,
        "vardrop": 0.1,
        "output_src": "out.de",
        "output_trg": "out.en"
    }"#;

    #[test]
    fn test_defaults() {
        let config = Config::from_json(MINIMAL).unwrap();
        assert_eq!(config.max_vocab, 5000);
        assert_eq!(config.length, 3);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.length_diff_threshold, 2);
        assert_eq!(config.max_phrases, None);
        assert!(config.output_merged.is_none());
        assert_eq!(config.src_file, PathBuf::from("train.de"));
    }

    #[test]
    fn test_selector_options() {
        let data = MINIMAL.replace("\"length\": 3", "\"max_phrases\": 4, \"length_diff_threshold\": 3");
        let options = Config::from_json(&data).unwrap().selector_options();
        assert_eq!(options.vardrop, 0.1);
        assert_eq!(options.length_diff_threshold, 3);
        assert_eq!(options.max_phrases, Some(4));
    }

    #[test]
    fn test_vardrop_out_of_range() {
        let data = MINIMAL.replace("0.1", "1.5");
        assert!(matches!(Config::from_json(&data), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let data = MINIMAL.replace("\"length\": 3", "\"length_diff_threshold\": 0");
        assert!(matches!(Config::from_json(&data), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_key() {
        let data = MINIMAL.replace("\"max_vocab\": 5000,", "");
        assert!(matches!(Config::from_json(&data), Err(Error::Config(_))));
    }
}
