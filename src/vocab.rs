//! Frequent subword vocabulary.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::error::{Error, Result};

/// The most frequent entries of a ranked subword vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    tokens: HashSet<String>,
}

impl Vocabulary {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Vocabulary {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Read the first `max_vocab` entries of a vocabulary file.
    ///
    /// Each line holds a token optionally followed by its count; blank lines
    /// are skipped and do not count towards `max_vocab`.
    pub fn load(path: &Path, max_vocab: usize) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let vocab = Self::from_reader(BufReader::new(file), max_vocab)
            .map_err(|e| Error::io(path, e))?;
        info!("loaded {} frequent subwords from {}", vocab.len(), path.display());
        Ok(vocab)
    }

    pub fn from_reader<R: BufRead>(reader: R, max_vocab: usize) -> std::io::Result<Self> {
        let mut tokens = HashSet::new();
        let mut taken = 0;
        for line in reader.lines() {
            if taken == max_vocab {
                break;
            }
            let line = line?;
            if let Some(token) = line.split_whitespace().next() {
                tokens.insert(token.to_string());
                taken += 1;
            }
        }
        Ok(Vocabulary { tokens })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// True if every space-delimited token of `phrase` is in the vocabulary.
    pub fn is_frequent(&self, phrase: &str) -> bool {
        phrase.split_whitespace().all(|token| self.contains(token))
    }
}
