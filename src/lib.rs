//! Joint Dropout data augmentation for parallel corpora.
//!
//! Aligned phrase pairs are extracted from each sentence pair, a sampled
//! subset is replaced by shared placeholder variables (`X_i` in the source,
//! `Y_i` in the target), and the rewritten pairs are written out as a new
//! training corpus.

pub mod alignment;
pub mod config;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod rewrite;
pub mod select;
pub mod vocab;

pub use alignment::Alignment;
pub use config::Config;
pub use corpus::{augment, joint_dropout, run, Corpus, CorpusWriter, PairSink, Rewritten, SentencePair, Stats};
pub use error::{AlignmentError, Error, Result};
pub use extract::{phrase_extraction, PhrasePair, Span};
pub use rewrite::replace_with_var;
pub use select::{Selection, Selector, SelectorOptions};
pub use vocab::Vocabulary;
