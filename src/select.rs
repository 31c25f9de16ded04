//! Choosing which phrase pairs to replace with variables.

use log::debug;
use rand::seq::index;
use rand::Rng;

use crate::extract::{PhrasePair, Span};
use crate::rewrite::{is_variable_token, source_variable, target_variable};
use crate::vocab::Vocabulary;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorOptions {
    /// Fraction of surviving candidates to substitute, in `[0, 1]`.
    pub vardrop: f64,
    /// Candidates whose word counts differ by this much or more are dropped.
    pub length_diff_threshold: usize,
    /// Optional per-sentence cap on substitutions.
    pub max_phrases: Option<usize>,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        SelectorOptions {
            vardrop: 0.1,
            length_diff_threshold: 2,
            max_phrases: None,
        }
    }
}

/// A phrase pair chosen for substitution, with its shared variable index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub source: Span,
    pub target: Span,
}

impl Selection {
    pub fn source_variable(&self) -> String {
        source_variable(self.index)
    }

    pub fn target_variable(&self) -> String {
        target_variable(self.index)
    }
}

/// Samples non-conflicting phrase pairs using an owned random generator.
pub struct Selector<'v, R> {
    vocab: &'v Vocabulary,
    options: SelectorOptions,
    rng: R,
}

impl<'v, R: Rng> Selector<'v, R> {
    pub fn new(vocab: &'v Vocabulary, options: SelectorOptions, rng: R) -> Self {
        Selector {
            vocab,
            options,
            rng,
        }
    }

    /// Phrase pairs that pass the length, text, vocabulary and
    /// free-neighbour checks, in the order given.
    pub fn candidates<'p>(
        &self,
        src_tokens: &[&str],
        trg_tokens: &[&str],
        phrases: &'p [PhrasePair],
    ) -> Vec<&'p PhrasePair> {
        phrases
            .iter()
            .filter(|p| {
                word_count(&p.source_text).abs_diff(word_count(&p.target_text))
                    < self.options.length_diff_threshold
            })
            .filter(|p| {
                occurs_at(src_tokens, p.source, &p.source_text)
                    && occurs_at(trg_tokens, p.target, &p.target_text)
            })
            .filter(|p| self.vocab.is_frequent(&p.source_text) && self.vocab.is_frequent(&p.target_text))
            .filter(|p| has_free_neighbours(src_tokens, p.source) && has_free_neighbours(trg_tokens, p.target))
            .collect()
    }

    /// Pick `round(vardrop * n)` of the `n` candidates without replacement.
    ///
    /// Sampled pairs that overlap or touch an earlier pair (in extraction
    /// order) on either side are dropped. Variable indices follow the
    /// sampler's order.
    pub fn select(
        &mut self,
        src_tokens: &[&str],
        trg_tokens: &[&str],
        phrases: &[PhrasePair],
    ) -> Vec<Selection> {
        let candidates = self.candidates(src_tokens, trg_tokens, phrases);
        let n = candidates.len();
        if n == 0 {
            return Vec::new();
        }

        let mut amount = ((self.options.vardrop * n as f64).round() as usize).min(n);
        if let Some(max) = self.options.max_phrases {
            amount = amount.min(max);
        }

        let mut sampled = index::sample(&mut self.rng, n, amount).into_vec();

        let mut by_extraction = sampled.clone();
        by_extraction.sort_unstable();
        let mut accepted: Vec<usize> = Vec::with_capacity(by_extraction.len());
        for i in by_extraction {
            let c = candidates[i];
            let clear = accepted.iter().all(|&j| {
                let other = candidates[j];
                c.source.is_separated_from(&other.source) && c.target.is_separated_from(&other.target)
            });
            if clear {
                accepted.push(i);
            }
        }
        sampled.retain(|i| accepted.contains(i));

        debug!(
            "{} phrases, {} candidates, {} sampled, {} kept",
            phrases.len(),
            n,
            amount,
            sampled.len()
        );

        sampled
            .into_iter()
            .enumerate()
            .map(|(index, i)| Selection {
                index,
                source: candidates[i].source,
                target: candidates[i].target,
            })
            .collect()
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn occurs_at(tokens: &[&str], span: Span, text: &str) -> bool {
    span.end <= tokens.len()
        && !span.is_empty()
        && tokens[span.start..span.end]
            .iter()
            .copied()
            .eq(text.split_whitespace())
}

/// The tokens right before and after `span`, where present, must not be
/// variables already.
fn has_free_neighbours(tokens: &[&str], span: Span) -> bool {
    let left = span.start.checked_sub(1).and_then(|i| tokens.get(i));
    let right = tokens.get(span.end);
    left.into_iter().chain(right).all(|t| !is_variable_token(t))
}
