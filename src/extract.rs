//! Consistent phrase pair extraction over a word alignment.
//!
//! For every source span the tightest covering target range is computed from
//! the alignment. The span is dropped when no link touches it, or when a link
//! from outside the span lands inside that target range. Surviving target
//! ranges are then widened over unaligned target words on both sides, and
//! every widening is emitted as its own phrase pair.

use std::collections::BTreeMap;
use std::fmt;

use log::warn;

use crate::alignment::Alignment;

/// Half-open token interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Span { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, i: usize) -> bool {
        self.start <= i && i < self.end
    }

    /// True if at least one token lies strictly between the two spans.
    pub fn is_separated_from(&self, other: &Span) -> bool {
        self.end < other.start || other.end < self.start
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// An extracted phrase pair with both spans and their space-joined text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PhrasePair {
    pub source: Span,
    pub target: Span,
    pub source_text: String,
    pub target_text: String,
}

impl PhrasePair {
    fn new(src_tokens: &[&str], trg_tokens: &[&str], source: Span, target: Span) -> Self {
        PhrasePair {
            source,
            target,
            source_text: src_tokens[source.start..source.end].join(" "),
            target_text: trg_tokens[target.start..target.end].join(" "),
        }
    }
}

/// Extract every phrase pair consistent with `alignment`, ordered by
/// (source span, target span).
///
/// Links pointing past the end of either sentence are ignored.
pub fn phrase_extraction(
    src_tokens: &[&str],
    trg_tokens: &[&str],
    alignment: &Alignment,
) -> Vec<PhrasePair> {
    let srclen = src_tokens.len();
    let trglen = trg_tokens.len();

    let in_range;
    let alignment = match alignment.out_of_range(srclen, trglen) {
        Some((e, f)) => {
            warn!("ignoring links outside a {}x{} sentence pair, first {}-{}", srclen, trglen, e, f);
            in_range = Alignment::new(alignment.links().filter(|&(e, f)| e < srclen && f < trglen));
            &in_range
        }
        None => alignment,
    };

    let mut extracted: BTreeMap<(Span, Span), PhrasePair> = BTreeMap::new();

    for e_start in 0..srclen {
        for e_end in e_start..srclen {
            let (f_start, f_end) = match covering_target(alignment, e_start, e_end) {
                Some(range) => range,
                None => continue,
            };

            if !is_consistent(alignment, e_start, e_end, f_start, f_end) {
                continue;
            }

            let source = Span::new(e_start, e_end + 1);
            let mut fs = f_start;
            loop {
                let mut fe = f_end;
                loop {
                    let target = Span::new(fs, fe + 1);
                    extracted
                        .entry((source, target))
                        .or_insert_with(|| PhrasePair::new(src_tokens, trg_tokens, source, target));
                    fe += 1;
                    if fe == trglen || alignment.is_target_aligned(fe) {
                        break;
                    }
                }
                if fs == 0 {
                    break;
                }
                fs -= 1;
                if alignment.is_target_aligned(fs) {
                    break;
                }
            }
        }
    }

    extracted.into_values().collect()
}

/// Tightest target range (inclusive) covering all links out of
/// `[e_start, e_end]`, or `None` when the span is unaligned.
fn covering_target(alignment: &Alignment, e_start: usize, e_end: usize) -> Option<(usize, usize)> {
    alignment
        .links()
        .filter(|&(e, _)| e_start <= e && e <= e_end)
        .fold(None, |range, (_, f)| match range {
            None => Some((f, f)),
            Some((f_start, f_end)) => Some((f_start.min(f), f_end.max(f))),
        })
}

/// No link from outside the source span may land in the target range.
fn is_consistent(alignment: &Alignment, e_start: usize, e_end: usize, f_start: usize, f_end: usize) -> bool {
    !alignment
        .links()
        .any(|(e, f)| f_start <= f && f <= f_end && (e < e_start || e > e_end))
}
