//! Word alignments in `i-j` notation.

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::AlignmentError;

/// A set of (source index, target index) links for one sentence pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    links: BTreeSet<(usize, usize)>,
    target_aligned: BTreeSet<usize>,
}

impl Alignment {
    pub fn new<I>(links: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let links: BTreeSet<(usize, usize)> = links.into_iter().collect();
        let target_aligned = links.iter().map(|&(_, f)| f).collect();
        Alignment {
            links,
            target_aligned,
        }
    }

    pub fn links(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.links.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// True if some link ends at target position `f`.
    pub fn is_target_aligned(&self, f: usize) -> bool {
        self.target_aligned.contains(&f)
    }

    /// First link that does not fit sentences of the given lengths.
    pub fn out_of_range(&self, source_len: usize, target_len: usize) -> Option<(usize, usize)> {
        self.links()
            .find(|&(e, f)| e >= source_len || f >= target_len)
    }
}

impl FromStr for Alignment {
    type Err = AlignmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let links = s
            .split_whitespace()
            .map(parse_link)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Alignment::new(links))
    }
}

fn parse_link(x: &str) -> Result<(usize, usize), AlignmentError> {
    let parts: Vec<&str> = x.split('-').collect();
    if parts.len() != 2 {
        return Err(AlignmentError::MissingSeparator(x.to_string()));
    }
    match (parts[0].parse(), parts[1].parse()) {
        (Ok(e), Ok(f)) => Ok((e, f)),
        _ => Err(AlignmentError::BadIndex(x.to_string())),
    }
}
