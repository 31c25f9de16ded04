//! Loading a parallel corpus and running joint dropout over it.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::alignment::Alignment;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::extract::{phrase_extraction, Span};
use crate::rewrite::replace_with_var;
use crate::select::Selector;
use crate::vocab::Vocabulary;

/// One line of the corpus: both sentences and their alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePair {
    pub source: String,
    pub target: String,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pairs: Vec<SentencePair>,
}

impl Corpus {
    /// Read the three line-aligned input files named in `config`.
    pub fn load(config: &Config) -> Result<Self> {
        let sources = read_lines(&config.src_file)?;
        let targets = read_lines(&config.trg_file)?;
        let alignments = read_lines(&config.alignments_file)?;

        let corpus = Self::parse(
            sources,
            targets,
            alignments,
            &config.trg_file,
            &config.alignments_file,
        )?;
        info!(
            "loaded {} sentence pairs from {} and {}",
            corpus.len(),
            config.src_file.display(),
            config.trg_file.display()
        );
        Ok(corpus)
    }

    /// Build a corpus from line-aligned records. The target and alignment
    /// must have as many lines as the source; the paths are only used in
    /// error messages.
    pub fn parse(
        sources: Vec<String>,
        targets: Vec<String>,
        alignments: Vec<String>,
        targets_path: &Path,
        alignments_path: &Path,
    ) -> Result<Self> {
        for (path, found) in [
            (targets_path, targets.len()),
            (alignments_path, alignments.len()),
        ] {
            if found != sources.len() {
                return Err(Error::LineCountMismatch {
                    path: path.to_path_buf(),
                    expected: sources.len(),
                    found,
                });
            }
        }

        let mut pairs = Vec::with_capacity(sources.len());

        for (line_no, ((source, target), record)) in sources
            .into_iter()
            .zip(targets)
            .zip(alignments)
            .enumerate()
        {
            let line = line_no + 1;
            let alignment: Alignment = record.parse().map_err(|err| Error::MalformedAlignment {
                path: alignments_path.to_path_buf(),
                line,
                source: err,
            })?;

            let source_len = source.split_whitespace().count();
            let target_len = target.split_whitespace().count();
            if let Some(link) = alignment.out_of_range(source_len, target_len) {
                return Err(Error::AlignmentOutOfRange {
                    path: alignments_path.to_path_buf(),
                    line,
                    link,
                    source_len,
                    target_len,
                });
            }
            if (source_len == 0) != (target_len == 0) {
                warn!("line {}: one side of the sentence pair is empty", line);
            }

            pairs.push(SentencePair {
                source,
                target,
                alignment,
            });
        }

        Ok(Corpus { pairs })
    }

    pub fn pairs(&self) -> &[SentencePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    BufReader::new(file)
        .lines()
        .map(|line| {
            line.map(|l| l.trim().to_string())
                .map_err(|e| Error::io(path, e))
        })
        .collect()
}

/// A sentence pair after substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub source: String,
    pub target: String,
    pub substitutions: usize,
}

/// Replace a sampled set of aligned phrases in `pair` with shared
/// `X_i` / `Y_i` variables.
pub fn joint_dropout<R: Rng>(selector: &mut Selector<'_, R>, pair: &SentencePair) -> Rewritten {
    let src_tokens: Vec<&str> = pair.source.split_whitespace().collect();
    let trg_tokens: Vec<&str> = pair.target.split_whitespace().collect();

    let phrases = phrase_extraction(&src_tokens, &trg_tokens, &pair.alignment);
    let selections = selector.select(&src_tokens, &trg_tokens, &phrases);

    if selections.is_empty() {
        return Rewritten {
            source: pair.source.clone(),
            target: pair.target.clone(),
            substitutions: 0,
        };
    }

    let src_vars: Vec<(Span, String)> = selections
        .iter()
        .map(|s| (s.source, s.source_variable()))
        .collect();
    let trg_vars: Vec<(Span, String)> = selections
        .iter()
        .map(|s| (s.target, s.target_variable()))
        .collect();

    Rewritten {
        source: replace_with_var(&src_tokens, &src_vars),
        target: replace_with_var(&trg_tokens, &trg_vars),
        substitutions: selections.len(),
    }
}

/// Destination for rewritten sentence pairs.
pub trait PairSink {
    fn write_pair(&mut self, source: &str, target: &str) -> Result<()>;
}

impl PairSink for Vec<(String, String)> {
    fn write_pair(&mut self, source: &str, target: &str) -> Result<()> {
        self.push((source.to_string(), target.to_string()));
        Ok(())
    }
}

struct OutputFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl OutputFile {
    fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        Ok(OutputFile {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line).map_err(|e| Error::io(&self.path, e))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| Error::io(&self.path, e))
    }
}

/// Writes the two output corpora and the optional merged file.
pub struct CorpusWriter {
    src: OutputFile,
    trg: OutputFile,
    merged: Option<OutputFile>,
}

impl CorpusWriter {
    pub fn create(config: &Config) -> Result<Self> {
        Ok(CorpusWriter {
            src: OutputFile::create(&config.output_src)?,
            trg: OutputFile::create(&config.output_trg)?,
            merged: config
                .output_merged
                .as_deref()
                .map(OutputFile::create)
                .transpose()?,
        })
    }

    pub fn finish(mut self) -> Result<()> {
        self.src.flush()?;
        self.trg.flush()?;
        if let Some(merged) = self.merged.as_mut() {
            merged.flush()?;
        }
        Ok(())
    }
}

impl PairSink for CorpusWriter {
    fn write_pair(&mut self, source: &str, target: &str) -> Result<()> {
        self.src.write_line(source)?;
        self.trg.write_line(target)?;
        if let Some(merged) = self.merged.as_mut() {
            if !source.is_empty() && !target.is_empty() {
                merged.write_line(&format!("{} ||| {}", source, target))?;
            }
        }
        Ok(())
    }
}

/// Counters for one pass over the corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub pairs: usize,
    pub changed: usize,
    pub substitutions: usize,
}

/// Rewrite every pair of `corpus` in order and hand it to `sink`.
pub fn augment<R, S>(corpus: &Corpus, selector: &mut Selector<'_, R>, sink: &mut S) -> Result<Stats>
where
    R: Rng,
    S: PairSink,
{
    let mut stats = Stats::default();

    for (line_no, pair) in corpus.pairs().iter().enumerate() {
        let rewritten = joint_dropout(selector, pair);
        sink.write_pair(&rewritten.source, &rewritten.target)?;

        stats.pairs += 1;
        stats.substitutions += rewritten.substitutions;
        if rewritten.substitutions > 0 {
            stats.changed += 1;
        }

        if line_no % 10000 == 0 {
            info!("processing pair: {}", line_no);
        }
    }

    Ok(stats)
}

/// Run the whole batch described by `config`.
///
/// All inputs are read and checked before any output file is created.
pub fn run(config: &Config) -> Result<Stats> {
    let corpus = Corpus::load(config)?;
    let vocab = Vocabulary::load(&config.bpe_vocab_file, config.max_vocab)?;

    let rng = StdRng::seed_from_u64(config.seed);
    let mut selector = Selector::new(&vocab, config.selector_options(), rng);

    let mut writer = CorpusWriter::create(config)?;
    let stats = augment(&corpus, &mut selector, &mut writer)?;
    writer.finish()?;

    info!(
        "rewrote {} of {} pairs with {} substitutions",
        stats.changed, stats.pairs, stats.substitutions
    );
    info!(
        "output written to: {} and {}",
        config.output_src.display(),
        config.output_trg.display()
    );
    Ok(stats)
}
