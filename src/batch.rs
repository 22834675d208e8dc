// File: src/batch.rs
use crate::core::counter::count_forms;
use crate::core::engine::{AlignmentEngine, MatchConfig};
use crate::core::types::Alignment;
use crate::errors::{AlignError, Result};
use crate::extract::EntityExtractor;
use crate::translation::TranslationLexicon;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One parallel text: an annotated source-language file and its target-language counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub source: PathBuf,
    pub target: PathBuf,
}

/// Parses `source \t target` lines. Blank lines are ignored, extra fields are ignored,
/// and a line naming only one file is rejected with its 1-based line number.
pub fn parse_batch<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<FilePair>> {
    let mut pairs = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| AlignError::io(origin, e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split('\t');
        match (fields.next(), fields.next()) {
            (Some(source), Some(target)) => pairs.push(FilePair {
                source: PathBuf::from(source),
                target: PathBuf::from(target),
            }),
            _ => {
                return Err(AlignError::MalformedInput {
                    path: origin.to_path_buf(),
                    line: line_no + 1,
                    reason: "expected <source file>\\t<target file>".to_string(),
                })
            }
        }
    }
    Ok(pairs)
}

pub fn read_batch(path: &Path) -> Result<Vec<FilePair>> {
    let file = File::open(path).map_err(|e| AlignError::io(path, e))?;
    parse_batch(BufReader::new(file), path)
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlignerConfig {
    pub match_config: MatchConfig,
    /// Strip xml-like markup nested inside entity spans.
    pub strip_annotation: bool,
    /// Align file pairs on the rayon pool. The merged output is identical to a
    /// sequential run because per-pair results are folded in batch order.
    pub parallel: bool,
}

/// Runs extraction, counting and matching over a batch of file pairs,
/// accumulating one alignment for the whole batch.
pub struct BatchAligner<'a> {
    engine: AlignmentEngine<'a>,
    extractor: EntityExtractor,
    parallel: bool,
}

impl<'a> BatchAligner<'a> {
    pub fn new(lexicon: &'a TranslationLexicon, config: AlignerConfig) -> Self {
        Self {
            engine: AlignmentEngine::with_config(lexicon, config.match_config),
            extractor: EntityExtractor::new(config.strip_annotation),
            parallel: config.parallel,
        }
    }

    /// Aligns a single file pair into `result`.
    pub fn align_pair(&self, pair: &FilePair, result: &mut Alignment) -> Result<()> {
        let source_entities = self.extractor.extract_file(&pair.source)?;
        let target_entities = self.extractor.extract_file(&pair.target)?;
        debug!(
            "{} source and {} target entities in {} / {}",
            source_entities.len(),
            target_entities.len(),
            pair.source.display(),
            pair.target.display()
        );

        let mut source = count_forms(&source_entities);
        let mut target = count_forms(&target_entities);
        self.engine.align(&mut source, &mut target, result);
        Ok(())
    }

    /// Aligns every pair, calling `on_done` after each one in batch order.
    /// The first failing pair aborts the run.
    pub fn run<F>(&self, pairs: &[FilePair], mut on_done: F) -> Result<Alignment>
    where
        F: FnMut(&FilePair),
    {
        let mut result = Alignment::new();

        if self.parallel {
            let per_pair: Vec<Result<Alignment>> = pairs
                .par_iter()
                .map(|pair| {
                    let mut local = Alignment::new();
                    self.align_pair(pair, &mut local).map(|_| local)
                })
                .collect();
            for (pair, local) in pairs.iter().zip(per_pair) {
                result.merge(local?);
                on_done(pair);
            }
        } else {
            for pair in pairs {
                info!(
                    "Processing pair {} - {}",
                    pair.source.display(),
                    pair.target.display()
                );
                self.align_pair(pair, &mut result)?;
                on_done(pair);
            }
        }

        info!(
            "Aligned {} file pairs into {} entity pairs",
            pairs.len(),
            result.len()
        );
        Ok(result)
    }
}
