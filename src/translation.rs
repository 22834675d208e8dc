// File: src/translation.rs
use crate::errors::{AlignError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Token-to-token translation probabilities, e.g. `union -> uniunea : 0.9`.
/// Loaded once and shared read-only by every file pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslationLexicon {
    table: HashMap<String, HashMap<String, f64>>,
}

impl TranslationLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a weight for `source -> target` unless one is already present.
    pub fn insert(&mut self, source: &str, target: &str, weight: f64) -> bool {
        let targets = self.table.entry(source.to_string()).or_default();
        if targets.contains_key(target) {
            return false;
        }
        targets.insert(target.to_string(), weight);
        true
    }

    pub fn weight(&self, source: &str, target: &str) -> Option<f64> {
        self.table.get(source)?.get(target).copied()
    }

    pub fn targets(&self, source: &str) -> Option<&HashMap<String, f64>> {
        self.table.get(source)
    }

    /// Number of distinct source tokens.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Parses `source \t target \t probability` lines.
    ///
    /// Lines without exactly three fields are skipped, as are lines whose probability
    /// does not parse. The first weight seen for a token pair wins.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut lexicon = Self::new();
        let mut skipped = 0usize;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let fields: Vec<&str> = line.trim().split('\t').collect();
            let [source, target, probability] = fields.as_slice() else {
                skipped += 1;
                continue;
            };
            match probability.trim().parse::<f64>() {
                Ok(weight) => {
                    lexicon.insert(source, target, weight);
                }
                Err(e) => {
                    warn!(
                        "Skipping lexicon line {}: bad probability '{}' ({})",
                        line_no + 1,
                        probability,
                        e
                    );
                    skipped += 1;
                }
            }
        }

        debug!(
            "Loaded translation lexicon: {} source tokens, {} lines skipped",
            lexicon.len(),
            skipped
        );
        Ok(lexicon)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(AlignError::LexiconNotFound(path.to_path_buf()));
        }
        let file = File::open(path).map_err(|e| AlignError::io(path, e))?;
        Self::from_reader(BufReader::new(file)).map_err(|e| AlignError::io(path, e))
    }
}

/// Scores how plausibly `a` translates to `b`, token by token.
///
/// Each whitespace token of `a` contributes its best lexicon weight against any token of
/// `b` (0 when absent). The sum is divided by `len(a) + |len(a) - len(b)| / 2`, so
/// unequal token counts are penalized. Direction matters: tokens are driven from `a`.
pub fn te_score(a: &str, b: &str, lexicon: &TranslationLexicon) -> f64 {
    let tokens_a: Vec<&str> = a.split_whitespace().collect();
    let tokens_b: Vec<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() {
        return 0.0;
    }

    let total: f64 = tokens_a
        .iter()
        .map(|token| match lexicon.targets(token) {
            Some(targets) => tokens_b
                .iter()
                .filter_map(|t| targets.get(*t).copied())
                .fold(0.0, f64::max),
            None => 0.0,
        })
        .sum();

    let length_penalty = (tokens_a.len() as f64 - tokens_b.len() as f64).abs() / 2.0;
    total / (tokens_a.len() as f64 + length_penalty)
}
