use crate::core::types::{Alignment, FormCounts};
use crate::fuzzy::cognate_score;
use crate::translation::{te_score, TranslationLexicon};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Minimum cognate or translation score for two different forms to be paired.
pub const THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    pub threshold: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: THRESHOLD,
        }
    }
}

/// Greedy four-phase matcher between the entity forms of one source/target text pair.
///
/// 1. identical form with a shared entity type
/// 2. identical form, any type
/// 3. different forms with a shared type, scored by cognate and translation similarity
/// 4. different forms, any type, same scoring
///
/// Each phase only sees forms that earlier phases left unmatched.
pub struct AlignmentEngine<'a> {
    lexicon: &'a TranslationLexicon,
    config: MatchConfig,
}

impl<'a> AlignmentEngine<'a> {
    pub fn new(lexicon: &'a TranslationLexicon) -> Self {
        Self::with_config(lexicon, MatchConfig::default())
    }

    pub fn with_config(lexicon: &'a TranslationLexicon, config: MatchConfig) -> Self {
        Self { lexicon, config }
    }

    /// Matches `source` against `target`, recording new pairs in `result`.
    ///
    /// Both working sets are consumed: matched forms are removed, and whatever is
    /// left afterwards had no counterpart. Pairs already present in `result` keep
    /// their score.
    pub fn align(&self, source: &mut FormCounts, target: &mut FormCounts, result: &mut Alignment) {
        let before = result.len();

        let identical_typed = self.match_identical(source, target, result, true);
        let identical = self.match_identical(source, target, result, false);
        let similar_typed = self.match_similar(source, target, result, true);
        let similar = self.match_similar(source, target, result, false);

        debug!(
            "Aligned forms (threshold {}): {} identical+type, {} identical, {} similar+type, {} similar; {} new pairs, {} source and {} target forms unmatched",
            self.config.threshold,
            identical_typed,
            identical,
            similar_typed,
            similar,
            result.len() - before,
            source.len(),
            target.len()
        );
    }

    /// Phases 1 and 2. Returns how many source forms were matched.
    fn match_identical(
        &self,
        source: &mut FormCounts,
        target: &mut FormCounts,
        result: &mut Alignment,
        require_shared_type: bool,
    ) -> usize {
        let mut matched = HashSet::new();

        for form in source.forms() {
            if !target.contains(form) {
                continue;
            }
            if require_shared_type && !source.types_overlap(form, target, form) {
                continue;
            }
            if result.insert(form, form, 1.0) {
                trace!("{form} <-> {form} (identical)");
            }
            matched.insert(form.to_string());
        }

        // Every form is unique in its set, so removing after the scan is the
        // same as removing as we go.
        source.remove_all(&matched);
        target.remove_all(&matched);
        matched.len()
    }

    /// Phases 3 and 4. Returns how many source forms were matched.
    ///
    /// A source form may pair with several target forms in one scan; the matched
    /// forms leave the working sets only once that scan is complete.
    fn match_similar(
        &self,
        source: &mut FormCounts,
        target: &mut FormCounts,
        result: &mut Alignment,
        require_shared_type: bool,
    ) -> usize {
        let mut matched_sources = 0;

        for src_form in source.snapshot() {
            let mut matched_targets = HashSet::new();

            for trg_form in target.forms() {
                if require_shared_type && !source.types_overlap(&src_form, target, trg_form) {
                    continue;
                }
                if let Some(score) = self.score(&src_form, trg_form) {
                    if result.insert(&src_form, trg_form, score) {
                        trace!("{src_form} <-> {trg_form} ({score:.4})");
                    }
                    matched_targets.insert(trg_form.to_string());
                }
            }

            if !matched_targets.is_empty() {
                matched_sources += 1;
                source.remove_all(&HashSet::from([src_form]));
                target.remove_all(&matched_targets);
            }
        }

        matched_sources
    }

    /// Combined similarity of two different forms, or `None` below threshold.
    fn score(&self, src_form: &str, trg_form: &str) -> Option<f64> {
        let cognate = cognate_score(src_form, trg_form);
        let translation = te_score(src_form, trg_form, self.lexicon);
        if cognate >= self.config.threshold || translation >= self.config.threshold {
            Some(cognate.max(translation))
        } else {
            None
        }
    }
}
