// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// A tagged surface form as found in an annotated text,
/// e.g. `Romania` with type `LOC`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub occurrence: String,
    pub entity_type: String,
}

impl Entity {
    pub fn new(occurrence: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            occurrence: occurrence.into(),
            entity_type: entity_type.into(),
        }
    }
}

/// Occurrence count per entity type for a single form.
pub type TypeCounts = BTreeMap<String, usize>;

/// The working set of one side of an alignment: lower-cased form -> type -> count.
///
/// Forms keep the order in which they were first seen, which is the order the
/// matching phases scan them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormCounts {
    entries: Vec<(String, TypeCounts)>,
    index: HashMap<String, usize>,
}

impl FormCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `form` tagged as `entity_type`.
    pub fn add(&mut self, form: &str, entity_type: &str) {
        let idx = match self.index.get(form) {
            Some(&idx) => idx,
            None => {
                self.entries.push((form.to_string(), TypeCounts::new()));
                self.index.insert(form.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        *self.entries[idx].1.entry(entity_type.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, form: &str) -> Option<&TypeCounts> {
        self.index.get(form).map(|&idx| &self.entries[idx].1)
    }

    pub fn contains(&self, form: &str) -> bool {
        self.index.contains_key(form)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forms in first-seen order.
    pub fn forms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(form, _)| form.as_str())
    }

    /// Owned copy of the current forms, used as the scan snapshot of a phase.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.iter().map(|(form, _)| form.clone()).collect()
    }

    /// True when both forms are present and share at least one entity type.
    pub fn types_overlap(&self, form: &str, other: &FormCounts, other_form: &str) -> bool {
        match (self.get(form), other.get(other_form)) {
            (Some(ours), Some(theirs)) => ours.keys().any(|t| theirs.contains_key(t)),
            _ => false,
        }
    }

    /// Removes every form in `forms`, keeping the relative order of the rest.
    pub fn remove_all(&mut self, forms: &HashSet<String>) {
        if forms.is_empty() {
            return;
        }
        self.entries.retain(|(form, _)| !forms.contains(form));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, (form, _))| (form.clone(), idx))
            .collect();
    }
}

/// One matched pair of forms and its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub source: String,
    pub target: String,
    pub score: f64,
}

/// Accumulated alignment across every processed file pair.
///
/// Pairs are kept in insertion order and a pair, once recorded, keeps its first score.
#[derive(Debug, Clone, Default)]
pub struct Alignment {
    pairs: Vec<AlignedPair>,
    index: HashMap<(String, String), usize>,
}

impl Alignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `source -> target` unless that pair is already present.
    /// Returns whether the pair was newly inserted.
    pub fn insert(&mut self, source: &str, target: &str, score: f64) -> bool {
        let key = (source.to_string(), target.to_string());
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.pairs.len());
        self.pairs.push(AlignedPair {
            source: source.to_string(),
            target: target.to_string(),
            score,
        });
        true
    }

    pub fn score(&self, source: &str, target: &str) -> Option<f64> {
        self.index
            .get(&(source.to_string(), target.to_string()))
            .map(|&idx| self.pairs[idx].score)
    }

    pub fn contains(&self, source: &str, target: &str) -> bool {
        self.score(source, target).is_some()
    }

    /// Folds `other` into `self` in its insertion order; existing pairs win.
    pub fn merge(&mut self, other: Alignment) {
        for pair in other.pairs {
            self.insert(&pair.source, &pair.target, pair.score);
        }
    }

    pub fn pairs(&self) -> &[AlignedPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl AlignedPair {
    /// The `source \t target` key under which the pair is reported.
    pub fn key(&self) -> String {
        format!("{}\t{}", self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_counts_keep_first_seen_order() {
        let mut counts = FormCounts::new();
        counts.add("roma", "LOC");
        counts.add("ion", "PER");
        counts.add("roma", "ORG");
        counts.add("roma", "LOC");

        assert_eq!(counts.forms().collect::<Vec<_>>(), vec!["roma", "ion"]);
        let roma = counts.get("roma").unwrap();
        assert_eq!(roma.get("LOC"), Some(&2));
        assert_eq!(roma.get("ORG"), Some(&1));
    }

    #[test]
    fn test_remove_all_reindexes() {
        let mut counts = FormCounts::new();
        for form in ["a", "b", "c", "d"] {
            counts.add(form, "LOC");
        }
        let gone: HashSet<String> = ["b", "c"].iter().map(|s| s.to_string()).collect();
        counts.remove_all(&gone);

        assert_eq!(counts.forms().collect::<Vec<_>>(), vec!["a", "d"]);
        assert!(!counts.contains("b"));
        assert_eq!(counts.get("d").and_then(|t| t.get("LOC")), Some(&1));
    }

    #[test]
    fn test_types_overlap() {
        let mut src = FormCounts::new();
        src.add("x", "LOC");
        src.add("x", "PER");
        let mut trg = FormCounts::new();
        trg.add("y", "PER");
        trg.add("z", "ORG");

        assert!(src.types_overlap("x", &trg, "y"));
        assert!(!src.types_overlap("x", &trg, "z"));
        assert!(!src.types_overlap("missing", &trg, "y"));
    }

    #[test]
    fn test_alignment_insert_if_absent() {
        let mut alignment = Alignment::new();
        assert!(alignment.insert("roma", "roma", 1.0));
        assert!(!alignment.insert("roma", "roma", 0.7));
        assert_eq!(alignment.score("roma", "roma"), Some(1.0));
        assert_eq!(alignment.len(), 1);
        assert_eq!(alignment.pairs()[0].key(), "roma\troma");
    }

    #[test]
    fn test_merge_keeps_existing_scores() {
        let mut first = Alignment::new();
        first.insert("london", "londra", 0.62);
        let mut second = Alignment::new();
        second.insert("london", "londra", 0.9);
        second.insert("paris", "paris", 1.0);

        first.merge(second);
        assert_eq!(first.score("london", "londra"), Some(0.62));
        assert_eq!(first.pairs()[1].source, "paris");
    }
}
