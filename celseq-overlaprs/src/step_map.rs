use std::collections::BTreeMap;
use std::ops::Bound::Excluded;

use serde::{Deserialize, Serialize};

use crate::label_set::LabelSet;

/// A run-length map from positions on one coordinate axis to [`LabelSet`]s.
///
/// Each key is the first position of a run; the run holds its set up to (not
/// including) the next key. Positions before the first key carry the empty
/// set, and the last key always maps to the empty set, so the map describes
/// a finite set of labeled runs separated by explicit gaps.
///
/// The partition is kept minimal: no two consecutive keys map to equal sets.
/// Because of that, two maps built from the same insertions in any order are
/// structurally identical.
///
/// # Examples
///
/// ```
/// use celseq_overlaprs::{LabelSet, StepMap};
///
/// let mut steps = StepMap::new();
/// steps.insert(0, 100, "G1");
/// steps.insert(50, 150, "G2");
///
/// let runs: Vec<(u32, u32, String)> = steps
///     .runs()
///     .map(|(start, end, labels)| (start, end, labels.to_string()))
///     .collect();
///
/// assert_eq!(runs, vec![
///     (0, 50, "{G1}".to_string()),
///     (50, 100, "{G1,G2}".to_string()),
///     (100, 150, "{G2}".to_string()),
/// ]);
/// assert_eq!(steps.query(40, 60), LabelSet::from_iter(["G1", "G2"]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepMap {
    steps: BTreeMap<u32, LabelSet>,
}

impl StepMap {
    pub fn new() -> Self {
        StepMap {
            steps: BTreeMap::new(),
        }
    }

    /// Union `label` into every position of [start, end).
    ///
    /// Costs `O(log n + k)` where `k` is the number of runs overlapping the
    /// range. Empty ranges are ignored; callers validate them beforehand.
    pub fn insert(&mut self, start: u32, end: u32, label: &str) {
        if start >= end {
            return;
        }

        self.split_at(start);
        self.split_at(end);

        for (_, labels) in self.steps.range_mut(start..end) {
            labels.insert(label);
        }

        self.coalesce(start, end);
    }

    /// Union of the label sets of every run overlapping [start, end).
    pub fn query(&self, start: u32, end: u32) -> LabelSet {
        let mut hits = LabelSet::new();
        if start >= end {
            return hits;
        }

        // the run covering `start` may begin before it
        if let Some((_, labels)) = self.steps.range(..=start).next_back() {
            hits.union_with(labels);
        }
        for (_, labels) in self.steps.range((Excluded(start), Excluded(end))) {
            hits.union_with(labels);
        }

        hits
    }

    /// Iterate over the labeled runs as `(start, end, labels)`, in coordinate
    /// order. Gaps (runs with an empty set) are skipped.
    pub fn runs(&self) -> impl Iterator<Item = (u32, u32, &LabelSet)> + '_ {
        self.steps
            .iter()
            .zip(self.steps.keys().skip(1))
            .filter(|((_, labels), _)| !labels.is_empty())
            .map(|((start, labels), end)| (*start, *end, labels))
    }

    /// Number of labeled runs.
    pub fn n_runs(&self) -> usize {
        self.runs().count()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Make sure a run starts exactly at `pos`, copying the set of the run
    /// that covered it.
    fn split_at(&mut self, pos: u32) {
        if self.steps.contains_key(&pos) {
            return;
        }
        let carried = self
            .steps
            .range(..pos)
            .next_back()
            .map(|(_, labels)| labels.clone())
            .unwrap_or_default();
        self.steps.insert(pos, carried);
    }

    /// Drop every key in [start, end] whose set equals the set of the run
    /// just before it.
    fn coalesce(&mut self, start: u32, end: u32) {
        let empty = LabelSet::new();
        let mut redundant: Vec<u32> = Vec::new();

        let mut previous = self
            .steps
            .range(..start)
            .next_back()
            .map(|(_, labels)| labels)
            .unwrap_or(&empty);

        for (pos, labels) in self.steps.range(start..=end) {
            if labels == previous {
                redundant.push(*pos);
            } else {
                previous = labels;
            }
        }

        for pos in redundant {
            self.steps.remove(&pos);
        }
    }
}
