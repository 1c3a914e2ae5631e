use std::collections::BTreeSet;
use std::collections::btree_set;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// A set of feature identifiers attached to a run of positions.
///
/// Duplicates collapse and iteration is always in sorted order, so two sets
/// holding the same labels compare equal no matter how they were built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelSet(BTreeSet<String>);

impl LabelSet {
    pub fn new() -> Self {
        LabelSet(BTreeSet::new())
    }

    /// Add a label, returning `true` if it was not present before.
    pub fn insert(&mut self, label: &str) -> bool {
        if self.0.contains(label) {
            return false;
        }
        self.0.insert(label.to_string())
    }

    /// Add every label of `other` to this set.
    pub fn union_with(&mut self, other: &LabelSet) {
        for label in other.iter() {
            self.insert(label);
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for LabelSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        LabelSet(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for LabelSet {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.iter().collect();
        write!(f, "{{{}}}", labels.join(","))
    }
}
