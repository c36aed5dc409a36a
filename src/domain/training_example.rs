// ============================================================
// Layer 3: Training Example Domain Types
// ============================================================
// A TrainingExample is one labelled row of the corpus:
//
//   question: "What should I do for a headache?"
//   answer:   "For a headache, try resting in a dark room..."
//   label:    1
//
// Labels are dense integers. Corpora store categories as
// strings ("cold", "headache", ...); CategoryMapping turns
// those into ids in the order they are first seen, so the
// first category in the file is 0, the next new one is 1...

use serde::{Deserialize, Serialize};

/// One labelled question/answer pair.
/// Immutable once loaded; only used to fit the vocabulary,
/// the classifier and the label → answer map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub question: String,
    pub answer:   String,
    pub label:    usize,
}

impl TrainingExample {
    pub fn new(question: impl Into<String>, answer: impl Into<String>, label: usize) -> Self {
        Self {
            question: question.into(),
            answer:   answer.into(),
            label,
        }
    }
}

/// Category name → dense label id, assigned in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMapping {
    // Index in this Vec is the label id
    names: Vec<String>,
}

impl CategoryMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `name`, assigning the next free id
    /// if this category has not been seen before.
    pub fn id_for(&mut self, name: &str) -> usize {
        match self.names.iter().position(|n| n == name) {
            Some(id) => id,
            None => {
                self.names.push(name.to_string());
                self.names.len() - 1
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// (name, id) pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.names.iter().enumerate().map(|(id, n)| (n.as_str(), id))
    }

    /// Rebuild a mapping from (name, id) pairs read back from disk.
    /// Returns None if the ids are not exactly 0..n.
    pub fn from_pairs(mut pairs: Vec<(String, usize)>) -> Option<Self> {
        pairs.sort_by_key(|(_, id)| *id);
        if pairs.iter().enumerate().any(|(i, (_, id))| i != *id) {
            return None;
        }
        Some(Self { names: pairs.into_iter().map(|(n, _)| n).collect() })
    }
}

/// Count of distinct labels, provided they are dense (0..n).
/// Returns None when a label is missing from the range.
pub fn dense_label_count(examples: &[TrainingExample]) -> Option<usize> {
    let max = examples.iter().map(|e| e.label).max()?;
    let mut seen = vec![false; max + 1];
    for e in examples {
        seen[e.label] = true;
    }
    if seen.iter().all(|&s| s) { Some(max + 1) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_first_seen_order() {
        let mut m = CategoryMapping::new();
        assert_eq!(m.id_for("cold"), 0);
        assert_eq!(m.id_for("headache"), 1);
        assert_eq!(m.id_for("cold"), 0);
        assert_eq!(m.id_for("emergency"), 2);
        assert_eq!(m.name(1), Some("headache"));
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn test_from_pairs_rejects_gaps() {
        let ok = CategoryMapping::from_pairs(vec![("b".into(), 1), ("a".into(), 0)]).unwrap();
        assert_eq!(ok.name(0), Some("a"));
        assert!(CategoryMapping::from_pairs(vec![("a".into(), 0), ("c".into(), 2)]).is_none());
    }

    #[test]
    fn test_dense_label_count() {
        let ex = |l| TrainingExample::new("q", "a", l);
        assert_eq!(dense_label_count(&[ex(0), ex(2), ex(1), ex(0)]), Some(3));
        assert_eq!(dense_label_count(&[ex(0), ex(2)]), None);
        assert_eq!(dense_label_count(&[]), None);
    }
}
