// ============================================================
// Layer 4: Vocabulary Encoder
// ============================================================
// Turns normalised text into the fixed-length integer
// sequences the classifier consumes.
//
// Fitting:
//   1. Normalise every question and split on whitespace
//   2. Count every word across the corpus
//   3. Sort by count, descending; equal counts keep the
//      order in which the words were first seen
//   4. The top `max_vocabulary_size` words get ids 1, 2, 3...
//      Id 0 is never assigned: it is the padding value.
//
// Encoding ("how do i treat a burn", max_length = 8):
//
//   words     how  do  i  treat  a  burn
//   ids        12   7  3     41  2    58      (unknown words dropped)
//   padded     0  0  12  7  3  41  2  58      (zeros on the LEFT)
//
// Sequences longer than max_length keep their LAST max_length
// ids, i.e. truncation happens on the left as well.
//
// Unknown words are dropped rather than mapped to an
// out-of-vocabulary id, so "xyzzy headache" encodes exactly
// like "headache".

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::data::normalizer::Normalizer;

pub const PAD_ID: u32 = 0;

/// Word ↔ id mapping plus the raw counts it was built from.
///
/// Field names follow the classic Keras tokenizer JSON layout.
/// BTreeMaps give a stable key order on disk, so saving a
/// loaded vocabulary reproduces the original file byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// word → id, ids start at 1
    word_index:     BTreeMap<String, u32>,
    /// id → word, the exact inverse of word_index
    index_word:     BTreeMap<u32, String>,
    /// Occurrences of every word seen while fitting, including
    /// words that did not make the size cut
    word_counts:    BTreeMap<String, u64>,
    /// Number of texts the vocabulary was fitted on
    document_count: usize,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vocabulary from `corpus` in one step.
    pub fn fitted<S: AsRef<str>>(corpus: &[S], max_vocabulary_size: usize) -> Self {
        let mut vocab = Self::new();
        vocab.fit(corpus, max_vocabulary_size);
        vocab
    }

    /// Replace the current state with one fitted on `corpus`.
    pub fn fit<S: AsRef<str>>(&mut self, corpus: &[S], max_vocabulary_size: usize) {
        let normalizer = Normalizer::new();

        // (word, count) in first-seen order, plus a lookup into it
        let mut ordered:  Vec<(String, u64)>    = Vec::new();
        let mut position: HashMap<String, usize> = HashMap::new();

        for text in corpus {
            let clean = normalizer.normalize(text.as_ref());
            for word in clean.split_whitespace() {
                match position.get(word) {
                    Some(&i) => ordered[i].1 += 1,
                    None => {
                        position.insert(word.to_string(), ordered.len());
                        ordered.push((word.to_string(), 1));
                    }
                }
            }
        }

        self.word_counts    = ordered.iter().cloned().collect();
        self.document_count = corpus.len();

        // sort_by is stable, so ties stay in first-seen order
        ordered.sort_by(|a, b| b.1.cmp(&a.1));
        ordered.truncate(max_vocabulary_size);

        self.word_index.clear();
        self.index_word.clear();
        for (i, (word, _)) in ordered.into_iter().enumerate() {
            let id = i as u32 + 1;
            self.index_word.insert(id, word.clone());
            self.word_index.insert(word, id);
        }

        tracing::debug!(
            "Vocabulary fitted: {} words indexed out of {} distinct, {} documents",
            self.word_index.len(),
            self.word_counts.len(),
            self.document_count
        );
    }

    /// Ids of the known words in `text`, unpadded.
    pub fn to_ids(&self, text: &str) -> Vec<u32> {
        Normalizer::new()
            .normalize(text)
            .split_whitespace()
            .filter_map(|w| self.word_index.get(w).copied())
            .collect()
    }

    /// Exactly `max_length` ids: known words only, left-truncated
    /// and left-padded with PAD_ID.
    pub fn encode(&self, text: &str, max_length: usize) -> Vec<u32> {
        let ids = self.to_ids(text);
        if ids.len() >= max_length {
            return ids[ids.len() - max_length..].to_vec();
        }
        let mut padded = vec![PAD_ID; max_length - ids.len()];
        padded.extend(ids);
        padded
    }

    pub fn id(&self, word: &str) -> Option<u32> {
        self.word_index.get(word).copied()
    }

    pub fn word(&self, id: u32) -> Option<&str> {
        self.index_word.get(&id).map(String::as_str)
    }

    pub fn count(&self, word: &str) -> Option<u64> {
        self.word_counts.get(word).copied()
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Number of indexed words (ids 1..=len)
    pub fn len(&self) -> usize {
        self.word_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_index.is_empty()
    }

    /// Rows needed in an embedding table: every id plus padding.
    pub fn embedding_rows(&self) -> usize {
        self.len() + 1
    }

    /// Check the two mappings are exact inverses over ids 1..=len.
    /// Used when loading a vocabulary someone else wrote.
    pub fn check_consistency(&self) -> Result<(), String> {
        if self.word_index.len() != self.index_word.len() {
            return Err(format!(
                "word_index has {} entries but index_word has {}",
                self.word_index.len(),
                self.index_word.len()
            ));
        }
        for (word, &id) in &self.word_index {
            if id == PAD_ID || id as usize > self.word_index.len() {
                return Err(format!("id {id} for '{word}' is out of range"));
            }
            if self.index_word.get(&id).map(String::as_str) != Some(word.as_str()) {
                return Err(format!("'{word}' → {id} has no matching index_word entry"));
            }
        }
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<&'static str> {
        vec![
            "What are the symptoms of a cold?",
            "How do I know if I have the flu?",
            "What should I do for a headache?",
        ]
    }

    #[test]
    fn test_most_frequent_words_get_lowest_ids() {
        let v = Vocabulary::fitted(&corpus(), 100);
        // "i" appears 3 times; "what", "the", "a", "do" twice each
        // and keep their first-seen order among themselves
        assert_eq!(v.id("i"), Some(1));
        assert_eq!(v.id("what"), Some(2));
        assert_eq!(v.id("the"), Some(3));
        assert_eq!(v.id("a"), Some(4));
        assert_eq!(v.id("do"), Some(5));
        assert_eq!(v.id("are"), Some(6));
        assert_eq!(v.word(1), Some("i"));
        assert_eq!(v.count("i"), Some(3));
        assert_eq!(v.document_count(), 3);
    }

    #[test]
    fn test_size_cut_keeps_counts() {
        let v = Vocabulary::fitted(&corpus(), 2);
        assert_eq!(v.len(), 2);
        assert_eq!(v.id("a"), None);
        assert_eq!(v.count("headache"), Some(1));
        assert_eq!(v.embedding_rows(), 3);
    }

    #[test]
    fn test_encode_is_stable() {
        let v = Vocabulary::fitted(&corpus(), 100);
        let first = v.encode("headache", 5);
        for _ in 0..3 {
            assert_eq!(v.encode("headache", 5), first);
        }
        assert_eq!(first[4], v.id("headache").unwrap());
    }

    #[test]
    fn test_encode_pads_left_and_drops_unknown() {
        let v = Vocabulary::fitted(&corpus(), 100);
        let ids = v.encode("xyzzy flu", 4);
        assert_eq!(ids, vec![0, 0, 0, v.id("flu").unwrap()]);
    }

    #[test]
    fn test_encode_length_is_always_max_length() {
        let v = Vocabulary::fitted(&corpus(), 100);
        let long = "what ".repeat(1500);
        assert_eq!(v.encode("", 10).len(), 10);
        assert_eq!(v.encode("cold", 10).len(), 10);
        assert_eq!(v.encode(&long, 10).len(), 10);
        assert_eq!(v.encode("", 10), vec![PAD_ID; 10]);
    }

    #[test]
    fn test_truncation_keeps_the_tail() {
        let v = Vocabulary::fitted(&corpus(), 100);
        let ids = v.encode("what are the symptoms of a cold", 2);
        assert_eq!(ids, vec![v.id("a").unwrap(), v.id("cold").unwrap()]);
    }

    #[test]
    fn test_consistency_check() {
        let v = Vocabulary::fitted(&corpus(), 100);
        assert!(v.check_consistency().is_ok());

        let mut broken = v.clone();
        broken.index_word.insert(1, "nope".to_string());
        assert!(broken.check_consistency().is_err());
    }
}
