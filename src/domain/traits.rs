// ============================================================
// Layer 3: Core Traits (Abstractions)
// ============================================================
// The seams of the system. The application layer only sees
// these traits, so the real Burn classifier can be swapped for
// a scripted fake in tests, and a CSV file for an in-memory
// corpus.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::Path;

use crate::domain::training_example::TrainingExample;
use crate::error::Result;

// ─── Prediction ───────────────────────────────────────────────────────────────
/// Output of a classifier: the arg-max label and its softmax
/// probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label:      usize,
    /// Maximum softmax probability, in [0, 1]
    pub confidence: f32,
}

impl Prediction {
    pub fn new(label: usize, confidence: f32) -> Self {
        Self { label, confidence }
    }

    /// Arg-max over a probability vector.
    /// Returns None for an empty vector or one containing NaN.
    pub fn from_probabilities(probs: &[f32]) -> Option<Self> {
        if probs.iter().any(|p| p.is_nan()) {
            return None;
        }
        // Ties go to the lowest label
        let mut best: Option<Self> = None;
        for (label, &confidence) in probs.iter().enumerate() {
            if best.map_or(true, |b| confidence > b.confidence) {
                best = Some(Self { label, confidence });
            }
        }
        best
    }
}

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Anything that can produce labelled training examples.
///
/// Implementations:
///   - CsvCorpusLoader → question,answer,category CSV files
///   - SampleCorpus    → the built-in health questions
pub trait CorpusSource {
    fn load_all(&self) -> Result<Vec<TrainingExample>>;
}

// ─── IntentClassifier ─────────────────────────────────────────────────────────
/// Maps a fixed-length encoded sequence to a label distribution.
///
/// Implementations must be shareable across request handlers;
/// the Burn implementation serialises forward passes itself.
pub trait IntentClassifier: Send + Sync {
    fn predict(&self, token_ids: &[u32]) -> Result<Prediction>;

    fn num_classes(&self) -> usize;
}

// ─── QuestionAnswerer ─────────────────────────────────────────────────────────
/// Anything that turns a user message into a reply.
/// Always answers; failures resolve to a fallback string.
pub trait QuestionAnswerer {
    fn answer(&self, question: &str) -> String;
}

// ─── Persistable ──────────────────────────────────────────────────────────────
/// A component whose state is saved to and restored from disk.
///
/// Implementations:
///   - Vocabulary       → tokenizer.json
///   - LabelResponseMap → responses.json
///   - CategoryMapping  → categories.csv
pub trait Persistable: Sized {
    fn save(&self, path: &Path) -> Result<()>;

    /// A missing file is `ArtifactMissing`, an unreadable one
    /// `ArtifactCorrupt`.
    fn load(path: &Path) -> Result<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax() {
        let p = Prediction::from_probabilities(&[0.1, 0.7, 0.2]).unwrap();
        assert_eq!(p.label, 1);
        assert!((p.confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_argmax_rejects_empty_and_nan() {
        assert!(Prediction::from_probabilities(&[]).is_none());
        assert!(Prediction::from_probabilities(&[0.5, f32::NAN]).is_none());
    }

    #[test]
    fn test_argmax_tie_prefers_first() {
        let p = Prediction::from_probabilities(&[0.5, 0.5]).unwrap();
        assert_eq!(p.label, 0);
    }
}
