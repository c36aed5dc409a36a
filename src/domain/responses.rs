// ============================================================
// Layer 3: Label Responses and the Response Selector
// ============================================================
// The classifier only predicts a label. What the user reads
// comes from a LabelResponseMap built at training time:
// for every label, the answer of the FIRST training example
// carrying that label.
//
// The ResponseSelector sits in front of that map and applies
// the confidence gate:
//
//   confidence <  threshold  → clarification prompt
//   confidence >= threshold  → map[label]
//
// A label missing from the map means the artifacts were not
// produced by the same training run. That is logged loudly
// and answered with a fixed "no answer yet" string.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::training_example::TrainingExample;
use crate::domain::traits::Prediction;

pub const CLARIFICATION_PROMPT: &str =
    "I'm not sure I understand your question. Could you please rephrase it?";

pub const NO_ANSWER_YET: &str = "I don't have an answer for that yet.";

pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Label → canned answer. Exactly one answer per label.
///
/// Serialised as a JSON object keyed by the label as a string
/// (`{"0": "...", "1": "..."}`); BTreeMap keeps the key order
/// stable so save → load → save is byte-identical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelResponseMap {
    responses: BTreeMap<usize, String>,
}

impl LabelResponseMap {
    pub fn new(responses: BTreeMap<usize, String>) -> Self {
        Self { responses }
    }

    /// First answer seen for each label wins.
    pub fn from_examples(examples: &[TrainingExample]) -> Self {
        let mut responses = BTreeMap::new();
        for ex in examples {
            responses.entry(ex.label).or_insert_with(|| ex.answer.clone());
        }
        Self { responses }
    }

    /// Generic replies used when a model and vocabulary exist
    /// but the response artifact does not.
    pub fn fallback_defaults() -> Self {
        let replies = [
            "I'm sorry, I don't have enough information to answer that question.",
            "That's a good question about health. Let me provide some general information.",
            "I recommend consulting with a healthcare professional for personalized advice.",
            "I'm here to provide general health information, but I can't diagnose conditions.",
            "For emergency situations, please contact emergency services immediately.",
        ];
        Self {
            responses: replies
                .iter()
                .enumerate()
                .map(|(label, r)| (label, r.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, label: usize) -> Option<&str> {
        self.responses.get(&label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.responses.iter().map(|(l, r)| (*l, r.as_str()))
    }
}

/// Confidence-gated lookup of the answer for a prediction.
#[derive(Debug, Clone, Copy)]
pub struct ResponseSelector {
    threshold: f32,
}

impl ResponseSelector {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn select(&self, responses: &LabelResponseMap, prediction: Prediction) -> String {
        // Strict comparison: a confidence equal to the threshold is answered
        if prediction.confidence < self.threshold {
            tracing::debug!(
                "Confidence {:.4} below threshold {:.2}, asking to rephrase",
                prediction.confidence,
                self.threshold
            );
            return CLARIFICATION_PROMPT.to_string();
        }

        match responses.get(prediction.label) {
            Some(answer) => answer.to_string(),
            None => {
                tracing::warn!(
                    "Label {} has no stored response; model and responses are out of sync",
                    prediction.label
                );
                NO_ANSWER_YET.to_string()
            }
        }
    }
}

impl Default for ResponseSelector {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}
