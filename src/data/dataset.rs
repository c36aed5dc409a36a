use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::vocabulary::Vocabulary;
use crate::domain::training_example::TrainingExample;

/// One encoded training sample: a left-padded id sequence of
/// length max_sequence_length and its label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentSample {
    pub token_ids: Vec<u32>,
    pub label:     usize,
}

impl IntentSample {
    pub fn encode(example: &TrainingExample, vocab: &Vocabulary, max_length: usize) -> Self {
        Self {
            token_ids: vocab.encode(&example.question, max_length),
            label:     example.label,
        }
    }

    /// Number of non-padding ids
    pub fn known_tokens(&self) -> usize {
        self.token_ids.iter().filter(|&&id| id != 0).count()
    }
}

pub struct IntentDataset {
    samples: Vec<IntentSample>,
}

impl IntentDataset {
    pub fn new(samples: Vec<IntentSample>) -> Self { Self { samples } }
}

impl Dataset<IntentSample> for IntentDataset {
    fn get(&self, index: usize) -> Option<IntentSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_sample() {
        let vocab  = Vocabulary::fitted(&["runny nose", "sore throat"], 10);
        let ex     = TrainingExample::new("runny nose", "Rest.", 2);
        let sample = IntentSample::encode(&ex, &vocab, 4);
        assert_eq!(sample.token_ids.len(), 4);
        assert_eq!(sample.known_tokens(), 2);
        assert_eq!(sample.label, 2);

        let ds = IntentDataset::new(vec![sample]);
        assert_eq!(ds.len(), 1);
        assert!(ds.get(1).is_none());
    }
}
