// ============================================================
// Layer 4: Intent Batcher
// ============================================================
// Implements Burn's Batcher trait to stack IntentSamples into
// tensors for one forward pass.
//
//   Input:  N samples, each with S token ids and one label
//   Output: token_ids [N, S] (Int), labels [N] (Int)
//
// Every sample is already padded to the same S by the
// vocabulary, so stacking is a flatten + reshape.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::IntentSample;

/// A batch of encoded questions ready for the classifier.
#[derive(Debug, Clone)]
pub struct IntentBatch<B: Backend> {
    /// Token ids, shape [batch_size, seq_len]
    pub token_ids: Tensor<B, 2, Int>,

    /// Target labels, shape [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

#[derive(Clone, Debug)]
pub struct IntentBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> IntentBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

/// Stack equal-length id sequences into a [rows, seq_len] tensor.
pub fn ids_to_tensor<B: Backend>(
    rows:    &[&[u32]],
    seq_len: usize,
    device:  &B::Device,
) -> Tensor<B, 2, Int> {
    let flat: Vec<i64> = rows
        .iter()
        .flat_map(|r| r.iter().map(|&id| id as i64))
        .collect();
    Tensor::<B, 2, Int>::from_data(TensorData::new(flat, [rows.len(), seq_len]), device)
}

impl<B: Backend> Batcher<IntentSample, IntentBatch<B>> for IntentBatcher<B> {
    fn batch(&self, items: Vec<IntentSample>) -> IntentBatch<B> {
        let seq_len = items.first().map(|s| s.token_ids.len()).unwrap_or(0);

        let rows: Vec<&[u32]> = items.iter().map(|s| s.token_ids.as_slice()).collect();
        let token_ids = ids_to_tensor::<B>(&rows, seq_len, &self.device);

        let labels: Vec<i64> = items.iter().map(|s| s.label as i64).collect();
        let labels = Tensor::<B, 1, Int>::from_data(
            TensorData::new(labels, [items.len()]),
            &self.device,
        );

        IntentBatch { token_ids, labels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_batch_shapes() {
        let batcher = IntentBatcher::<NdArray>::new(Default::default());
        let batch = batcher.batch(vec![
            IntentSample { token_ids: vec![0, 0, 3, 4], label: 1 },
            IntentSample { token_ids: vec![0, 5, 6, 7], label: 0 },
            IntentSample { token_ids: vec![1, 2, 3, 4], label: 2 },
        ]);
        assert_eq!(batch.token_ids.dims(), [3, 4]);
        assert_eq!(batch.labels.dims(), [3]);

        let labels: Vec<i64> = batch.labels.into_data().to_vec::<i64>().unwrap();
        assert_eq!(labels, vec![1, 0, 2]);
    }
}
