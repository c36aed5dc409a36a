use burn::{
    nn::{
        conv::{Conv1d, Conv1dConfig},
        loss::CrossEntropyLossConfig,
        pool::{MaxPool1d, MaxPool1dConfig},
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation,
};

use crate::error::EngineError;

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally, do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct ClassifierConfig {
    /// Embedding rows: vocabulary size + 1 for the padding id
    pub vocab_rows:      usize,
    pub num_classes:     usize,
    pub max_seq_len:     usize,
    #[config(default = 128)]
    pub embedding_dim:   usize,
    #[config(default = 128)]
    pub filters:         usize,
    #[config(default = 5)]
    pub kernel_size:     usize,
    /// Max-pool window; the stride equals the window
    #[config(default = 5)]
    pub pool_size:       usize,
    #[config(default = 128)]
    pub dense_units:     usize,
    #[config(default = 0.5)]
    pub dropout:         f64,
}

impl ClassifierConfig {
    /// Shortest input that survives conv → pool → conv → pool
    /// with at least one position left.
    pub fn min_sequence_length(&self) -> usize {
        let k = self.kernel_size.max(1);
        let p = self.pool_size.max(1);
        (p + k - 1) * p + k - 1
    }

    /// Positions left after the two conv/pool stages, if any.
    pub fn pooled_length(&self, seq_len: usize) -> Option<usize> {
        let stage = |len: usize| -> Option<usize> {
            let conv = len.checked_sub(self.kernel_size.checked_sub(1)?)?;
            if self.pool_size == 0 || conv < self.pool_size {
                return None;
            }
            Some((conv - self.pool_size) / self.pool_size + 1)
        };
        stage(stage(seq_len)?)
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        let fail = |msg: String| Err(EngineError::InvalidConfig(msg));

        if self.num_classes == 0 {
            return fail("classifier needs at least one class".into());
        }
        if self.vocab_rows < 2 {
            return fail(format!("vocabulary is empty ({} embedding rows)", self.vocab_rows));
        }
        if self.kernel_size == 0 || self.pool_size == 0 {
            return fail("kernel_size and pool_size must be positive".into());
        }
        if !(0.0..1.0).contains(&self.dropout) {
            return fail(format!("dropout must be in [0, 1), got {}", self.dropout));
        }
        if self.pooled_length(self.max_seq_len).is_none() {
            return fail(format!(
                "max_seq_len {} is too short for kernel {} / pool {}; need at least {}",
                self.max_seq_len,
                self.kernel_size,
                self.pool_size,
                self.min_sequence_length()
            ));
        }
        Ok(())
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> CnnClassifier<B> {
        let embedding = EmbeddingConfig::new(self.vocab_rows, self.embedding_dim).init(device);
        let conv1 = Conv1dConfig::new(self.embedding_dim, self.filters, self.kernel_size).init(device);
        let conv2 = Conv1dConfig::new(self.filters, self.filters, self.kernel_size).init(device);
        // Burn's pool stride defaults to 1
        let pool = MaxPool1dConfig::new(self.pool_size)
            .with_stride(self.pool_size)
            .init();
        let dense   = LinearConfig::new(self.filters, self.dense_units).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();
        let output  = LinearConfig::new(self.dense_units, self.num_classes).init(device);
        CnnClassifier { embedding, conv1, conv2, pool, dense, dropout, output }
    }
}

#[derive(Module, Debug)]
pub struct CnnClassifier<B: Backend> {
    pub embedding: Embedding<B>,
    pub conv1:     Conv1d<B>,
    pub conv2:     Conv1d<B>,
    pub pool:      MaxPool1d,
    pub dense:     Linear<B>,
    pub dropout:   Dropout,
    pub output:    Linear<B>,
}

impl<B: Backend> CnnClassifier<B> {
    /// token_ids: [batch, seq_len] → logits: [batch, num_classes]
    pub fn forward(&self, token_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let x = self.embedding.forward(token_ids); // [batch, seq_len, emb]

        // Conv1d wants channels before positions
        let x = x.swap_dims(1, 2); // [batch, emb, seq_len]

        let x = self.pool.forward(activation::relu(self.conv1.forward(x)));
        let x = self.pool.forward(activation::relu(self.conv2.forward(x)));

        // Global average over the remaining positions
        let [batch, channels, _] = x.dims();
        let x = x.mean_dim(2).reshape([batch, channels]);

        let x = self.dropout.forward(activation::relu(self.dense.forward(x)));
        self.output.forward(x)
    }

    /// Softmax over the label axis: [batch, num_classes], rows sum to 1
    pub fn predict_proba(&self, token_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        activation::softmax(self.forward(token_ids), 1)
    }

    pub fn forward_loss(
        &self,
        token_ids: Tensor<B, 2, Int>,
        labels:    Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let logits = self.forward(token_ids);
        let ce = CrossEntropyLossConfig::new().init(&logits.device());
        let loss = ce.forward(logits.clone(), labels);
        (loss, logits)
    }
}
