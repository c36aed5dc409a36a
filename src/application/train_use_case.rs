// ============================================================
// Layer 2: TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load labelled examples      (Layer 4 - data)
//   Step 2: Check labels are dense      (Layer 3 - domain)
//   Step 3: Fit the vocabulary          (Layer 4 - data)
//   Step 4: Encode every question       (Layer 4 - data)
//   Step 5: Build the response map      (Layer 3 - domain)
//   Step 6: Save config + small artifacts (Layer 6 - infra)
//   Step 7: Run training loop           (Layer 5 - ml)
//   Step 8: Save the model weights      (Layer 6 - infra)
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::IntentSample,
    loader::CsvCorpusLoader,
    sample_corpus::SampleCorpus,
    vocabulary::Vocabulary,
};
use crate::domain::responses::LabelResponseMap;
use crate::domain::training_example::{dense_label_count, CategoryMapping, TrainingExample};
use crate::domain::traits::CorpusSource;
use crate::infra::{
    artifact_store::ArtifactStore,
    metrics::{MetricsLogger, TrainingHistory},
};
use crate::ml::{model::ClassifierConfig, trainer};

// ─── Training Configuration ──────────────────────────────────────
// All hyperparameters for a training run.
// Saved next to the model as train_config.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// question,answer,category CSV; the built-in corpus when None
    pub data_path:            Option<PathBuf>,
    pub model_dir:            PathBuf,
    pub max_vocabulary_size:  usize,
    pub max_seq_len:          usize,
    pub embedding_dim:        usize,
    pub filters:              usize,
    pub kernel_size:          usize,
    pub pool_size:            usize,
    pub dense_units:          usize,
    pub dropout:              f64,
    pub epochs:               usize,
    pub batch_size:           usize,
    pub learning_rate:        f64,
    pub validation_split:     f64,
    /// Shuffle before holding out the validation tail
    pub shuffle_before_split: bool,
    pub seed:                 u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:            None,
            model_dir:            PathBuf::from("models"),
            max_vocabulary_size:  10_000,
            max_seq_len:          100,
            embedding_dim:        128,
            filters:              128,
            kernel_size:          5,
            pool_size:            5,
            dense_units:          128,
            dropout:              0.5,
            epochs:               50,
            batch_size:           4,
            learning_rate:        1e-3,
            validation_split:     0.2,
            shuffle_before_split: false,
            seed:                 42,
        }
    }
}

impl TrainConfig {
    /// The architecture subset, sized for a fitted vocabulary
    /// and label set.
    pub fn classifier_config(&self, vocab_rows: usize, num_classes: usize) -> ClassifierConfig {
        ClassifierConfig::new(vocab_rows, num_classes, self.max_seq_len)
            .with_embedding_dim(self.embedding_dim)
            .with_filters(self.filters)
            .with_kernel_size(self.kernel_size)
            .with_pool_size(self.pool_size)
            .with_dense_units(self.dense_units)
            .with_dropout(self.dropout)
    }
}

/// What a finished run produced.
#[derive(Debug)]
pub struct TrainReport {
    pub examples:    usize,
    pub vocabulary:  usize,
    pub num_classes: usize,
    pub history:     TrainingHistory,
    pub model_dir:   PathBuf,
}

// ─── TrainUseCase ─────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<TrainReport> {
        let cfg = &self.config;

        // ── Step 1: Load examples ─────────────────────────────────────────────
        let (examples, categories) = self.load_examples()?;

        // ── Step 2: Labels must be 0..num_classes ─────────────────────────────
        let Some(num_classes) = dense_label_count(&examples) else {
            bail!("training labels are not dense: every id in 0..max must occur");
        };

        // ── Step 3: Fit vocabulary on the (already normalised) questions ─────
        let questions: Vec<&str> = examples.iter().map(|e| e.question.as_str()).collect();
        let vocab = Vocabulary::fitted(&questions, cfg.max_vocabulary_size);
        tracing::info!(
            "Vocabulary: {} words from {} questions",
            vocab.len(),
            vocab.document_count()
        );

        let model_cfg = cfg.classifier_config(vocab.embedding_rows(), num_classes);
        model_cfg.validate().context("Invalid classifier configuration")?;

        // ── Step 4: Encode ────────────────────────────────────────────────────
        let samples: Vec<IntentSample> = examples
            .iter()
            .map(|ex| IntentSample::encode(ex, &vocab, cfg.max_seq_len))
            .collect();
        let empty = samples.iter().filter(|s| s.known_tokens() == 0).count();
        if empty > 0 {
            tracing::warn!("{} questions encode to padding only", empty);
        }

        // ── Step 5: One answer per label ──────────────────────────────────────
        let responses = LabelResponseMap::from_examples(&examples);

        // ── Step 6: Save everything that doesn't need the trained weights ────
        let store = ArtifactStore::create(&cfg.model_dir)
            .with_context(|| format!("Cannot create model directory '{}'", cfg.model_dir.display()))?;
        store.save_config(cfg).context("Failed to save training config")?;
        store.save_architecture(&model_cfg).context("Failed to save classifier architecture")?;
        store.save_vocabulary(&vocab).context("Failed to save vocabulary")?;
        store.save_responses(&responses).context("Failed to save responses")?;
        store.save_categories(&categories).context("Failed to save categories")?;

        // ── Step 7: Train ─────────────────────────────────────────────────────
        let metrics = MetricsLogger::new(store.metrics_path())?;
        let outcome = trainer::fit(cfg, &model_cfg, samples, Some(&metrics))
            .context("Training failed")?;

        // ── Step 8: Save weights ──────────────────────────────────────────────
        store.save_model(&outcome.model).context("Failed to save model weights")?;
        tracing::info!("All artifacts written to '{}'", store.dir().display());

        Ok(TrainReport {
            examples: examples.len(),
            vocabulary: vocab.len(),
            num_classes,
            history: outcome.history,
            model_dir: cfg.model_dir.clone(),
        })
    }

    fn load_examples(&self) -> Result<(Vec<TrainingExample>, CategoryMapping)> {
        match &self.config.data_path {
            Some(path) => {
                tracing::info!("Loading training data from '{}'", path.display());
                CsvCorpusLoader::new(path)
                    .load_with_categories()
                    .with_context(|| format!("Cannot load training data from '{}'", path.display()))
            }
            None => {
                tracing::info!("No training data given, using the built-in sample corpus");
                Ok((SampleCorpus.load_all()?, SampleCorpus::categories()))
            }
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = TrainConfig::default();
        assert_eq!(cfg.max_seq_len, 100);
        assert_eq!(cfg.batch_size, 4);
        assert_eq!(cfg.seed, 42);
        assert!(cfg.classifier_config(50, 6).validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg: TrainConfig = serde_json::from_str(r#"{"epochs": 3}"#).unwrap();
        assert_eq!(cfg.epochs, 3);
        assert_eq!(cfg.learning_rate, 1e-3);
        assert!(cfg.data_path.is_none());
    }

    #[test]
    fn test_short_sequence_is_rejected_before_training() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig {
            model_dir: dir.path().to_path_buf(),
            max_seq_len: 10,
            ..TrainConfig::default()
        };
        assert!(TrainUseCase::new(cfg).execute().is_err());
        assert!(!ArtifactStore::new(dir.path()).has_model());
    }
}
