// ============================================================
// Layer 5: Inferencer
// ============================================================
// The IntentClassifier the chat engine uses once a model has
// been trained. Rebuilds the network from classifier.json,
// loads the weights, then answers predict() calls.
//
// The network sits behind a mutex: forward passes are
// serialised, everything else the engine holds is read-only.
// A panic inside the numerical backend is caught and turned
// into InferenceFailure so one bad request cannot take the
// service down.
use std::panic::{self, AssertUnwindSafe};

use parking_lot::Mutex;

use crate::data::batcher::ids_to_tensor;
use crate::domain::traits::{IntentClassifier, Prediction};
use crate::error::{EngineError, Result};
use crate::infra::artifact_store::ArtifactStore;
use crate::ml::model::{ClassifierConfig, CnnClassifier};
use crate::ml::InferBackend;

pub struct BurnClassifier {
    model:       Mutex<CnnClassifier<InferBackend>>,
    max_seq_len: usize,
    num_classes: usize,
    vocab_rows:  usize,
    device:      burn::backend::ndarray::NdArrayDevice,
}

impl BurnClassifier {
    pub fn new(model: CnnClassifier<InferBackend>, config: &ClassifierConfig) -> Self {
        Self {
            model:       Mutex::new(model),
            max_seq_len: config.max_seq_len,
            num_classes: config.num_classes,
            vocab_rows:  config.vocab_rows,
            device:      Default::default(),
        }
    }

    /// Rebuild the saved architecture and load its weights.
    pub fn from_artifacts(store: &ArtifactStore) -> Result<Self> {
        if !store.has_model() {
            return Err(EngineError::ArtifactMissing { path: store.model_path() });
        }
        let model_cfg = store.load_architecture()?;
        model_cfg
            .validate()
            .map_err(|e| EngineError::corrupt(store.architecture_path(), e))?;

        let device = Default::default();
        let model: CnnClassifier<InferBackend> = model_cfg.init(&device);
        let model = store.load_model(model, &device)?;
        check_loaded_shapes(&model, &model_cfg, &device)
            .map_err(|reason| EngineError::corrupt(store.model_path(), reason))?;
        tracing::info!(
            "Model loaded from '{}' ({} classes, seq_len={})",
            store.model_path().display(),
            model_cfg.num_classes,
            model_cfg.max_seq_len
        );
        Ok(Self::new(model, &model_cfg))
    }

    pub fn max_seq_len(&self) -> usize {
        self.max_seq_len
    }

    pub fn vocab_rows(&self) -> usize {
        self.vocab_rows
    }

    fn probabilities(&self, token_ids: &[u32]) -> Result<Vec<f32>> {
        let model = self.model.lock();
        let input = ids_to_tensor::<InferBackend>(&[token_ids], self.max_seq_len, &self.device);
        model
            .predict_proba(input)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| EngineError::InferenceFailure(format!("{e:?}")))
    }
}

/// Loading a record never checks tensor shapes, so weights from a
/// different architecture load silently. Compare the embedding table
/// and one all-padding forward pass against the saved config.
fn check_loaded_shapes(
    model:  &CnnClassifier<InferBackend>,
    cfg:    &ClassifierConfig,
    device: &burn::backend::ndarray::NdArrayDevice,
) -> std::result::Result<(), String> {
    let expected = [cfg.vocab_rows, cfg.embedding_dim];
    let rows = model.embedding.weight.val().dims();
    if rows != expected {
        return Err(format!("embedding is {rows:?}, architecture says {expected:?}"));
    }

    let padding = vec![0u32; cfg.max_seq_len];
    let input = ids_to_tensor::<InferBackend>(&[&padding], cfg.max_seq_len, device);
    let dims = panic::catch_unwind(AssertUnwindSafe(|| model.predict_proba(input).dims()))
        .map_err(|_| "weights do not fit the saved architecture".to_string())?;
    if dims != [1, cfg.num_classes] {
        return Err(format!(
            "model outputs {dims:?}, architecture says [1, {}]",
            cfg.num_classes
        ));
    }
    Ok(())
}

impl IntentClassifier for BurnClassifier {
    fn predict(&self, token_ids: &[u32]) -> Result<Prediction> {
        if token_ids.len() != self.max_seq_len {
            return Err(EngineError::InferenceFailure(format!(
                "expected {} token ids, got {}",
                self.max_seq_len,
                token_ids.len()
            )));
        }

        let probs = panic::catch_unwind(AssertUnwindSafe(|| self.probabilities(token_ids)))
            .map_err(|_| EngineError::InferenceFailure("backend panicked during forward pass".into()))??;

        let prediction = Prediction::from_probabilities(&probs)
            .ok_or_else(|| EngineError::InferenceFailure("model produced no usable probabilities".into()))?;

        tracing::debug!("Predicted label {} (confidence {:.4})", prediction.label, prediction.confidence);
        Ok(prediction)
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> BurnClassifier {
        let cfg = ClassifierConfig::new(10, 3, 10)
            .with_embedding_dim(4)
            .with_filters(4)
            .with_kernel_size(3)
            .with_pool_size(2)
            .with_dense_units(4);
        let model = cfg.init::<InferBackend>(&Default::default());
        BurnClassifier::new(model, &cfg)
    }

    #[test]
    fn test_prediction_is_a_probability() {
        let clf  = classifier();
        let pred = clf.predict(&[0, 0, 0, 0, 0, 1, 2, 3, 4, 5]).unwrap();
        assert!(pred.label < 3);
        // Max of three probabilities is at least a third
        assert!(pred.confidence >= 1.0 / 3.0 - 1e-4 && pred.confidence <= 1.0);
    }

    #[test]
    fn test_all_padding_still_predicts() {
        assert!(classifier().predict(&[0; 10]).is_ok());
    }

    #[test]
    fn test_wrong_length_is_inference_failure() {
        assert!(matches!(
            classifier().predict(&[1, 2, 3]),
            Err(EngineError::InferenceFailure(_))
        ));
    }

    #[test]
    fn test_backend_panic_is_inference_failure() {
        let clf = classifier();
        // Id 500 is past the 10-row embedding table; the backend panics on it
        assert!(matches!(
            clf.predict(&[0, 0, 0, 0, 0, 0, 0, 0, 1, 500]),
            Err(EngineError::InferenceFailure(_))
        ));
        // The lock is still usable afterwards
        assert!(clf.predict(&[0, 0, 0, 0, 0, 0, 0, 0, 1, 2]).is_ok());
    }

    #[test]
    fn test_weights_for_other_class_count_are_corrupt() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::create(dir.path()).unwrap();
        let cfg   = |classes| {
            ClassifierConfig::new(10, classes, 10)
                .with_embedding_dim(4)
                .with_filters(4)
                .with_kernel_size(3)
                .with_pool_size(2)
                .with_dense_units(4)
        };

        store.save_model(&cfg(9).init::<InferBackend>(&Default::default())).unwrap();
        store.save_architecture(&cfg(3)).unwrap();
        assert!(matches!(
            BurnClassifier::from_artifacts(&store),
            Err(EngineError::ArtifactCorrupt { .. })
        ));

        store.save_architecture(&cfg(9)).unwrap();
        assert_eq!(BurnClassifier::from_artifacts(&store).unwrap().num_classes(), 9);
    }

    #[test]
    fn test_missing_model_is_reported() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        assert!(matches!(
            BurnClassifier::from_artifacts(&store),
            Err(EngineError::ArtifactMissing { .. })
        ));
    }
}
