// ============================================================
// Layer 6: Artifact Store
// ============================================================
// Knows where every artifact of a trained model lives and
// saves/restores the model weights with Burn's CompactRecorder.
//
// File naming convention:
//   <model_dir>/
//     classifier.mpk      ← network weights (MessagePack, half precision)
//     classifier.json     ← architecture, needed to rebuild the
//                           network before loading weights
//     train_config.json   ← hyperparameters of the run
//     tokenizer.json      ← vocabulary
//     responses.json      ← label → answer
//     categories.csv      ← category name → label
//     metrics.csv         ← per-epoch training metrics
//
// Loading is per artifact. A missing file is reported as
// ArtifactMissing; a file that exists but cannot be parsed
// (or whose weights don't fit the saved architecture) as
// ArtifactCorrupt. The chat engine decides what each means.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use std::{
    fs,
    path::{Path, PathBuf},
};

use burn::{
    prelude::*,
    record::{CompactRecorder, FileRecorder, Recorder},
};

use crate::application::train_use_case::TrainConfig;
use crate::data::vocabulary::Vocabulary;
use crate::domain::responses::LabelResponseMap;
use crate::domain::training_example::CategoryMapping;
use crate::domain::traits::Persistable;
use crate::error::{EngineError, Result};
use crate::infra::persistence::write_json;
use crate::ml::model::{ClassifierConfig, CnnClassifier};
use crate::ml::InferBackend;

pub const MODEL_STEM:      &str = "classifier";
pub const ARCH_FILE:       &str = "classifier.json";
pub const CONFIG_FILE:     &str = "train_config.json";
pub const VOCABULARY_FILE: &str = "tokenizer.json";
pub const RESPONSES_FILE:  &str = "responses.json";
pub const CATEGORIES_FILE: &str = "categories.csv";
pub const METRICS_FILE:    &str = "metrics.csv";

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Point at `dir` without touching the filesystem.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Point at `dir`, creating it (like `mkdir -p`) for writing.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(dir);
        fs::create_dir_all(&store.dir)?;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the recorder puts the weights: the stem plus its own extension.
    pub fn model_path(&self) -> PathBuf {
        let ext = <CompactRecorder as FileRecorder<InferBackend>>::file_extension();
        self.dir.join(MODEL_STEM).with_extension(ext)
    }

    pub fn architecture_path(&self) -> PathBuf {
        self.dir.join(ARCH_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn vocabulary_path(&self) -> PathBuf {
        self.dir.join(VOCABULARY_FILE)
    }

    pub fn responses_path(&self) -> PathBuf {
        self.dir.join(RESPONSES_FILE)
    }

    pub fn categories_path(&self) -> PathBuf {
        self.dir.join(CATEGORIES_FILE)
    }

    pub fn metrics_path(&self) -> PathBuf {
        self.dir.join(METRICS_FILE)
    }

    pub fn has_model(&self) -> bool {
        self.model_path().is_file()
    }

    // ─── Model weights ────────────────────────────────────────────────────────

    pub fn save_model<B: Backend>(&self, model: &CnnClassifier<B>) -> Result<()> {
        // Recorder adds the extension itself
        let stem = self.dir.join(MODEL_STEM);
        CompactRecorder::new()
            .record(model.clone().into_record(), stem)
            .map_err(|e| EngineError::corrupt(self.model_path(), format!("{e:?}")))?;
        tracing::debug!("Saved model weights to '{}'", self.model_path().display());
        Ok(())
    }

    /// Restore saved weights into `model`, which must have been
    /// built from the saved config.
    pub fn load_model<B: Backend>(
        &self,
        model:  CnnClassifier<B>,
        device: &B::Device,
    ) -> Result<CnnClassifier<B>> {
        let path = self.model_path();
        if !path.is_file() {
            return Err(EngineError::ArtifactMissing { path });
        }
        let record = CompactRecorder::new()
            .load(self.dir.join(MODEL_STEM), device)
            .map_err(|e| EngineError::corrupt(&path, format!("{e:?}")))?;
        Ok(model.load_record(record))
    }

    // ─── Config ───────────────────────────────────────────────────────────────

    pub fn save_architecture(&self, cfg: &ClassifierConfig) -> Result<()> {
        cfg.save(self.architecture_path())?;
        Ok(())
    }

    pub fn load_architecture(&self) -> Result<ClassifierConfig> {
        let path = self.architecture_path();
        if !path.is_file() {
            return Err(EngineError::ArtifactMissing { path });
        }
        ClassifierConfig::load(&path).map_err(|e| EngineError::corrupt(&path, format!("{e:?}")))
    }

    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        write_json(&self.config_path(), cfg)
    }

    // ─── Vocabulary / responses / categories ──────────────────────────────────

    pub fn save_vocabulary(&self, vocab: &Vocabulary) -> Result<()> {
        vocab.save(&self.vocabulary_path())
    }

    pub fn load_vocabulary(&self) -> Result<Vocabulary> {
        Vocabulary::load(&self.vocabulary_path())
    }

    pub fn save_responses(&self, responses: &LabelResponseMap) -> Result<()> {
        responses.save(&self.responses_path())
    }

    pub fn load_responses(&self) -> Result<LabelResponseMap> {
        LabelResponseMap::load(&self.responses_path())
    }

    pub fn save_categories(&self, categories: &CategoryMapping) -> Result<()> {
        categories.save(&self.categories_path())
    }

    pub fn load_categories(&self) -> Result<CategoryMapping> {
        CategoryMapping::load(&self.categories_path())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::persistence::read_json;
    use burn::backend::NdArray;

    fn tiny() -> ClassifierConfig {
        ClassifierConfig::new(10, 2, 10)
            .with_embedding_dim(4)
            .with_filters(4)
            .with_kernel_size(3)
            .with_pool_size(2)
            .with_dense_units(4)
    }

    #[test]
    fn test_paths() {
        let store = ArtifactStore::new("models");
        assert_eq!(store.model_path(), Path::new("models/classifier.mpk"));
        assert_eq!(store.vocabulary_path(), Path::new("models/tokenizer.json"));
        assert!(!store.has_model());
    }

    #[test]
    fn test_model_weights_round_trip() {
        let dir    = tempfile::tempdir().unwrap();
        let store  = ArtifactStore::create(dir.path()).unwrap();
        let device = Default::default();

        let model: CnnClassifier<NdArray> = tiny().init(&device);
        store.save_model(&model).unwrap();
        assert!(store.has_model());

        // The recorder wrote exactly the file model_path() names
        let written: Vec<PathBuf> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(written, vec![store.model_path()]);

        let fresh: CnnClassifier<NdArray> = tiny().init(&device);
        let loaded = store.load_model(fresh, &device).unwrap();

        let ids = Tensor::<NdArray, 2, Int>::from_data(
            TensorData::new(vec![0i64, 0, 0, 0, 1, 2, 3, 4, 5, 6], [1, 10]),
            &device,
        );
        let a: Vec<f32> = model.predict_proba(ids.clone()).into_data().to_vec().unwrap();
        let b: Vec<f32> = loaded.predict_proba(ids).into_data().to_vec().unwrap();
        // CompactRecorder stores half precision
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-2);
        }
    }

    #[test]
    fn test_missing_and_corrupt_model() {
        let dir    = tempfile::tempdir().unwrap();
        let store  = ArtifactStore::create(dir.path()).unwrap();
        let device = Default::default();

        let model: CnnClassifier<NdArray> = tiny().init(&device);
        assert!(matches!(
            store.load_model(model, &device),
            Err(EngineError::ArtifactMissing { .. })
        ));

        fs::write(store.model_path(), b"not a model").unwrap();
        let model: CnnClassifier<NdArray> = tiny().init(&device);
        assert!(matches!(
            store.load_model(model, &device),
            Err(EngineError::ArtifactCorrupt { .. })
        ));
    }

    #[test]
    fn test_config_round_trip() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::create(dir.path()).unwrap();
        let cfg   = TrainConfig { epochs: 7, ..TrainConfig::default() };
        store.save_config(&cfg).unwrap();
        let back: TrainConfig = read_json(&store.config_path()).unwrap();
        assert_eq!(back.epochs, 7);

        store.save_architecture(&tiny()).unwrap();
        let arch = store.load_architecture().unwrap();
        assert_eq!(arch.kernel_size, 3);
        assert_eq!(arch.max_seq_len, 10);
    }
}
