// ============================================================
// Layer 2: Chat Engine
// ============================================================
// The inference entrypoint. Turns a user message into a reply:
//
//   text → normalise + encode (Vocabulary)
//        → classify          (IntentClassifier)
//        → confidence gate   (ResponseSelector)
//        → reply
//
// and, whenever the model path cannot answer,
//
//   text → keyword rules     (fallback) → reply
//
// Artifacts are loaded lazily on the first request, exactly
// once, under a write lock with a double check. The engine
// then sits in one of two terminal states for its lifetime:
//
//   Uninitialized ──first request──┬──▶ Ready        (model path)
//                                  └──▶ Unavailable  (keywords only)
//
// Which artifacts put the engine where:
//
//   model missing/corrupt                 → Unavailable
//   vocabulary missing/corrupt            → Unavailable
//   vocabulary and model disagree on size → Unavailable
//   responses missing/corrupt             → Ready, generic replies
//
// get_response never returns an error and never panics on
// user input. A failed forward pass falls back for that one
// request only.

use std::{path::PathBuf, sync::Arc};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::data::vocabulary::Vocabulary;
use crate::domain::fallback::fallback_response;
use crate::domain::responses::{LabelResponseMap, ResponseSelector, DEFAULT_CONFIDENCE_THRESHOLD};
use crate::domain::traits::{IntentClassifier, QuestionAnswerer};
use crate::error::{EngineError, Result};
use crate::infra::artifact_store::ArtifactStore;
use crate::ml::inferencer::BurnClassifier;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub model_dir:            PathBuf,
    /// Predictions below this confidence ask the user to rephrase
    pub confidence_threshold: f32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            model_dir:            PathBuf::from("models"),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Uninitialized,
    Ready,
    Unavailable,
}

/// Everything the model path needs, shared read-only between requests.
pub struct LoadedModel {
    classifier:  Box<dyn IntentClassifier>,
    vocabulary:  Vocabulary,
    responses:   LabelResponseMap,
    max_seq_len: usize,
}

impl LoadedModel {
    pub fn new(
        classifier:  Box<dyn IntentClassifier>,
        vocabulary:  Vocabulary,
        responses:   LabelResponseMap,
        max_seq_len: usize,
    ) -> Self {
        Self { classifier, vocabulary, responses, max_seq_len }
    }

    /// Read the model, vocabulary and responses from `store`.
    pub fn from_store(store: &ArtifactStore) -> Result<Self> {
        let classifier = BurnClassifier::from_artifacts(store)?;
        let vocabulary = store.load_vocabulary()?;

        if vocabulary.embedding_rows() != classifier.vocab_rows() {
            return Err(EngineError::corrupt(
                store.vocabulary_path(),
                format!(
                    "vocabulary has {} rows, model was trained with {}",
                    vocabulary.embedding_rows(),
                    classifier.vocab_rows()
                ),
            ));
        }

        let responses = match store.load_responses() {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("{e}; using generic replies");
                LabelResponseMap::fallback_defaults()
            }
        };

        let max_seq_len = classifier.max_seq_len();
        Ok(Self::new(Box::new(classifier), vocabulary, responses, max_seq_len))
    }
}

enum EngineState {
    Uninitialized,
    Ready(Arc<LoadedModel>),
    Unavailable,
}

pub struct ChatEngine {
    store:    Option<ArtifactStore>,
    selector: ResponseSelector,
    state:    RwLock<EngineState>,
}

impl ChatEngine {
    /// An engine that loads its artifacts from disk on first use.
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            store:    Some(ArtifactStore::new(settings.model_dir)),
            selector: ResponseSelector::new(settings.confidence_threshold),
            state:    RwLock::new(EngineState::Uninitialized),
        }
    }

    /// An engine that is already Ready with the given parts.
    pub fn from_parts(model: LoadedModel, confidence_threshold: f32) -> Self {
        Self {
            store:    None,
            selector: ResponseSelector::new(confidence_threshold),
            state:    RwLock::new(EngineState::Ready(Arc::new(model))),
        }
    }

    /// An engine that only ever answers from the keyword rules.
    pub fn unavailable() -> Self {
        Self {
            store:    None,
            selector: ResponseSelector::default(),
            state:    RwLock::new(EngineState::Unavailable),
        }
    }

    pub fn status(&self) -> EngineStatus {
        match *self.state.read() {
            EngineState::Uninitialized => EngineStatus::Uninitialized,
            EngineState::Ready(_)      => EngineStatus::Ready,
            EngineState::Unavailable   => EngineStatus::Unavailable,
        }
    }

    /// Load artifacts now instead of on the first request.
    pub fn warm_up(&self) -> EngineStatus {
        self.model();
        self.status()
    }

    pub fn get_response(&self, user_text: &str) -> String {
        let Some(model) = self.model() else {
            return fallback_response(user_text);
        };

        let token_ids = model.vocabulary.encode(user_text, model.max_seq_len);
        match model.classifier.predict(&token_ids) {
            Ok(prediction) => self.selector.select(&model.responses, prediction),
            Err(e) => {
                tracing::warn!("{e}; answering from keyword rules");
                fallback_response(user_text)
            }
        }
    }

    fn model(&self) -> Option<Arc<LoadedModel>> {
        match &*self.state.read() {
            EngineState::Ready(m)      => return Some(Arc::clone(m)),
            EngineState::Unavailable   => return None,
            EngineState::Uninitialized => {}
        }

        let mut state = self.state.write();
        // Another request may have finished loading while we waited
        if matches!(*state, EngineState::Uninitialized) {
            *state = match self.load() {
                Ok(m) => {
                    tracing::info!("Chat engine ready ({} classes)", m.classifier.num_classes());
                    EngineState::Ready(Arc::new(m))
                }
                Err(e @ EngineError::ArtifactMissing { .. }) | Err(e @ EngineError::NoModelAvailable) => {
                    tracing::info!("{e}; using keyword fallback");
                    EngineState::Unavailable
                }
                Err(e) if e.is_recoverable() => {
                    tracing::warn!("{e}; using keyword fallback");
                    EngineState::Unavailable
                }
                Err(e) => {
                    tracing::error!("Unexpected error loading the model: {e}; using keyword fallback");
                    EngineState::Unavailable
                }
            };
        }

        match &*state {
            EngineState::Ready(m) => Some(Arc::clone(m)),
            _ => None,
        }
    }

    fn load(&self) -> Result<LoadedModel> {
        let store = self.store.as_ref().ok_or(EngineError::NoModelAvailable)?;
        LoadedModel::from_store(store)
    }
}

impl QuestionAnswerer for ChatEngine {
    fn answer(&self, question: &str) -> String {
        self.get_response(question)
    }
}
