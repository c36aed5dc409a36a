// ============================================================
// Error Taxonomy
// ============================================================
// Library-level errors for the response engine.
//
// Only the training path lets these escape to the caller.
// The inference path (ChatEngine::get_response) catches every
// variant and answers from the keyword fallback instead.
//
// The application and CLI layers wrap these in anyhow::Error
// and add context with .context(...).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// An artifact file is absent. Not fatal at inference time.
    #[error("Artifact not found: '{}'", path.display())]
    ArtifactMissing { path: PathBuf },

    /// An artifact file exists but cannot be deserialised.
    #[error("Artifact '{}' is corrupt: {reason}", path.display())]
    ArtifactCorrupt { path: PathBuf, reason: String },

    /// The numerical backend failed during a forward pass.
    #[error("Inference failed: {0}")]
    InferenceFailure(String),

    #[error("No trained model is available")]
    NoModelAvailable,

    #[error("Invalid training corpus: {0}")]
    InvalidCorpus(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl EngineError {
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        EngineError::ArtifactCorrupt {
            path:   path.into(),
            reason: reason.to_string(),
        }
    }

    /// True for the variants that put the engine into fallback mode
    /// rather than aborting a training run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::ArtifactMissing { .. }
                | EngineError::ArtifactCorrupt { .. }
                | EngineError::InferenceFailure(_)
                | EngineError::NoModelAvailable
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_path() {
        let err = EngineError::ArtifactMissing { path: PathBuf::from("model/tokenizer.json") };
        assert_eq!(err.to_string(), "Artifact not found: 'model/tokenizer.json'");
    }

    #[test]
    fn test_recoverable_variants() {
        assert!(EngineError::NoModelAvailable.is_recoverable());
        assert!(EngineError::corrupt("x.json", "bad").is_recoverable());
        assert!(!EngineError::InvalidCorpus("empty".into()).is_recoverable());
    }
}
