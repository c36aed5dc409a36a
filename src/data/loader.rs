// ============================================================
// Layer 4: Corpus Loader
// ============================================================
// Loads labelled training examples from a CSV file using the
// csv crate.
//
// Expected layout (header row required, column order free,
// extra columns ignored):
//
//   question,answer,category
//   "What are the symptoms of a cold?","Runny nose, sore throat...",cold
//   "What should I do for a headache?","Rest in a dark room...",headache
//
// Categories are free-form strings. They become dense label
// ids in the order they first appear (cold → 0, headache → 1),
// recorded in a CategoryMapping so the ids can be traced back.
//
// Questions are normalised on the way in; answers are kept
// verbatim because they are shown to the user.

use std::path::PathBuf;

use serde::Deserialize;

use crate::data::normalizer::Normalizer;
use crate::domain::training_example::{CategoryMapping, TrainingExample};
use crate::domain::traits::CorpusSource;
use crate::error::{EngineError, Result};

pub const REQUIRED_COLUMNS: [&str; 3] = ["question", "answer", "category"];

#[derive(Debug, Deserialize)]
struct CorpusRecord {
    question: String,
    answer:   String,
    category: String,
}

/// Loads a question,answer,category CSV file.
pub struct CsvCorpusLoader {
    path: PathBuf,
}

impl CsvCorpusLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the examples together with the category → id mapping
    /// used to label them.
    pub fn load_with_categories(&self) -> Result<(Vec<TrainingExample>, CategoryMapping)> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::InvalidCorpus(format!(
                "'{}' must contain columns {:?}, missing {:?}",
                self.path.display(),
                REQUIRED_COLUMNS,
                missing
            )));
        }

        let normalizer     = Normalizer::new();
        let mut categories = CategoryMapping::new();
        let mut examples   = Vec::new();

        for (row, record) in reader.deserialize::<CorpusRecord>().enumerate() {
            let record = record?;
            if record.question.is_empty() || record.answer.is_empty() {
                // Header is line 1, so data row 0 is line 2
                tracing::warn!(
                    "Skipping line {} of '{}': empty question or answer",
                    row + 2,
                    self.path.display()
                );
                continue;
            }
            let label = categories.id_for(&record.category);
            examples.push(TrainingExample::new(
                normalizer.normalize(&record.question),
                record.answer,
                label,
            ));
        }

        if examples.is_empty() {
            return Err(EngineError::InvalidCorpus(format!(
                "'{}' contains no usable rows",
                self.path.display()
            )));
        }

        tracing::info!(
            "Loaded {} examples in {} categories from '{}'",
            examples.len(),
            categories.len(),
            self.path.display()
        );
        Ok((examples, categories))
    }
}

impl CorpusSource for CsvCorpusLoader {
    fn load_all(&self) -> Result<Vec<TrainingExample>> {
        self.load_with_categories().map(|(examples, _)| examples)
    }
}
