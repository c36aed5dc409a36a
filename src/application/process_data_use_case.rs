// ============================================================
// Layer 2: ProcessDataUseCase
// ============================================================
// Batch-cleans a directory of training CSV files.
//
// For every `<name>.csv` in the input directory:
//
//   processed_<name>.csv     question,label,answer
//                            (questions normalised, labels dense)
//   categories_<name>.csv    name,id lines for those labels
//
// A file that fails to load is logged and skipped; the rest
// are still processed.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::loader::CsvCorpusLoader;
use crate::domain::traits::Persistable;

#[derive(Debug, Serialize)]
struct ProcessedRow<'a> {
    question: &'a str,
    label:    usize,
    answer:   &'a str,
}

/// One successfully processed input file.
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub source:     PathBuf,
    pub output:     PathBuf,
    pub categories: PathBuf,
    pub rows:       usize,
}

#[derive(Debug, Default)]
pub struct ProcessReport {
    pub processed: Vec<ProcessedFile>,
    pub skipped:   Vec<PathBuf>,
}

pub struct ProcessDataUseCase {
    data_dir:   PathBuf,
    output_dir: PathBuf,
}

impl ProcessDataUseCase {
    pub fn new(data_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), output_dir: output_dir.into() }
    }

    pub fn execute(&self) -> Result<ProcessReport> {
        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Cannot create '{}'", self.output_dir.display()))?;

        let mut inputs: Vec<PathBuf> = fs::read_dir(&self.data_dir)
            .with_context(|| format!("Cannot read directory '{}'", self.data_dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "csv"))
            .collect();
        // read_dir order is platform dependent
        inputs.sort();

        let mut report = ProcessReport::default();
        for path in inputs {
            match self.process_file(&path) {
                Ok(done) => {
                    tracing::info!(
                        "Processed '{}' → '{}' ({} rows)",
                        done.source.display(),
                        done.output.display(),
                        done.rows
                    );
                    report.processed.push(done);
                }
                Err(e) => {
                    tracing::warn!("Skipping '{}': {e:#}", path.display());
                    report.skipped.push(path);
                }
            }
        }
        Ok(report)
    }

    fn process_file(&self, path: &Path) -> Result<ProcessedFile> {
        let (examples, categories) = CsvCorpusLoader::new(path).load_with_categories()?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .context("file name is not valid UTF-8")?;
        let stem = path
            .file_stem()
            .and_then(|n| n.to_str())
            .context("file name is not valid UTF-8")?;

        let output = self.output_dir.join(format!("processed_{file_name}"));
        let mut writer = csv::Writer::from_path(&output)
            .with_context(|| format!("Cannot write '{}'", output.display()))?;
        for ex in &examples {
            writer.serialize(ProcessedRow {
                question: &ex.question,
                label:    ex.label,
                answer:   &ex.answer,
            })?;
        }
        writer.flush()?;

        let categories_path = self.output_dir.join(format!("categories_{stem}.csv"));
        categories.save(&categories_path)?;

        Ok(ProcessedFile {
            source:     path.to_path_buf(),
            output,
            categories: categories_path,
            rows:       examples.len(),
        })
    }
}
