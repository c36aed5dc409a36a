// ============================================================
// Layer 4: Data Pipeline
// ============================================================
// Everything from raw question text to tensor batches.
//
// The pipeline flows in this order:
//
//   CSV file / sample corpus
//       │
//       ▼
//   CsvCorpusLoader   → reads rows, assigns dense labels
//       │
//       ▼
//   Normalizer        → lowercase, strip punctuation, squash spaces
//       │
//       ▼
//   Vocabulary        → word → id, fixed-length left-padded ids
//       │
//       ▼
//   IntentDataset     → implements Burn's Dataset trait
//       │
//       ▼
//   IntentBatcher     → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// At inference time only the Normalizer and Vocabulary run.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Loads question,answer,category CSV files with the csv crate
pub mod loader;

/// The twenty built-in training questions
pub mod sample_corpus;

/// Text normalisation shared by training and inference
pub mod normalizer;

/// Word-frequency vocabulary and fixed-length encoding
pub mod vocabulary;

/// Implements Burn's Dataset trait for encoded questions
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Splits encoded samples into train/validation sets
pub mod splitter;
