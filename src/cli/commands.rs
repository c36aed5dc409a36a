// ============================================================
// Layer 1: CLI Commands and Arguments
// ============================================================
// Defines the four subcommands and all their configurable
// flags. Defaults match TrainConfig / EngineSettings.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::{chat_engine::EngineSettings, train_use_case::TrainConfig};
use crate::domain::responses::DEFAULT_CONFIDENCE_THRESHOLD;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the intent classifier and write every artifact
    Train(TrainArgs),

    /// Answer one question
    Ask(AskArgs),

    /// Interactive chat on stdin; `quit`, `exit` or EOF stops
    Chat(EngineArgs),

    /// Clean every CSV file in a directory into processed_<name>.csv
    ProcessData(ProcessDataArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// question,answer,category CSV file; built-in sample corpus if omitted
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Directory to write the model and its artifacts to
    #[arg(long, default_value = "models")]
    pub model_dir: PathBuf,

    /// Most frequent words kept in the vocabulary
    #[arg(long, default_value_t = 10_000)]
    pub max_vocabulary_size: usize,

    /// Every question is padded/truncated to this many word ids
    #[arg(long, default_value_t = 100)]
    pub max_seq_len: usize,

    #[arg(long, default_value_t = 128)]
    pub embedding_dim: usize,

    /// Convolution filters per layer
    #[arg(long, default_value_t = 128)]
    pub filters: usize,

    #[arg(long, default_value_t = 5)]
    pub kernel_size: usize,

    /// Max-pool window (and stride)
    #[arg(long, default_value_t = 5)]
    pub pool_size: usize,

    #[arg(long, default_value_t = 128)]
    pub dense_units: usize,

    /// Dropout probability after the dense layer
    #[arg(long, default_value_t = 0.5)]
    pub dropout: f64,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 50)]
    pub epochs: usize,

    #[arg(long, default_value_t = 4)]
    pub batch_size: usize,

    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Fraction of examples held out for validation (taken from the end)
    #[arg(long, default_value_t = 0.2)]
    pub validation_split: f64,

    /// Shuffle examples before holding out the validation set
    #[arg(long)]
    pub shuffle_before_split: bool,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:            a.data,
            model_dir:            a.model_dir,
            max_vocabulary_size:  a.max_vocabulary_size,
            max_seq_len:          a.max_seq_len,
            embedding_dim:        a.embedding_dim,
            filters:              a.filters,
            kernel_size:          a.kernel_size,
            pool_size:            a.pool_size,
            dense_units:          a.dense_units,
            dropout:              a.dropout,
            epochs:               a.epochs,
            batch_size:           a.batch_size,
            learning_rate:        a.lr,
            validation_split:     a.validation_split,
            shuffle_before_split: a.shuffle_before_split,
            seed:                 a.seed,
        }
    }
}

/// Where to find a trained model and how picky to be
#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Directory written by `train`
    #[arg(long, default_value = "models")]
    pub model_dir: PathBuf,

    /// Predictions below this confidence ask the user to rephrase
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE_THRESHOLD)]
    pub threshold: f32,
}

impl From<EngineArgs> for EngineSettings {
    fn from(a: EngineArgs) -> Self {
        EngineSettings {
            model_dir:            a.model_dir,
            confidence_threshold: a.threshold,
        }
    }
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to answer
    #[arg(long)]
    pub question: String,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Args, Debug)]
pub struct ProcessDataArgs {
    /// Directory containing question,answer,category CSV files
    #[arg(long, default_value = "training_data")]
    pub data_dir: PathBuf,

    /// Where processed_<name>.csv files are written
    #[arg(long, default_value = "processed_data")]
    pub output_dir: PathBuf,
}
