#![recursion_limit = "256"]

//! medibot: a healthcare-information chatbot engine.
//!
//! A question is normalised, encoded with a word-frequency
//! vocabulary and classified by a small CNN into one of the
//! trained categories; the category's canned answer is the
//! reply. When no model is available, or a prediction fails,
//! keyword rules answer instead.
//!
//! The crate is layered:
//!
//! | Layer | Module        | Role                                        |
//! |-------|---------------|---------------------------------------------|
//! | 1     | `cli`         | clap commands                               |
//! | 2     | `application` | training, chat engine, data processing      |
//! | 3     | `domain`      | examples, responses, fallback rules, traits |
//! | 4     | `data`        | CSV loading, normalising, encoding, batches |
//! | 5     | `ml`          | Burn model, training loop, inference        |
//! | 6     | `infra`       | artifacts on disk, metrics                  |

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;
pub mod ml;

pub use application::chat_engine::{ChatEngine, EngineSettings, EngineStatus};
pub use error::{EngineError, Result};
