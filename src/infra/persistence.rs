// ============================================================
// Layer 6: Artifact Persistence
// ============================================================
// Persistable impls for the three small artifacts the engine
// needs besides the model weights:
//
//   Vocabulary       → tokenizer.json   (pretty JSON)
//   LabelResponseMap → responses.json   (pretty JSON, string keys)
//   CategoryMapping  → categories.csv   (`name,id` lines, no header)
//
// Every artifact is loaded on its own, so one bad file never
// prevents the others from being read:
//
//   file absent          → EngineError::ArtifactMissing
//   file unreadable/bad  → EngineError::ArtifactCorrupt
//
// Writes go through serde_json::to_string_pretty over BTreeMaps,
// so save → load → save reproduces the file byte for byte.

use std::{fs, path::Path};

use serde::{de::DeserializeOwned, Serialize};

use crate::data::vocabulary::Vocabulary;
use crate::domain::responses::LabelResponseMap;
use crate::domain::training_example::CategoryMapping;
use crate::domain::traits::Persistable;
use crate::error::{EngineError, Result};

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(EngineError::ArtifactMissing { path: path.to_path_buf() })
    }
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    tracing::debug!("Wrote '{}'", path.display());
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    ensure_exists(path)?;
    let json = fs::read_to_string(path).map_err(|e| EngineError::corrupt(path, e))?;
    serde_json::from_str(&json).map_err(|e| EngineError::corrupt(path, e))
}

// ─── Vocabulary ───────────────────────────────────────────────────────────────
impl Persistable for Vocabulary {
    fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self)
    }

    fn load(path: &Path) -> Result<Self> {
        let vocab: Vocabulary = read_json(path)?;
        vocab
            .check_consistency()
            .map_err(|reason| EngineError::corrupt(path, reason))?;
        tracing::debug!("Loaded vocabulary of {} words", vocab.len());
        Ok(vocab)
    }
}

// ─── LabelResponseMap ─────────────────────────────────────────────────────────
impl Persistable for LabelResponseMap {
    fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self)
    }

    fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }
}

// ─── CategoryMapping ──────────────────────────────────────────────────────────
impl Persistable for CategoryMapping {
    fn save(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        for (name, id) in self.iter() {
            writer.serialize((name, id))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        ensure_exists(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|e| EngineError::corrupt(path, e))?;

        let pairs = reader
            .deserialize::<(String, usize)>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| EngineError::corrupt(path, e))?;

        CategoryMapping::from_pairs(pairs)
            .ok_or_else(|| EngineError::corrupt(path, "category ids are not exactly 0..n"))
    }
}
