// ============================================================
// Layer 6: Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in any specific
// business layer:
//
//   artifact_store.rs : where every artifact lives on disk
//                       Saves/loads model weights with Burn's
//                       CompactRecorder, the architecture with
//                       Burn's Config, and TrainConfig as JSON.
//
//   persistence.rs    : Persistable impls for the vocabulary,
//                       the label → answer map and the category
//                       mapping, with missing/corrupt detection.
//
//   metrics.rs        : training metrics logging
//                       Appends epoch-level loss/accuracy rows
//                       to metrics.csv and keeps them in memory.
//
// Reference: Rust Book §7 (Modules)
//            Burn Book §5 (Checkpointing)

/// Model directory layout and weight/config persistence
pub mod artifact_store;

/// Save/load of the small JSON and CSV artifacts
pub mod persistence;

/// Training metrics CSV logger
pub mod metrics;
