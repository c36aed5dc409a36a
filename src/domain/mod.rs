// ============================================================
// Layer 3: Domain Layer
// ============================================================
// Pure Rust structs and traits that define what the chatbot
// knows about: labelled training examples, the label → answer
// map, the confidence gate in front of it, and the keyword
// rules used when no model can answer.
//
// Rules for this layer:
//   - NO Burn framework types
//   - NO file I/O
//   - Only plain structs, enums, traits and pure functions
//
// Everything here is testable without a model on disk.

// Labelled (question, answer, label) examples and the
// category name → label mapping
pub mod training_example;

// Label → canned answer map and the confidence-gated selector
pub mod responses;

// Rule-based keyword responses used in fallback mode
pub mod fallback;

// Core abstractions (traits) that other layers implement
pub mod traits;
