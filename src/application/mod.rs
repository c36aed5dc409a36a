// ============================================================
// Layer 2: Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (training, answering, preparing data).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No UI or printing here (that's Layer 1)
//   - No direct file formats here (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Errors leave this layer as anyhow::Error with context, except
// ChatEngine::get_response, which always produces a reply.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training workflow and its configuration
pub mod train_use_case;

// The inference workflow: model path with keyword fallback
pub mod chat_engine;

// Batch cleaning of training CSV files
pub mod process_data_use_case;
