// ============================================================
// Layer 5: ML / Model Layer (Burn)
// ============================================================
// All Burn model code lives here. The data layer produces
// tensors for it and the infra layer stores its records, but
// the network itself, the training loop and the forward pass
// used at inference time are defined only in this layer.
//
//   model.rs      : the CNN intent classifier
//                   • Token embeddings
//                   • Two Conv1d + ReLU + MaxPool1d stages
//                   • Global average pooling
//                   • Dense + ReLU + Dropout
//                   • Dense projection to one logit per label
//
//   trainer.rs    : the training loop
//                   Splits the samples, runs Adam over shuffled
//                   batches, measures validation loss/accuracy
//                   every epoch and returns the history
//
//   inferencer.rs : the IntentClassifier used by the engine
//                   Rebuilds the network from its saved config,
//                   loads the weights, serialises forward passes
//
// Everything runs on the NdArray (CPU) backend; training wraps
// it in Autodiff to get gradients.
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Kim (2014) Convolutional Neural Networks for
//            Sentence Classification

/// Backend used for training (gradients tracked)
pub type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;

/// Backend used for validation and inference
pub type InferBackend = burn::backend::NdArray;

/// CNN intent classifier architecture
pub mod model;

/// Training loop with per-epoch validation
pub mod trainer;

/// Burn-backed IntentClassifier for the chat engine
pub mod inferencer;
