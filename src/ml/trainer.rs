// ============================================================
// Layer 5: Training Loop
// ============================================================
// Full train + validation loop using Burn's DataLoader and Adam.
//
//   1. Hold out the last validation_split of the samples
//   2. Shuffle training batches every epoch (fixed seed)
//   3. Forward → cross-entropy → backward → Adam step
//   4. Evaluate loss/accuracy on the held-out samples
//   5. Record one EpochMetrics row per epoch
//
// Key Burn insight:
//   - Training uses TrainBackend (Autodiff<NdArray>) for gradients
//   - model.valid() returns the model on InferBackend (NdArray),
//     with dropout switched off
//   - Validation batcher must also use InferBackend
//   - argmax(1) returns [batch,1] so we flatten before .equal()
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{
    batcher::IntentBatcher,
    dataset::{IntentDataset, IntentSample},
    splitter::{split_train_val, split_train_val_shuffled},
};
use crate::error::{EngineError, Result};
use crate::infra::metrics::{EpochMetrics, MetricsLogger, TrainingHistory};
use crate::ml::model::{ClassifierConfig, CnnClassifier};
use crate::ml::{InferBackend, TrainBackend};

/// A trained network, already moved to the inference backend.
pub struct FitOutcome {
    pub model:   CnnClassifier<InferBackend>,
    pub history: TrainingHistory,
}

/// Train a classifier on encoded samples.
///
/// `metrics`, when given, receives every epoch row as it is
/// produced so a crashed run still leaves its curve on disk.
pub fn fit(
    cfg:       &TrainConfig,
    model_cfg: &ClassifierConfig,
    samples:   Vec<IntentSample>,
    metrics:   Option<&MetricsLogger>,
) -> Result<FitOutcome> {
    model_cfg.validate()?;

    if let Some(bad) = samples.iter().find(|s| s.token_ids.len() != model_cfg.max_seq_len) {
        return Err(EngineError::InvalidConfig(format!(
            "sample has {} ids, classifier expects {}",
            bad.token_ids.len(),
            model_cfg.max_seq_len
        )));
    }
    if let Some(bad) = samples.iter().find(|s| s.label >= model_cfg.num_classes) {
        return Err(EngineError::InvalidCorpus(format!(
            "label {} is outside 0..{}",
            bad.label, model_cfg.num_classes
        )));
    }

    let (train_samples, val_samples) = if cfg.shuffle_before_split {
        split_train_val_shuffled(samples, cfg.validation_split, cfg.seed)
    } else {
        split_train_val(samples, cfg.validation_split)
    };

    if train_samples.is_empty() {
        return Err(EngineError::InvalidCorpus(
            "no training samples left after the validation split".into(),
        ));
    }

    let device = burn::backend::ndarray::NdArrayDevice::default();
    TrainBackend::seed(cfg.seed);
    tracing::info!(
        "Training on {:?}: {} train / {} validation samples",
        device,
        train_samples.len(),
        val_samples.len()
    );

    train_loop(
        cfg,
        model_cfg,
        IntentDataset::new(train_samples),
        IntentDataset::new(val_samples),
        metrics,
        device,
    )
}

fn train_loop(
    cfg:           &TrainConfig,
    model_cfg:     &ClassifierConfig,
    train_dataset: IntentDataset,
    val_dataset:   IntentDataset,
    metrics:       Option<&MetricsLogger>,
    device:        burn::backend::ndarray::NdArrayDevice,
) -> Result<FitOutcome> {

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: CnnClassifier<TrainBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: vocab_rows={}, classes={}, seq_len={}, filters={}",
        model_cfg.vocab_rows,
        model_cfg.num_classes,
        model_cfg.max_seq_len,
        model_cfg.filters
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let mut optim = AdamConfig::new().init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_loader = DataLoaderBuilder::new(IntentBatcher::<TrainBackend>::new(device.clone()))
        .batch_size(cfg.batch_size.max(1))
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (InnerBackend, no autodiff overhead) ───────────
    let val_loader = DataLoaderBuilder::new(IntentBatcher::<InferBackend>::new(device.clone()))
        .batch_size(cfg.batch_size.max(1))
        .num_workers(1)
        .build(val_dataset);

    let mut history = TrainingHistory::default();

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;
        let mut train_correct  = 0usize;
        let mut train_total    = 0usize;

        for batch in train_loader.iter() {
            train_total += batch.labels.dims()[0];
            let (loss, logits) = model.forward_loss(batch.token_ids, batch.labels.clone());

            train_loss_sum += loss.clone().into_scalar().elem::<f64>();
            train_batches  += 1;
            train_correct  += count_correct(logits, batch.labels);

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.learning_rate, model, grads);
        }

        // ── Validation phase ──────────────────────────────────────────────────
        let model_valid = model.valid();

        let mut val_loss_sum = 0.0f64;
        let mut val_batches  = 0usize;
        let mut val_correct  = 0usize;
        let mut val_total    = 0usize;

        for batch in val_loader.iter() {
            val_total += batch.labels.dims()[0];
            let (loss, logits) = model_valid.forward_loss(batch.token_ids, batch.labels.clone());

            val_loss_sum += loss.into_scalar().elem::<f64>();
            val_batches  += 1;
            val_correct  += count_correct(logits, batch.labels);
        }

        let m = EpochMetrics::new(
            epoch,
            mean_or_nan(train_loss_sum, train_batches),
            ratio(train_correct, train_total),
            mean_or_nan(val_loss_sum, val_batches),
            ratio(val_correct, val_total),
        );

        tracing::info!(
            "Epoch {:>3}/{} | train_loss={:.4} | train_acc={:.1}% | val_loss={:.4} | val_acc={:.1}%",
            epoch, cfg.epochs, m.train_loss, m.train_acc * 100.0, m.val_loss, m.val_acc * 100.0,
        );

        if let Some(logger) = metrics {
            logger.log(&m)?;
        }
        history.push(m);
    }

    tracing::info!("Training complete!");
    Ok(FitOutcome { model: model.valid(), history })
}

/// Number of rows whose arg-max logit matches the label.
fn count_correct<B: Backend>(logits: Tensor<B, 2>, labels: Tensor<B, 1, Int>) -> usize {
    // argmax(1) returns shape [batch, 1]; flatten to [batch]
    let predicted = logits.argmax(1).flatten::<1>(0, 1);
    let correct: i64 = predicted.equal(labels).int().sum().into_scalar().elem::<i64>();
    correct.max(0) as usize
}

fn mean_or_nan(sum: f64, n: usize) -> f64 {
    if n > 0 { sum / n as f64 } else { f64::NAN }
}

fn ratio(correct: usize, total: usize) -> f64 {
    if total > 0 { correct as f64 / total as f64 } else { 0.0 }
}
