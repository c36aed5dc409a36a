// ============================================================
// Layer 4: Train/Validation Splitter
// ============================================================
// Splits encoded samples into a training set (used to update
// weights) and a validation set (used to measure how well the
// model generalises).
//
// Default: the validation set is the LAST fraction of the
// samples, in corpus order. With 20 samples and 0.2:
//
//   [s0 ... s15] → training    [s16 ... s19] → validation
//
// The training set is still shuffled every epoch by the
// DataLoader; this only fixes WHICH samples are held out.
//
// split_train_val_shuffled shuffles first with a seeded RNG
// (Fisher-Yates via rand::seq::SliceRandom) for corpora that
// are sorted by category.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Hold out the last `validation_fraction` of `samples`.
pub fn split_train_val<T>(mut samples: Vec<T>, validation_fraction: f64) -> (Vec<T>, Vec<T>) {
    let total    = samples.len();
    let fraction = validation_fraction.clamp(0.0, 1.0);
    // Floor of the training share, clamped to avoid panics on tiny datasets
    let split_at = ((total as f64) * (1.0 - fraction)).floor() as usize;
    let split_at = split_at.min(total);

    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        samples.len(),
        val.len(),
    );

    (samples, val)
}

/// Shuffle with `seed`, then hold out the last fraction.
pub fn split_train_val_shuffled<T>(
    mut samples:         Vec<T>,
    validation_fraction: f64,
    seed:                u64,
) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);
    split_train_val(samples, validation_fraction)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_is_held_out() {
        let items: Vec<usize> = (0..20).collect();
        let (train, val) = split_train_val(items, 0.2);
        assert_eq!(train, (0..16).collect::<Vec<_>>());
        assert_eq!(val, vec![16, 17, 18, 19]);
    }

    #[test]
    fn test_zero_fraction_keeps_everything() {
        let items: Vec<usize> = (0..10).collect();
        let (train, val) = split_train_val(items, 0.0);
        assert_eq!(train.len(), 10);
        assert!(val.is_empty());
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, val) = split_train_val(items, 0.2);
        assert!(train.is_empty());
        assert!(val.is_empty());
    }

    #[test]
    fn test_shuffled_split_is_reproducible() {
        let a = split_train_val_shuffled((0..50).collect::<Vec<usize>>(), 0.3, 7);
        let b = split_train_val_shuffled((0..50).collect::<Vec<usize>>(), 0.3, 7);
        assert_eq!(a, b);
        assert_eq!(a.0.len() + a.1.len(), 50);
    }
}
