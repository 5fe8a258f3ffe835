// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles samples and splits them into two sets:
//   - Training set: used to fit the forest
//   - Test set:     used for the quality gate
//
// The shuffle is driven by a StdRng seeded from the caller, so
// the same seed always yields the same split. Repeated training
// runs with the same hyperparameters therefore report identical
// accuracy figures.
//
// Split ratio: 80% training, 20% test (configurable). The test
// set gets ceil(n * test_fraction) rows and training gets the rest.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.
//
// Reference: rand crate documentation (SeedableRng)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` with a seeded RNG and split into (train, test).
///
/// # Arguments
/// * `samples`       - All available samples (consumed by this function)
/// * `test_fraction` - Proportion held out for testing, e.g. 0.2 = 20%
/// * `seed`          - Seed for the shuffle; same seed, same split
///
/// # Example
/// ```ignore
/// let (train, test) = split_train_test(all_samples, 0.2, 42);
/// // test has ceil(20%) of samples, train has the remainder
/// ```
pub fn split_train_test<T>(
    mut samples:   Vec<T>,
    test_fraction: f64,
    seed:          u64,
) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    // e.g. 150 samples * 0.2 = 30 test → first 120 are training
    //      7 samples * 0.2 = 1.4 → 2 test, 5 training
    let total    = samples.len();
    let n_test   = ((total as f64) * test_fraction).ceil() as usize;
    let split_at = total - n_test.min(total);

    // After this: samples = [0..split_at], test = [split_at..total]
    let test = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} test ({}% / {}%)",
        samples.len(),
        test.len(),
        (samples.len() * 100) / total.max(1),
        (test.len()    * 100) / total.max(1),
    );

    (samples, test)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..150).collect();
        let (train, test)     = split_train_test(items, 0.2, 42);
        assert_eq!(train.len(), 120);
        assert_eq!(test.len(),  30);
    }

    #[test]
    fn test_fractional_test_size_rounds_up() {
        let (train, test) = split_train_test((0..7).collect::<Vec<usize>>(), 0.2, 42);
        assert_eq!((train.len(), test.len()), (5, 2));

        let (train, test) = split_train_test((0..11).collect::<Vec<usize>>(), 0.25, 42);
        assert_eq!((train.len(), test.len()), (8, 3));
    }

    #[test]
    fn test_zero_test_fraction_keeps_everything_for_training() {
        let (train, test) = split_train_test((0..10).collect::<Vec<usize>>(), 0.0, 42);
        assert_eq!((train.len(), test.len()), (10, 0));
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize>  = (0..50).collect();
        let (train, test)      = split_train_test(items, 0.3, 7);
        let mut all: Vec<usize> = train.into_iter().chain(test).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_train_test((0..100).collect::<Vec<usize>>(), 0.2, 42);
        let b = split_train_test((0..100).collect::<Vec<usize>>(), 0.2, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_order() {
        let (a, _) = split_train_test((0..100).collect::<Vec<usize>>(), 0.2, 1);
        let (b, _) = split_train_test((0..100).collect::<Vec<usize>>(), 0.2, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, test)     = split_train_test(items, 0.2, 42);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }
}
