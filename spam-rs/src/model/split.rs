//! Train / held-out split

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

/// Shuffle row indices `0..n_rows` with a fixed seed and split them into
/// `(train, test)`.
///
/// The test partition holds `ceil(n_rows * test_size)` rows, but never so
/// many that the training partition would be empty.
pub fn train_test_split(n_rows: usize, test_size: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n_rows as f64) * test_size).ceil() as usize;
    let n_test = n_test.min(n_rows.saturating_sub(1));

    let test = indices.split_off(n_rows - n_test);

    debug!("Dataset split: {} training, {} held out", indices.len(), test.len());

    (indices, test)
}
