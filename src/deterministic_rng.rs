//! Random stream construction for a generation run.
//!
//! A run draws every random decision (sector sampling, trunk thinning, palette
//! sampling...) from one `ChaCha8Rng`. Seeding it makes the whole run
//! reproducible, which the regression tests rely on.
//!
//! # Example
//! ```ignore
//! let mut rng = run_rng(Some(42));
//! let heads = rng.gen_bool(0.5); // Always same result for seed 42
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Creates the run's random stream.
///
/// `Some(seed)` yields a deterministic stream; `None` seeds from OS entropy.
#[inline]
pub fn run_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
