//! Pluggable random source
//!
//! Every draw of a run (step counts and location flips) comes from one
//! generator owned by the scheduler. A seed makes the run reproducible.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Random source handed to the scheduler
pub type RandomSource = Box<dyn RngCore + Send>;

/// Build the random source for a run
pub fn rng_from_seed(seed: Option<u64>) -> RandomSource {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(StdRng::from_entropy()),
    }
}
