//! Single Bernoulli trial against a fatality rate

use rand::Rng;

/// Result of one dice roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Alive,
    Dead,
}

/// Decide an outcome from an already drawn sample in `[0, 1)`.
///
/// A sample equal to the rate counts as death.
#[inline]
pub fn outcome_for_sample(sample: f64, rate: f64) -> Outcome {
    if sample <= rate {
        Outcome::Dead
    } else {
        Outcome::Alive
    }
}

/// Draw one uniform sample and decide the outcome
#[inline]
pub fn roll_outcome<R: Rng + ?Sized>(rng: &mut R, rate: f64) -> Outcome {
    let sample: f64 = rng.gen();
    outcome_for_sample(sample, rate)
}
