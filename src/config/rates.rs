//! Age band configuration structures

use serde::{Deserialize, Serialize};

/// One band of the age-rate table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeBand {
    /// Oldest age (inclusive) covered by this band
    pub max_age: i32,
    /// Probability that a single trial for this band ends in death
    pub rate: f64,
}

impl AgeBand {
    pub const fn new(max_age: i32, rate: f64) -> Self {
        Self { max_age, rate }
    }
}

/// Fatality rates per age band as of March 29, 2020.
///
/// The last two bands share the 79 threshold. The later one wins, so 0.148
/// covers age 79 and every age above it.
pub const REFERENCE_BANDS: [AgeBand; 9] = [
    AgeBand::new(9, 0.0),
    AgeBand::new(19, 0.002),
    AgeBand::new(29, 0.002),
    AgeBand::new(39, 0.002),
    AgeBand::new(49, 0.004),
    AgeBand::new(59, 0.013),
    AgeBand::new(69, 0.036),
    AgeBand::new(79, 0.08),
    AgeBand::new(79, 0.148),
];
