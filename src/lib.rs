//! Distancing Core - social distancing simulator engine
//!
//! Two independent pieces make up the core:
//!
//! * the dice roll: every household member gets a fatality rate from an
//!   age-banded table and may keep rolling until they die;
//! * the kill count: infections double every week and a fixed share of the
//!   infected die.
//!
//! Python bindings are available behind the `python` feature.

pub mod ages;
pub mod config;
pub mod dice;
pub mod error;
pub mod fatality;
pub mod growth;

#[cfg(feature = "python")]
mod python;

pub use crate::ages::{parse_ages, to_query};
pub use crate::config::{AgeBand, SimulationConfig, REFERENCE_BANDS};
pub use crate::dice::{DiceSession, InfectionView, PendingRoll, PersonId, Resolution, RollState};
pub use crate::error::{DistancingError, Result};
pub use crate::fatality::{
    format_rate, lookup_fatality_rate, outcome_for_sample, roll_outcome, AgeRateTable, Outcome,
};
pub use crate::growth::{
    advance_period, killed_count, GrowthParams, GrowthSession, GrowthSnapshot, GrowthState,
};
