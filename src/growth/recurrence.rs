//! Weekly exponential growth of infections

use crate::config::{DEFAULT_KILL_RATE, DEFAULT_REPRODUCTION_FACTOR, DEFAULT_SEED_INFECTED};
use crate::error::{DistancingError, Result};
use std::fmt;

/// Fixed parameters of the growth recurrence.
///
/// Only built through [`GrowthParams::new`] or `Default`, so the infected
/// count is always positive and never shrinks from one week to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthParams {
    seed_infected: f64,
    reproduction_factor: f64,
    kill_rate: f64,
}

impl GrowthParams {
    pub fn new(seed_infected: f64, reproduction_factor: f64, kill_rate: f64) -> Result<Self> {
        if !seed_infected.is_finite() || seed_infected <= 0.0 {
            return Err(DistancingError::InvalidConfig(format!(
                "seed_infected must be positive, got {}",
                seed_infected
            )));
        }
        // Below 1.0 the infected count would shrink week over week
        if !reproduction_factor.is_finite() || reproduction_factor < 1.0 {
            return Err(DistancingError::InvalidConfig(format!(
                "reproduction_factor must be at least 1, got {}",
                reproduction_factor
            )));
        }
        if !(0.0..=1.0).contains(&kill_rate) {
            return Err(DistancingError::InvalidConfig(format!(
                "kill_rate must be within [0, 1], got {}",
                kill_rate
            )));
        }

        Ok(Self {
            seed_infected,
            reproduction_factor,
            kill_rate,
        })
    }

    pub fn seed_infected(&self) -> f64 {
        self.seed_infected
    }

    pub fn reproduction_factor(&self) -> f64 {
        self.reproduction_factor
    }

    pub fn kill_rate(&self) -> f64 {
        self.kill_rate
    }
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            seed_infected: DEFAULT_SEED_INFECTED,
            reproduction_factor: DEFAULT_REPRODUCTION_FACTOR,
            kill_rate: DEFAULT_KILL_RATE,
        }
    }
}

/// Immutable growth state for one period.
///
/// `infected` saturates at `f64::MAX` and `period` at `u32::MAX`, so the
/// state never becomes infinite however often it is advanced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthState {
    pub infected: f64,
    pub period: u32,
}

impl GrowthState {
    /// Week one, seeded from the params
    pub fn initial(params: &GrowthParams) -> Self {
        Self {
            infected: params.seed_infected,
            period: 1,
        }
    }

    /// Successive snapshots starting at this state
    pub fn periods(self, params: GrowthParams) -> impl Iterator<Item = GrowthSnapshot> {
        std::iter::successors(Some(self), move |state| Some(advance_period(*state, &params)))
            .map(move |state| GrowthSnapshot::of(state, &params))
    }
}

/// Advance one period: infected grows by the reproduction factor
#[inline]
pub fn advance_period(state: GrowthState, params: &GrowthParams) -> GrowthState {
    GrowthState {
        infected: (state.infected * params.reproduction_factor).min(f64::MAX),
        period: state.period.saturating_add(1),
    }
}

/// Deaths implied by the current infected count
#[inline]
pub fn killed_count(state: &GrowthState, params: &GrowthParams) -> u64 {
    // `as` saturates at u64::MAX for huge counts
    (state.infected * params.kill_rate).round() as u64
}

/// Renderable view of a growth state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthSnapshot {
    pub period: u32,
    pub infected: f64,
    pub killed: u64,
}

impl GrowthSnapshot {
    pub fn of(state: GrowthState, params: &GrowthParams) -> Self {
        Self {
            period: state.period,
            infected: state.infected,
            killed: killed_count(&state, params),
        }
    }

    /// One skull per death, capped at `limit` glyphs
    pub fn skulls(&self, limit: usize) -> String {
        let count = usize::try_from(self.killed).unwrap_or(usize::MAX).min(limit);
        "💀".repeat(count)
    }
}

impl fmt::Display for GrowthSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Week: {}", self.period)?;
        writeln!(f, "People You Infected: {:.0}", self.infected)?;
        write!(f, "People You Killed: {}", self.killed)
    }
}
