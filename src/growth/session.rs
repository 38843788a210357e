//! Kill-count session for one visit to the growth view

use super::{advance_period, GrowthParams, GrowthSnapshot, GrowthState};
use log::info;

/// Holds the current growth state and swaps it for the next one on every
/// "live another week" action
#[derive(Debug, Clone)]
pub struct GrowthSession {
    params: GrowthParams,
    state: GrowthState,
}

impl GrowthSession {
    pub fn new(params: GrowthParams) -> Self {
        Self {
            state: GrowthState::initial(&params),
            params,
        }
    }

    pub fn state(&self) -> GrowthState {
        self.state
    }

    pub fn params(&self) -> &GrowthParams {
        &self.params
    }

    pub fn snapshot(&self) -> GrowthSnapshot {
        GrowthSnapshot::of(self.state, &self.params)
    }

    /// Move to the next week and return what it looks like
    pub fn advance(&mut self) -> GrowthSnapshot {
        self.state = advance_period(self.state, &self.params);
        let snapshot = self.snapshot();
        info!(
            "week {}: {:.0} infected, {} killed",
            snapshot.period, snapshot.infected, snapshot.killed
        );
        snapshot
    }
}

impl Default for GrowthSession {
    fn default() -> Self {
        Self::new(GrowthParams::default())
    }
}
