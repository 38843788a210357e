//! Configuration module for simulation parameters
//!
//! Everything here deserializes from JSON and falls back to the reference
//! values for missing fields.

mod rates;

pub use rates::*;

use crate::error::Result;
use crate::fatality::AgeRateTable;
use crate::growth::GrowthParams;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default suspense delay between a roll and its outcome
pub const DEFAULT_ROLL_DELAY_MS: u64 = 200;
/// Infected count at week one
pub const DEFAULT_SEED_INFECTED: f64 = 2.0;
/// New infections caused by each infected person per week
pub const DEFAULT_REPRODUCTION_FACTOR: f64 = 2.0;
/// Share of infected people who die
pub const DEFAULT_KILL_RATE: f64 = 0.034;

/// Full simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub rate_table: Vec<AgeBand>,
    pub roll_delay_ms: u64,
    pub seed_infected: f64,
    pub reproduction_factor: f64,
    pub kill_rate: f64,
    /// Fixed RNG seed for reproducible dice rolls
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rate_table: REFERENCE_BANDS.to_vec(),
            roll_delay_ms: DEFAULT_ROLL_DELAY_MS,
            seed_infected: DEFAULT_SEED_INFECTED,
            reproduction_factor: DEFAULT_REPRODUCTION_FACTOR,
            kill_rate: DEFAULT_KILL_RATE,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn validate(&self) -> Result<()> {
        self.rate_table()?;
        self.growth_params()?;
        Ok(())
    }

    /// Build the validated lookup table
    pub fn rate_table(&self) -> Result<AgeRateTable> {
        AgeRateTable::new(self.rate_table.iter().copied())
    }

    /// Build the validated growth params
    pub fn growth_params(&self) -> Result<GrowthParams> {
        GrowthParams::new(self.seed_infected, self.reproduction_factor, self.kill_rate)
    }

    pub fn roll_delay(&self) -> Duration {
        Duration::from_millis(self.roll_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DistancingError;

    #[test]
    fn test_default_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rate_table.len(), 9);
        assert_eq!(config.roll_delay(), Duration::from_millis(200));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimulationConfig::from_json_str(r#"{"reproduction_factor": 2.5}"#).unwrap();
        assert_eq!(config.reproduction_factor, 2.5);
        assert_eq!(config.kill_rate, DEFAULT_KILL_RATE);
        assert_eq!(config.rate_table, REFERENCE_BANDS.to_vec());
    }

    #[test]
    fn test_custom_rate_table() {
        let json = r#"{"rate_table": [{"max_age": 50, "rate": 0.1}, {"max_age": 90, "rate": 0.5}]}"#;
        let config = SimulationConfig::from_json_str(json).unwrap();
        let table = config.rate_table().unwrap();
        assert_eq!(table.lookup(50), 0.1);
        assert_eq!(table.lookup(51), 0.5);
    }

    #[test]
    fn test_rejects_shrinking_growth() {
        let result = SimulationConfig::from_json_str(r#"{"reproduction_factor": 0.5}"#);
        assert!(matches!(result, Err(DistancingError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_non_positive_seed() {
        let result = SimulationConfig::from_json_str(r#"{"seed_infected": 0}"#);
        assert!(matches!(result, Err(DistancingError::InvalidConfig(_))));
    }

    #[test]
    fn test_growth_params_reject_mutated_config() {
        let mut config = SimulationConfig::default();
        config.reproduction_factor = f64::NAN;
        assert!(matches!(config.growth_params(), Err(DistancingError::InvalidConfig(_))));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_kill_rate_out_of_range() {
        let result = SimulationConfig::from_json_str(r#"{"kill_rate": 1.5}"#);
        assert!(matches!(result, Err(DistancingError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_empty_rate_table() {
        let result = SimulationConfig::from_json_str(r#"{"rate_table": []}"#);
        assert!(matches!(result, Err(DistancingError::InvalidRateTable(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = SimulationConfig::from_json_str("{");
        assert!(matches!(result, Err(DistancingError::Deserialization(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = SimulationConfig::from_path("/nonexistent/distancing.json");
        assert!(matches!(result, Err(DistancingError::Io(_))));
    }

    #[test]
    fn test_growth_params_mirror_config() {
        let params = SimulationConfig::default().growth_params().unwrap();
        assert_eq!(params.seed_infected(), 2.0);
        assert_eq!(params.reproduction_factor(), 2.0);
        assert_eq!(params.kill_rate(), 0.034);
        assert_eq!(params, GrowthParams::default());
    }
}
