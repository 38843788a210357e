//! Python bindings
//!
//! Built with the `python` feature. The validated configuration is cached
//! in Rust memory once and shared by every call.

use crate::ages;
use crate::config::{AgeBand, SimulationConfig};
use crate::dice::{delayed_roll, DiceSession, RollState};
use crate::error::DistancingError;
use crate::fatality::{self, AgeRateTable, Outcome};
use crate::growth::{GrowthParams, GrowthSession};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Cached Configuration
// ============================================================================

/// Validated configuration plus the structures derived from it
struct CachedConfig {
    table: AgeRateTable,
    growth: GrowthParams,
    roll_delay: Duration,
}

impl CachedConfig {
    fn build(config: &SimulationConfig) -> Result<Self, DistancingError> {
        config.validate()?;
        Ok(Self {
            table: config.rate_table()?,
            growth: config.growth_params()?,
            roll_delay: config.roll_delay(),
        })
    }

    fn reference() -> Self {
        Self {
            table: AgeRateTable::reference().clone(),
            growth: GrowthParams::default(),
            roll_delay: SimulationConfig::default().roll_delay(),
        }
    }
}

/// Global cached configuration, reference values until `init_config` runs
static CACHED_CONFIG: OnceCell<Arc<RwLock<CachedConfig>>> = OnceCell::new();

fn cached() -> &'static Arc<RwLock<CachedConfig>> {
    CACHED_CONFIG.get_or_init(|| Arc::new(RwLock::new(CachedConfig::reference())))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Optional dict entry, `None` when missing or null
fn get_opt<'py>(dict: &Bound<'py, PyDict>, name: &str) -> PyResult<Option<Bound<'py, PyAny>>> {
    Ok(dict.get_item(name)?.filter(|value| !value.is_none()))
}

/// Build a config from a Python dict, defaulting absent keys
fn extract_config(dict: &Bound<'_, PyDict>) -> PyResult<SimulationConfig> {
    let mut config = SimulationConfig::default();

    if let Some(table) = get_opt(dict, "rate_table")? {
        // [(max_age, rate), ...]
        let bands: Vec<(i32, f64)> = table.extract()?;
        config.rate_table = bands
            .into_iter()
            .map(|(max_age, rate)| AgeBand::new(max_age, rate))
            .collect();
    }
    if let Some(value) = get_opt(dict, "roll_delay_ms")? {
        config.roll_delay_ms = value.extract()?;
    }
    if let Some(value) = get_opt(dict, "seed_infected")? {
        config.seed_infected = value.extract()?;
    }
    if let Some(value) = get_opt(dict, "reproduction_factor")? {
        config.reproduction_factor = value.extract()?;
    }
    if let Some(value) = get_opt(dict, "kill_rate")? {
        config.kill_rate = value.extract()?;
    }
    if let Some(value) = get_opt(dict, "seed")? {
        config.seed = Some(value.extract()?);
    }

    Ok(config)
}

fn outcome_label(outcome: Outcome) -> &'static str {
    RollState::from(outcome).label()
}

// ============================================================================
// Python Functions
// ============================================================================

/// Replace the cached configuration.
///
/// # Arguments
/// * `config` - JSON string or dict; `None` restores the reference values
#[pyfunction]
#[pyo3(signature = (config=None))]
fn init_config(config: Option<&Bound<'_, PyAny>>) -> PyResult<()> {
    let cached_config = match config {
        None => CachedConfig::reference(),
        Some(obj) => {
            let parsed = if let Ok(json) = obj.extract::<String>() {
                SimulationConfig::from_json_str(&json)?
            } else {
                let dict: Bound<'_, PyDict> = obj.extract()?;
                extract_config(&dict)?
            };
            CachedConfig::build(&parsed)?
        }
    };

    *cached().write() = cached_config;
    Ok(())
}

/// Fatality rate for an age
#[pyfunction]
fn lookup_fatality_rate(age: i32) -> f64 {
    cached().read().table.lookup(age)
}

/// Rate as a one-decimal percentage string
#[pyfunction]
fn format_rate(rate: f64) -> String {
    fatality::format_rate(rate)
}

/// Roll once, returning "alive" or "dead"
#[pyfunction]
fn roll_outcome(rate: f64) -> &'static str {
    outcome_label(fatality::roll_outcome(&mut rand::thread_rng(), rate))
}

/// Roll after the configured suspense delay.
///
/// Returns an awaitable resolving to "alive" or "dead". Cancelling the
/// awaitable drops the pending roll.
#[pyfunction]
fn roll_async<'py>(py: Python<'py>, rate: f64) -> PyResult<Bound<'py, PyAny>> {
    let delay = cached().read().roll_delay;

    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        let outcome = delayed_roll(delay, rate).await;
        Ok(outcome_label(outcome))
    })
}

/// Parse an `?ages=` query into a list of ages
#[pyfunction]
fn parse_ages(query: &str) -> PyResult<Vec<i32>> {
    Ok(ages::parse_ages(query)?)
}

// ============================================================================
// Python Classes
// ============================================================================

/// One household member's dice session
#[pyclass(name = "DiceSession")]
struct PyDiceSession {
    inner: DiceSession,
}

#[pymethods]
impl PyDiceSession {
    #[new]
    fn new(age: i32) -> Self {
        Self {
            inner: DiceSession::new(age, &cached().read().table),
        }
    }

    #[getter]
    fn age(&self) -> i32 {
        self.inner.age()
    }

    #[getter]
    fn rate(&self) -> f64 {
        self.inner.rate()
    }

    #[getter]
    fn rolls(&self) -> u32 {
        self.inner.rolls()
    }

    #[getter]
    fn state(&self) -> &'static str {
        self.inner.state().label()
    }

    fn can_roll(&self) -> bool {
        self.inner.can_roll()
    }

    /// Start a roll; returns False when ignored
    fn begin_roll(&mut self) -> bool {
        let accepted = self.inner.can_roll();
        self.inner = self.inner.begin_roll();
        accepted
    }

    /// Settle the in-flight roll with "alive" or "dead"
    fn resolve(&mut self, outcome: &str) -> PyResult<()> {
        let outcome = match outcome {
            "alive" => Outcome::Alive,
            "dead" => Outcome::Dead,
            other => {
                return Err(pyo3::exceptions::PyValueError::new_err(format!(
                    "Unknown outcome: {}",
                    other
                )))
            }
        };
        self.inner = self.inner.resolve(outcome);
        Ok(())
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }
}

/// Kill-count session
#[pyclass(name = "GrowthSession")]
struct PyGrowthSession {
    inner: GrowthSession,
}

#[pymethods]
impl PyGrowthSession {
    #[new]
    fn new() -> Self {
        Self {
            inner: GrowthSession::new(cached().read().growth),
        }
    }

    #[getter]
    fn period(&self) -> u32 {
        self.inner.snapshot().period
    }

    #[getter]
    fn infected(&self) -> f64 {
        self.inner.snapshot().infected
    }

    #[getter]
    fn killed(&self) -> u64 {
        self.inner.snapshot().killed
    }

    /// Advance one week; returns (period, infected, killed)
    fn advance(&mut self) -> (u32, f64, u64) {
        let snapshot = self.inner.advance();
        (snapshot.period, snapshot.infected, snapshot.killed)
    }

    fn __str__(&self) -> String {
        self.inner.snapshot().to_string()
    }
}

// ============================================================================
// Python Module Definition
// ============================================================================

#[pymodule]
fn distancing_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_config, m)?)?;
    m.add_function(wrap_pyfunction!(lookup_fatality_rate, m)?)?;
    m.add_function(wrap_pyfunction!(format_rate, m)?)?;
    m.add_function(wrap_pyfunction!(roll_outcome, m)?)?;
    m.add_function(wrap_pyfunction!(roll_async, m)?)?;
    m.add_function(wrap_pyfunction!(parse_ages, m)?)?;
    m.add_class::<PyDiceSession>()?;
    m.add_class::<PyGrowthSession>()?;
    Ok(())
}
