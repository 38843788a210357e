//! Delayed roll resolution on the Tokio runtime

use crate::error::{DistancingError, Result};
use crate::fatality::{outcome_for_sample, roll_outcome, Outcome};
use log::debug;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// RNG shared by every roll of one view
pub type SharedRng = Arc<Mutex<StdRng>>;

/// Seeded RNG for reproducible runs, entropy otherwise
pub fn shared_rng(seed: Option<u64>) -> SharedRng {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Arc::new(Mutex::new(rng))
}

/// Handle to a roll waiting out its delay.
///
/// Cancelling or dropping the handle aborts the task, so the callback never
/// runs for a roll whose owner has gone away.
#[derive(Debug)]
pub struct PendingRoll {
    handle: JoinHandle<()>,
}

impl PendingRoll {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PendingRoll {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Roll against `rate` once `delay` has elapsed and hand the outcome to
/// `on_resolve`.
///
/// Fails when called outside a Tokio runtime.
pub fn schedule_roll<F>(delay: Duration, rate: f64, rng: SharedRng, on_resolve: F) -> Result<PendingRoll>
where
    F: FnOnce(Outcome) + Send + 'static,
{
    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|e| DistancingError::Scheduler(e.to_string()))?;

    debug!("scheduling roll at rate {} in {:?}", rate, delay);
    let handle = runtime.spawn(async move {
        tokio::time::sleep(delay).await;
        let outcome = roll_outcome(&mut *rng.lock(), rate);
        debug!("roll at rate {} resolved {:?}", rate, outcome);
        on_resolve(outcome);
    });

    Ok(PendingRoll { handle })
}

/// Wait out `delay`, then roll with the thread-local RNG.
///
/// Dropping the future before it completes discards the roll.
pub async fn delayed_roll(delay: Duration, rate: f64) -> Outcome {
    tokio::time::sleep(delay).await;
    outcome_for_sample(rand::random::<f64>(), rate)
}
