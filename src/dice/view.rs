//! Infection view: every household member's session for one visit

use super::{schedule_roll, shared_rng, DiceSession, PendingRoll, RollState, SharedRng};
use crate::config::SimulationConfig;
use crate::error::{DistancingError, Result};
use crate::fatality::{AgeRateTable, Outcome};
use ahash::AHashMap;
use log::{debug, info};
use std::time::Duration;
use tokio::sync::mpsc;

/// Stable index of a household member within a view
pub type PersonId = usize;

/// A settled roll on its way back to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub person: PersonId,
    pub outcome: Outcome,
}

/// An in-flight roll and the session as it was before the roll started
struct InFlight {
    roll: PendingRoll,
    before: DiceSession,
}

/// Owns the household's sessions and their in-flight rolls.
///
/// Removed members leave an empty slot so ids are never reused. Dropping
/// the view drops every `PendingRoll`, which aborts the timers.
pub struct InfectionView {
    people: Vec<Option<DiceSession>>,
    pending: AHashMap<PersonId, InFlight>,
    rng: SharedRng,
    delay: Duration,
    sender: mpsc::UnboundedSender<Resolution>,
    receiver: mpsc::UnboundedReceiver<Resolution>,
}

impl InfectionView {
    /// Build a view from a validated config
    pub fn new(ages: &[i32], config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let table = config.rate_table()?;
        Ok(Self::with_table(ages, &table, config.roll_delay(), shared_rng(config.seed)))
    }

    pub fn with_table(ages: &[i32], table: &AgeRateTable, delay: Duration, rng: SharedRng) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            people: ages
                .iter()
                .map(|&age| Some(DiceSession::new(age, table)))
                .collect(),
            pending: AHashMap::with_capacity(ages.len()),
            rng,
            delay,
            sender,
            receiver,
        }
    }

    pub fn session(&self, person: PersonId) -> Option<&DiceSession> {
        self.people.get(person).and_then(Option::as_ref)
    }

    /// Live sessions in household order
    pub fn sessions(&self) -> impl Iterator<Item = (PersonId, &DiceSession)> {
        self.people
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|session| (id, session)))
    }

    pub fn len(&self) -> usize {
        self.sessions().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn dead_count(&self) -> usize {
        self.sessions()
            .filter(|(_, session)| session.state() == RollState::Dead)
            .count()
    }

    /// Start a roll for one person.
    ///
    /// Returns `Ok(false)` when the session ignores the request (already
    /// rolling or dead). Must be called inside a Tokio runtime.
    pub fn roll(&mut self, person: PersonId) -> Result<bool> {
        let session = *self
            .session(person)
            .ok_or(DistancingError::UnknownPerson(person))?;

        if !session.can_roll() {
            debug!("person {} ignored roll while {}", person, session.state().label());
            return Ok(false);
        }

        let sender = self.sender.clone();
        let pending = schedule_roll(self.delay, session.rate(), self.rng.clone(), move |outcome| {
            // The view may be gone already
            let _ = sender.send(Resolution { person, outcome });
        })?;

        self.people[person] = Some(session.begin_roll());
        self.pending.insert(
            person,
            InFlight {
                roll: pending,
                before: session,
            },
        );
        Ok(true)
    }

    /// Start a roll for everyone who can roll; returns how many started
    pub fn roll_all(&mut self) -> Result<usize> {
        let ids: Vec<PersonId> = self.sessions().map(|(id, _)| id).collect();
        let mut started = 0;
        for id in ids {
            if self.roll(id)? {
                started += 1;
            }
        }
        Ok(started)
    }

    /// Drop a person from the household, cancelling their roll
    pub fn remove(&mut self, person: PersonId) -> Result<DiceSession> {
        let session = self
            .people
            .get_mut(person)
            .and_then(Option::take)
            .ok_or(DistancingError::UnknownPerson(person))?;

        if let Some(in_flight) = self.pending.remove(&person) {
            in_flight.roll.cancel();
            debug!("cancelled roll for removed person {}", person);
        }
        Ok(session)
    }

    /// Cancel every in-flight roll.
    ///
    /// Each rolling session goes back to the state and roll count it had
    /// before the roll started, so it can be rolled again.
    pub fn cancel_all(&mut self) {
        for (person, in_flight) in self.pending.drain() {
            in_flight.roll.cancel();
            if let Some(slot) = self.people.get_mut(person) {
                if slot.is_some() {
                    *slot = Some(in_flight.before);
                }
            }
            debug!("cancelled roll for person {}", person);
        }
    }

    /// Apply a resolution if its person still exists and is rolling
    pub fn apply(&mut self, resolution: Resolution) -> bool {
        if self.pending.remove(&resolution.person).is_none() {
            debug!("discarding stale resolution for person {}", resolution.person);
            return false;
        }

        let Some(slot) = self.people.get_mut(resolution.person) else {
            return false;
        };
        let Some(session) = slot.as_mut() else {
            return false;
        };

        let next = session.resolve(resolution.outcome);
        if next.state() == RollState::Dead {
            info!(
                "{} year old died after {} rolls",
                next.age(),
                next.rolls()
            );
        }
        *session = next;
        true
    }

    /// Wait for the next roll to settle and apply it.
    ///
    /// Returns `None` straight away when nothing is in flight.
    pub async fn next_resolution(&mut self) -> Option<Resolution> {
        while !self.pending.is_empty() {
            let resolution = self.receiver.recv().await?;
            if self.apply(resolution) {
                return Some(resolution);
            }
        }
        None
    }

    /// Apply every resolution that has already arrived, without waiting
    pub fn apply_ready(&mut self) -> Vec<Resolution> {
        let mut applied = Vec::new();
        while let Ok(resolution) = self.receiver.try_recv() {
            if self.apply(resolution) {
                applied.push(resolution);
            }
        }
        applied
    }
}
