//! Per-person dice roll session
//!
//! A session is an immutable value. Every transition consumes the current
//! session and returns the next one, so the holder simply replaces what it
//! renders.

use crate::fatality::{format_rate, AgeRateTable, Outcome};
use std::fmt;

/// Where a person is in the roll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RollState {
    /// Never rolled
    Pending,
    /// Waiting for the suspense delay to elapse
    Rolling,
    /// Survived the last roll, may roll again
    Alive,
    /// Terminal
    Dead,
}

impl RollState {
    /// Glyph shown next to the person, if any
    pub fn glyph(&self) -> Option<&'static str> {
        match self {
            RollState::Pending => None,
            RollState::Rolling => Some("🤮"),
            RollState::Alive => Some("😅"),
            RollState::Dead => Some("💀"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RollState::Pending => "pending",
            RollState::Rolling => "rolling",
            RollState::Alive => "alive",
            RollState::Dead => "dead",
        }
    }
}

impl From<Outcome> for RollState {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Alive => RollState::Alive,
            Outcome::Dead => RollState::Dead,
        }
    }
}

/// One household member's roll history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiceSession {
    age: i32,
    rate: f64,
    rolls: u32,
    state: RollState,
}

impl DiceSession {
    /// New session with the rate looked up in `table`
    pub fn new(age: i32, table: &AgeRateTable) -> Self {
        Self::with_rate(age, table.lookup(age))
    }

    pub fn with_rate(age: i32, rate: f64) -> Self {
        Self {
            age,
            rate,
            rolls: 0,
            state: RollState::Pending,
        }
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn rolls(&self) -> u32 {
        self.rolls
    }

    pub fn state(&self) -> RollState {
        self.state
    }

    /// Whether a roll request would be accepted right now
    pub fn can_roll(&self) -> bool {
        match self.state {
            RollState::Pending | RollState::Alive => true,
            RollState::Rolling | RollState::Dead => false,
        }
    }

    /// Start a roll. Ignored while a roll is in flight or once dead.
    #[must_use]
    pub fn begin_roll(self) -> Self {
        match self.state {
            RollState::Pending | RollState::Alive => Self {
                rolls: self.rolls.saturating_add(1),
                state: RollState::Rolling,
                ..self
            },
            RollState::Rolling | RollState::Dead => self,
        }
    }

    /// Settle an in-flight roll. Ignored unless rolling.
    #[must_use]
    pub fn resolve(self, outcome: Outcome) -> Self {
        match self.state {
            RollState::Rolling => Self {
                state: outcome.into(),
                ..self
            },
            RollState::Pending | RollState::Alive | RollState::Dead => self,
        }
    }
}

impl fmt::Display for DiceSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(glyph) = self.state.glyph() {
            write!(f, "{} ", glyph)?;
        }
        write!(
            f,
            "{} year old | Fatality Rate: {} | Rolls: {}",
            self.age,
            format_rate(self.rate),
            self.rolls
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = DiceSession::new(65, AgeRateTable::reference());
        assert_eq!(session.age(), 65);
        assert_eq!(session.rate(), 0.036);
        assert_eq!(session.rolls(), 0);
        assert_eq!(session.state(), RollState::Pending);
        assert!(session.can_roll());
    }

    #[test]
    fn test_roll_cycle() {
        let session = DiceSession::with_rate(30, 0.002).begin_roll();
        assert_eq!(session.state(), RollState::Rolling);
        assert_eq!(session.rolls(), 1);

        let session = session.resolve(Outcome::Alive);
        assert_eq!(session.state(), RollState::Alive);
        assert!(session.can_roll());

        let session = session.begin_roll().resolve(Outcome::Dead);
        assert_eq!(session.state(), RollState::Dead);
        assert_eq!(session.rolls(), 2);
    }

    #[test]
    fn test_dead_is_terminal() {
        let dead = DiceSession::with_rate(85, 0.148)
            .begin_roll()
            .resolve(Outcome::Dead);
        let again = dead.begin_roll();
        assert_eq!(again, dead);
        assert_eq!(again.resolve(Outcome::Alive), dead);
        assert!(!dead.can_roll());
    }

    #[test]
    fn test_roll_ignored_while_rolling() {
        let rolling = DiceSession::with_rate(40, 0.004).begin_roll();
        assert_eq!(rolling.begin_roll(), rolling);
        assert_eq!(rolling.rolls(), 1);
    }

    #[test]
    fn test_resolve_without_roll_ignored() {
        let pending = DiceSession::with_rate(40, 0.004);
        assert_eq!(pending.resolve(Outcome::Dead), pending);
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(RollState::Pending.glyph(), None);
        assert_eq!(RollState::Rolling.glyph(), Some("🤮"));
        assert_eq!(RollState::Alive.glyph(), Some("😅"));
        assert_eq!(RollState::Dead.glyph(), Some("💀"));
    }

    #[test]
    fn test_display() {
        let session = DiceSession::with_rate(23, 0.002);
        assert_eq!(
            session.to_string(),
            "23 year old | Fatality Rate: 0.2% | Rolls: 0"
        );
        let dead = session.begin_roll().resolve(Outcome::Dead);
        assert_eq!(
            dead.to_string(),
            "💀 23 year old | Fatality Rate: 0.2% | Rolls: 1"
        );
    }
}
