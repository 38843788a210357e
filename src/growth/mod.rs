//! Infection growth and kill count

mod recurrence;
mod session;

#[cfg(test)]
mod property_tests;

pub use recurrence::*;
pub use session::*;
