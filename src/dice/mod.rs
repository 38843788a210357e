//! Dice roll sessions and their delayed resolution

mod scheduler;
mod session;
mod view;


pub use scheduler::*;
pub use session::*;
pub use view::*;
