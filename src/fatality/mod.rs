//! Fatality lookup and outcome rolls

mod roll;
mod table;


pub use roll::*;
pub use table::*;
