pub mod agenda;
pub mod time;

pub use agenda::*;
pub use time::*;
