//! Error types

mod config;
mod table;
mod validation;

pub use config::*;
pub use table::*;
pub use validation::*;
