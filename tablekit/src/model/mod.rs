//! Row data model: identifiers, dynamic field values and records.

mod item;
mod value;

pub use item::*;
pub use value::*;
