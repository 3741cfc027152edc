//! Pure data transforms: filtering, ordering, pagination and cell formatting.
//!
//! Nothing here holds state. The engines in [`crate::engine`] own the runtime
//! values and the [`Table`](crate::table::Table) feeds them through these
//! functions on every recompute.

mod filter;
mod format;
mod order;
mod page;

pub use filter::*;
pub use format::*;
pub use order::*;
pub use page::*;
