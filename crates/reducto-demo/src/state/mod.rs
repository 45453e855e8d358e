//! Application State Module
//!
//! One state type per slice of the root record.

mod counter;
mod stats;
mod todos;

pub use counter::CounterState;
pub use stats::StatsState;
pub use todos::{Todo, TodosState};
