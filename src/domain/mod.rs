//! Domain types: tasks, steps, importance tiers, breakdown results

mod breakdown;
mod id;
mod importance;
mod task;

pub use breakdown::BreakdownResult;
pub use id::generate_id;
pub use importance::Importance;
pub use task::{Step, Task};
