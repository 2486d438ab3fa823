//! Width module orchestrator.
//!
//! Callers import the measurement helpers from here while the scanner lives
//! in the private `utils` module.

mod utils;

pub use utils::{display_width, truncate_last_visible, truncate_to_width, visible_width};
