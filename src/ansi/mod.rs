//! Escape sequence helpers and color writers.
//!
//! `cursor` holds the raw sequences, `core` wraps them in the zero-width
//! markers the host shell expects and `color` styles segment text.

mod color;
mod core;
pub mod cursor;

pub use color::{AnsiColorWriter, ColorWriter, PlainWriter, parse_color};
pub use self::core::{AnsiUtils, CARRIAGE_FORWARD_COLUMNS};
