//! Shell prompt layout engine.
//!
//! Renders an ordered list of blocks into the exact string a shell prints as
//! its prompt: ANSI styling, fill blocks sized to the terminal, right aligned
//! content and the per-shell wrapping each host expects.

pub mod ansi;
pub mod block;
pub mod config;
pub mod console_title;
pub mod driver;
pub mod engine;
pub mod env;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod segments;
pub mod shell;
pub mod template;
pub mod width;

pub use ansi::{AnsiColorWriter, AnsiUtils, ColorWriter, PlainWriter};
pub use block::{RenderedBlock, render_block};
pub use config::{Alignment, Block, BlockKind, Config, TransientPrompt};
pub use console_title::{ConsoleTitle, ConsoleTitleStyle};
pub use driver::cli::{CliDriver, CliDriverError, DriverResult, RenderMode};
pub use engine::{Engine, SegmentTiming};
pub use env::{CliArgs, EnvError, Environment, Platform, StaticEnvironment, SystemEnvironment};
pub use error::{PromptError, Result};
pub use logging::{LogEvent, LogFields, LogLevel, Logger, LoggingError, LoggingResult};
pub use metrics::{MetricSnapshot, RenderMetrics, RightPromptOutcome};
pub use segments::{Segment, SegmentConfig, SegmentError, SegmentStyle};
pub use shell::Shell;
pub use width::display_width;
