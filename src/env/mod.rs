//! Environment port.
//!
//! The engine never probes the platform directly; everything it needs to know
//! about the terminal, shell and working directory goes through
//! [`Environment`]. `system` holds the production probes, `fixed` a static
//! implementation for tests and benchmarks.

mod fixed;
mod system;

use thiserror::Error;

use crate::shell::Shell;

pub use fixed::StaticEnvironment;
pub use system::SystemEnvironment;

/// Probe failures. Callers degrade them to defaults, they never abort a render.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("terminal width unavailable: {0}")]
    TerminalWidth(String),
    #[error("command `{command}` failed: {reason}")]
    Command { command: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    Darwin,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            "macos" => Platform::Darwin,
            _ => Platform::Other,
        }
    }
}

/// Command line switches the engine cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Emit zsh `PS1=`/`RPROMPT=` assignments instead of the raw prompt.
    pub eval: bool,
}

pub trait Environment {
    fn terminal_width(&self) -> Result<usize, EnvError>;
    fn platform(&self) -> Platform;
    fn shell(&self) -> Shell;
    /// Raw shell name as reported by the caller, used in templates.
    fn shell_name(&self) -> &str;
    fn current_dir(&self) -> String;
    fn home_dir(&self) -> Option<String>;
    /// Running under the Windows Subsystem for Linux.
    fn is_wsl(&self) -> bool;
    fn run_command(&self, command: &str, args: &[&str]) -> Result<String, EnvError>;
    fn args(&self) -> &CliArgs;
    fn env_var(&self, key: &str) -> Option<String>;
    fn user_name(&self) -> String;
    fn host_name(&self) -> String;
}
