use std::path::PathBuf;
use std::process::Command;

use crossterm::terminal;

use crate::shell::Shell;

use super::{CliArgs, EnvError, Environment, Platform};

/// Production environment backed by the real terminal and process table.
#[derive(Debug, Clone)]
pub struct SystemEnvironment {
    shell_name: String,
    shell: Shell,
    working_dir: Option<PathBuf>,
    args: CliArgs,
}

impl SystemEnvironment {
    pub fn new(shell_name: impl Into<String>, args: CliArgs) -> Self {
        let shell_name = shell_name.into();
        let shell = shell_name.parse().unwrap_or(Shell::Unknown);
        Self {
            shell_name,
            shell,
            working_dir: None,
            args,
        }
    }

    /// Override the working directory reported to segments (`--pwd`).
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl Environment for SystemEnvironment {
    fn terminal_width(&self) -> Result<usize, EnvError> {
        match terminal::size() {
            Ok((width, _)) if width > 0 => Ok(usize::from(width)),
            Ok(_) => columns_from_env(),
            Err(err) => columns_from_env().map_err(|_| EnvError::TerminalWidth(err.to_string())),
        }
    }

    fn platform(&self) -> Platform {
        Platform::current()
    }

    fn shell(&self) -> Shell {
        self.shell
    }

    fn shell_name(&self) -> &str {
        &self.shell_name
    }

    fn current_dir(&self) -> String {
        self.working_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .map(|dir| dir.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn home_dir(&self) -> Option<String> {
        self.env_var("HOME").or_else(|| self.env_var("USERPROFILE"))
    }

    fn is_wsl(&self) -> bool {
        self.platform() == Platform::Linux && self.env_var("WSL_DISTRO_NAME").is_some()
    }

    fn run_command(&self, command: &str, args: &[&str]) -> Result<String, EnvError> {
        let output = Command::new(command)
            .args(args)
            .output()
            .map_err(|err| EnvError::Command {
                command: command.to_string(),
                reason: err.to_string(),
            })?;
        if !output.status.success() {
            return Err(EnvError::Command {
                command: command.to_string(),
                reason: format!("exited with {}", output.status),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn args(&self) -> &CliArgs {
        &self.args
    }

    fn env_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|value| !value.is_empty())
    }

    fn user_name(&self) -> String {
        self.env_var("USER")
            .or_else(|| self.env_var("USERNAME"))
            .unwrap_or_default()
    }

    fn host_name(&self) -> String {
        self.env_var("HOSTNAME")
            .or_else(|| self.env_var("COMPUTERNAME"))
            .or_else(|| self.run_command("hostname", &[]).ok())
            .unwrap_or_default()
    }
}

fn columns_from_env() -> Result<usize, EnvError> {
    let raw = std::env::var("COLUMNS")
        .map_err(|_| EnvError::TerminalWidth("COLUMNS is not set".to_string()))?;
    raw.trim()
        .parse()
        .map_err(|_| EnvError::TerminalWidth(format!("COLUMNS is not a number: {raw}")))
}
