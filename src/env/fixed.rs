use std::collections::HashMap;

use crate::shell::Shell;

use super::{CliArgs, EnvError, Environment, Platform};

/// Environment with fixed answers, configured builder style.
///
/// `terminal_width` fails when no width was set, mirroring a platform where
/// the probe is unavailable.
#[derive(Debug, Clone)]
pub struct StaticEnvironment {
    width: Option<usize>,
    platform: Platform,
    shell: Shell,
    shell_name: String,
    cwd: String,
    home: Option<String>,
    wsl: bool,
    args: CliArgs,
    vars: HashMap<String, String>,
    commands: HashMap<String, String>,
    user: String,
    host: String,
}

impl StaticEnvironment {
    pub fn new(shell: Shell) -> Self {
        Self {
            width: None,
            platform: Platform::Linux,
            shell,
            shell_name: shell.name().to_string(),
            cwd: "/home/user".to_string(),
            home: Some("/home/user".to_string()),
            wsl: false,
            args: CliArgs::default(),
            vars: HashMap::new(),
            commands: HashMap::new(),
            user: "user".to_string(),
            host: "host".to_string(),
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_shell_name(mut self, name: impl Into<String>) -> Self {
        self.shell_name = name.into();
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn with_home(mut self, home: Option<&str>) -> Self {
        self.home = home.map(str::to_string);
        self
    }

    pub fn with_wsl(mut self, wsl: bool) -> Self {
        self.wsl = wsl;
        self
    }

    pub fn with_eval(mut self, eval: bool) -> Self {
        self.args.eval = eval;
        self
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Canned stdout for `command` (program name and args joined by spaces).
    pub fn with_command_output(
        mut self,
        command: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        self.commands.insert(command.into(), output.into());
        self
    }

    pub fn with_user(mut self, user: impl Into<String>, host: impl Into<String>) -> Self {
        self.user = user.into();
        self.host = host.into();
        self
    }
}

impl Environment for StaticEnvironment {
    fn terminal_width(&self) -> Result<usize, EnvError> {
        self.width
            .ok_or_else(|| EnvError::TerminalWidth("no width configured".to_string()))
    }

    fn platform(&self) -> Platform {
        self.platform
    }

    fn shell(&self) -> Shell {
        self.shell
    }

    fn shell_name(&self) -> &str {
        &self.shell_name
    }

    fn current_dir(&self) -> String {
        self.cwd.clone()
    }

    fn home_dir(&self) -> Option<String> {
        self.home.clone()
    }

    fn is_wsl(&self) -> bool {
        self.wsl && self.platform == Platform::Linux
    }

    fn run_command(&self, command: &str, args: &[&str]) -> Result<String, EnvError> {
        let key = std::iter::once(command)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.commands
            .get(&key)
            .cloned()
            .ok_or_else(|| EnvError::Command {
                command: key,
                reason: "no canned output".to_string(),
            })
    }

    fn args(&self) -> &CliArgs {
        &self.args
    }

    fn env_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn user_name(&self) -> String {
        self.user.clone()
    }

    fn host_name(&self) -> String {
        self.host.clone()
    }
}
