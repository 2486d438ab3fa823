use crate::env::Environment;
use crate::template::{display_path, folder_name, render_template};

use super::Segment;

/// Static or templated text.
pub struct TextSegment<'a> {
    env: &'a dyn Environment,
    template: String,
    value: String,
}

impl<'a> TextSegment<'a> {
    pub fn new(env: &'a dyn Environment, template: &str) -> Self {
        Self {
            env,
            template: template.to_string(),
            value: String::new(),
        }
    }
}

impl Segment for TextSegment<'_> {
    fn name(&self) -> &str {
        "text"
    }

    fn enabled(&mut self) -> bool {
        self.value = render_template(&self.template, self.env);
        !self.value.is_empty()
    }

    fn text(&self) -> String {
        self.value.clone()
    }
}

/// Current working directory.
pub struct PathSegment<'a> {
    env: &'a dyn Environment,
    folder_only: bool,
    value: String,
}

impl<'a> PathSegment<'a> {
    /// `style` is `full` (home abbreviated) or `folder`.
    pub fn new(env: &'a dyn Environment, style: &str) -> Self {
        Self {
            env,
            folder_only: style == "folder",
            value: String::new(),
        }
    }
}

impl Segment for PathSegment<'_> {
    fn name(&self) -> &str {
        "path"
    }

    fn enabled(&mut self) -> bool {
        self.value = if self.folder_only {
            folder_name(self.env)
        } else {
            display_path(self.env)
        };
        !self.value.is_empty()
    }

    fn text(&self) -> String {
        self.value.clone()
    }
}

pub struct ShellSegment<'a> {
    env: &'a dyn Environment,
}

impl<'a> ShellSegment<'a> {
    pub fn new(env: &'a dyn Environment) -> Self {
        Self { env }
    }
}

impl Segment for ShellSegment<'_> {
    fn name(&self) -> &str {
        "shell"
    }

    fn enabled(&mut self) -> bool {
        true
    }

    fn text(&self) -> String {
        self.env.shell_name().to_string()
    }
}

/// `user@host`.
pub struct SessionSegment<'a> {
    env: &'a dyn Environment,
    user: String,
    host: String,
}

impl<'a> SessionSegment<'a> {
    pub fn new(env: &'a dyn Environment) -> Self {
        Self {
            env,
            user: String::new(),
            host: String::new(),
        }
    }
}

impl Segment for SessionSegment<'_> {
    fn name(&self) -> &str {
        "session"
    }

    fn enabled(&mut self) -> bool {
        self.user = self.env.user_name();
        self.host = self.env.host_name();
        !self.user.is_empty()
    }

    fn text(&self) -> String {
        if self.host.is_empty() {
            self.user.clone()
        } else {
            format!("{}@{}", self.user, self.host)
        }
    }
}

/// Value of an environment variable; disabled when unset.
pub struct EnvVarSegment<'a> {
    env: &'a dyn Environment,
    var_name: String,
    value: Option<String>,
}

impl<'a> EnvVarSegment<'a> {
    pub fn new(env: &'a dyn Environment, var_name: &str) -> Self {
        Self {
            env,
            var_name: var_name.to_string(),
            value: None,
        }
    }
}

impl Segment for EnvVarSegment<'_> {
    fn name(&self) -> &str {
        "envvar"
    }

    fn enabled(&mut self) -> bool {
        self.value = self.env.env_var(&self.var_name);
        self.value.is_some()
    }

    fn text(&self) -> String {
        self.value.clone().unwrap_or_default()
    }
}
