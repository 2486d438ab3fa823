//! Console (window) title support.

use serde::Deserialize;

use crate::ansi::AnsiUtils;
use crate::env::Environment;
use crate::template::{display_path, folder_name, render_template};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleTitleStyle {
    #[default]
    Folder,
    FullPath,
    Template,
}

pub struct ConsoleTitle<'a> {
    env: &'a dyn Environment,
    ansi: AnsiUtils,
    style: ConsoleTitleStyle,
    template: &'a str,
}

impl<'a> ConsoleTitle<'a> {
    pub fn new(
        env: &'a dyn Environment,
        ansi: AnsiUtils,
        style: ConsoleTitleStyle,
        template: &'a str,
    ) -> Self {
        Self {
            env,
            ansi,
            style,
            template,
        }
    }

    /// Plain title text.
    pub fn template_text(&self) -> String {
        match self.style {
            ConsoleTitleStyle::Folder => folder_name(self.env),
            ConsoleTitleStyle::FullPath => display_path(self.env),
            ConsoleTitleStyle::Template => render_template(self.template, self.env),
        }
    }

    /// Title text inside the shell's OSC 0 sequence.
    pub fn title_escape(&self) -> String {
        self.ansi.title(&self.template_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StaticEnvironment;
    use crate::shell::Shell;

    #[test]
    fn styles_pick_title_text() {
        let env = StaticEnvironment::new(Shell::Plain).with_cwd("/home/user/work");
        let ansi = AnsiUtils::new(Shell::Plain);
        let folder = ConsoleTitle::new(&env, ansi, ConsoleTitleStyle::Folder, "");
        assert_eq!(folder.template_text(), "work");
        let full = ConsoleTitle::new(&env, ansi, ConsoleTitleStyle::FullPath, "");
        assert_eq!(full.template_text(), "~/work");
        let custom = ConsoleTitle::new(&env, ansi, ConsoleTitleStyle::Template, "{{ .User }}@{{ .Host }}");
        assert_eq!(custom.title_escape(), "\x1b]0;user@host\x07");
    }

    #[test]
    fn zsh_title_is_wrapped() {
        let env = StaticEnvironment::new(Shell::Zsh).with_cwd("/tmp");
        let title = ConsoleTitle::new(&env, AnsiUtils::new(Shell::Zsh), ConsoleTitleStyle::Folder, "");
        assert_eq!(title.title_escape(), "%{\x1b]0;tmp\x07%}");
    }
}
