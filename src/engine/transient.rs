use crate::shell::Shell;
use crate::template::{DEFAULT_TRANSIENT_TEMPLATE, render_template};

use super::Engine;

impl Engine<'_> {
    /// Render the minimal prompt shown in place of a submitted one.
    pub fn render_transient(mut self) -> String {
        let Some(transient) = self.config.transient_prompt.as_ref() else {
            return String::new();
        };
        let template = if transient.template.is_empty() {
            DEFAULT_TRANSIENT_TEMPLATE
        } else {
            transient.template.as_str()
        };

        let prompt = render_template(template, self.env);
        self.writer
            .write(&transient.background, &transient.foreground, &prompt);
        let styled = self.writer.take();

        let shell = self.shell();
        match shell {
            Shell::Zsh => format!("PS1=\"{}\"\nRPROMPT=\"\"", shell.quote(&styled)),
            Shell::Bash | Shell::Pwsh | Shell::PowerShell5 | Shell::Plain | Shell::Unknown => {
                styled
            }
        }
    }
}
