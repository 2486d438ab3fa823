use crate::ansi::PlainWriter;
use crate::block::render_block;
use crate::config::{Alignment, Block};
use crate::logging::{LogLevel, json_kv};
use crate::shell::Shell;

use super::Engine;

impl Engine<'_> {
    /// Render the tooltip triggered by the command typed so far.
    ///
    /// The last matching tooltip wins. No match, a tooltip that fails to
    /// resolve or one that is disabled all render nothing.
    pub fn render_tooltip(mut self, tip: &str) -> String {
        let tip = tip.trim_matches(' ');
        let config = self.config;
        let Some(tooltip) = config.tooltips.iter().rev().find(|t| t.invoked_by(tip)) else {
            return String::new();
        };

        let mut segment = match tooltip.resolve(self.env) {
            Ok(segment) => segment,
            Err(err) => {
                self.log(
                    LogLevel::Debug,
                    "tooltip_unresolved",
                    [json_kv("reason", err.to_string())],
                );
                return String::new();
            }
        };
        if !segment.enabled() {
            return String::new();
        }

        let block = Block::prompt(Alignment::Right, vec![tooltip.clone()]);
        match self.shell() {
            Shell::Zsh => render_block(&block, self.env, self.writer.as_mut()).text,
            Shell::Pwsh | Shell::PowerShell5 => {
                let text = render_block(&block, self.env, &mut PlainWriter::new()).text;
                let clear = self.ansi.clear_after();
                let forward = self.ansi.carriage_forward();
                let position = self.ansi.cursor_for_right_write(&text, 0);
                self.write(&clear);
                self.write(&forward);
                self.write(&position);
                self.write(&text);
                std::mem::take(&mut self.console)
            }
            Shell::Bash | Shell::Plain | Shell::Unknown => String::new(),
        }
    }
}
