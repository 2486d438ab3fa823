use crate::shell::Shell;
use crate::width::{truncate_last_visible, truncate_to_width, visible_width};

use super::cursor;

/// Columns jumped forward to reach the end of the line before a right write.
pub const CARRIAGE_FORWARD_COLUMNS: usize = 1000;

const ZSH_MARKERS: &[&str] = &["%{", "%}"];
const BASH_MARKERS: &[&str] = &["\\[", "\\]"];

/// Escape sequence factory bound to one shell.
///
/// Sequences are wrapped in the shell's zero-width markers so line editors
/// do not count them toward the prompt length.
#[derive(Debug, Clone, Copy)]
pub struct AnsiUtils {
    shell: Shell,
    markers: &'static [&'static str],
}

impl AnsiUtils {
    pub fn new(shell: Shell) -> Self {
        let markers = match shell {
            Shell::Zsh => ZSH_MARKERS,
            Shell::Bash => BASH_MARKERS,
            Shell::Pwsh | Shell::PowerShell5 | Shell::Plain | Shell::Unknown => &[],
        };
        Self { shell, markers }
    }

    pub fn shell(&self) -> Shell {
        self.shell
    }

    pub(crate) fn wrap(&self, sequence: &str) -> String {
        if sequence.is_empty() {
            return String::new();
        }
        match self.shell.escape_wrappers() {
            Some((left, right)) => format!("{left}{sequence}{right}"),
            None => sequence.to_string(),
        }
    }

    /// Visible width, ignoring escapes and this shell's markers.
    pub fn len_without_ansi(&self, text: &str) -> usize {
        visible_width(text, self.markers)
    }

    pub fn truncate_to(&self, text: &str, width: usize) -> String {
        truncate_to_width(text, width, self.markers)
    }

    /// Drop the last `count` visible columns of `text`.
    pub fn truncate_by(&self, text: &str, count: usize) -> String {
        truncate_last_visible(text, count, self.markers)
    }

    pub fn carriage_forward(&self) -> String {
        self.wrap(&cursor::move_right(CARRIAGE_FORWARD_COLUMNS))
    }

    /// Move back from the line end so `text` ends `offset` columns early.
    pub fn cursor_for_right_write(&self, text: &str, horizontal_offset: i32) -> String {
        let width = self.len_without_ansi(text) as i64 - i64::from(horizontal_offset);
        self.wrap(&cursor::move_left(width.max(0) as usize))
    }

    pub fn change_line(&self, offset: i32) -> String {
        let lines = offset.unsigned_abs() as usize;
        if offset < 0 {
            self.wrap(&cursor::move_up_lines(lines))
        } else {
            self.wrap(&cursor::move_down(lines))
        }
    }

    pub fn console_pwd(&self, pwd: &str) -> String {
        let mut path = pwd.to_string();
        if path.ends_with(':') {
            path.push('\\');
        }
        // Bash would read a bare backslash as a prompt escape.
        let terminator = match self.shell {
            Shell::Bash => "\x1b\\\\",
            _ => "\x1b\\",
        };
        self.wrap(&cursor::working_directory(&path, terminator))
    }

    pub fn clear_after(&self) -> String {
        self.wrap(cursor::clear_to_line_end())
    }

    pub fn save_cursor(&self) -> String {
        self.wrap(cursor::save_position())
    }

    pub fn restore_cursor(&self) -> String {
        self.wrap(cursor::restore_position())
    }

    pub fn reset(&self) -> String {
        self.wrap(cursor::reset_style())
    }

    pub fn title(&self, text: &str) -> String {
        self.wrap(&cursor::set_title(text))
    }

    /// Wrap a deferred right prompt in the shell's prompt variable syntax.
    pub fn format_rprompt(&self, text: &str) -> String {
        match self.shell {
            Shell::Bash => format!("\\[{text}\\]"),
            Shell::Zsh | Shell::Pwsh | Shell::PowerShell5 | Shell::Plain | Shell::Unknown => {
                text.to_string()
            }
        }
    }
}
