use crossterm::style::{Color, Colored};

use super::AnsiUtils;

/// Port used by blocks to style segment text.
pub trait ColorWriter {
    /// Append `text` painted with the given background and foreground.
    fn write(&mut self, background: &str, foreground: &str, text: &str);

    /// Return the accumulated output and clear the buffer.
    fn take(&mut self) -> String;
}

/// Writes SGR sequences wrapped for the active shell.
#[derive(Debug, Clone)]
pub struct AnsiColorWriter {
    ansi: AnsiUtils,
    buffer: String,
}

impl AnsiColorWriter {
    pub fn new(ansi: AnsiUtils) -> Self {
        Self {
            ansi,
            buffer: String::new(),
        }
    }
}

impl ColorWriter for AnsiColorWriter {
    fn write(&mut self, background: &str, foreground: &str, text: &str) {
        if text.is_empty() {
            return;
        }

        let mut sequence = String::new();
        if let Some(color) = parse_color(background) {
            sequence.push_str(&format!("\x1b[{}m", Colored::BackgroundColor(color)));
        }
        if let Some(color) = parse_color(foreground) {
            sequence.push_str(&format!("\x1b[{}m", Colored::ForegroundColor(color)));
        }

        if sequence.is_empty() {
            self.buffer.push_str(text);
            return;
        }

        self.buffer.push_str(&self.ansi.wrap(&sequence));
        self.buffer.push_str(text);
        self.buffer.push_str(&self.ansi.reset());
    }

    fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}

/// Ignores colors entirely; used where the shell cannot measure styled text.
#[derive(Debug, Clone, Default)]
pub struct PlainWriter {
    buffer: String,
}

impl PlainWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ColorWriter for PlainWriter {
    fn write(&mut self, _background: &str, _foreground: &str, text: &str) {
        self.buffer.push_str(text);
    }

    fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}

/// Parse `#rrggbb`, a crossterm color name, or `transparent`/empty as none.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("transparent") {
        return None;
    }

    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        return Some(Color::Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        });
    }

    Color::try_from(value.to_ascii_lowercase().as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::Shell;

    #[test]
    fn hex_colors_become_truecolor() {
        assert_eq!(
            parse_color("#ff8000"),
            Some(Color::Rgb {
                r: 255,
                g: 128,
                b: 0
            })
        );
        assert_eq!(parse_color("#ff80"), None);
        assert_eq!(parse_color("transparent"), None);
    }

    #[test]
    fn named_colors_resolve() {
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("Blue"), Some(Color::Blue));
    }

    #[test]
    fn plain_shell_writes_raw_sequences() {
        let mut writer = AnsiColorWriter::new(AnsiUtils::new(Shell::Plain));
        writer.write("", "#ff0000", "hi");
        assert_eq!(writer.take(), "\x1b[38;2;255;0;0mhi\x1b[0m");
        assert_eq!(writer.take(), "");
    }

    #[test]
    fn zsh_wraps_sequences() {
        let mut writer = AnsiColorWriter::new(AnsiUtils::new(Shell::Zsh));
        writer.write("#000000", "#ffffff", "x");
        assert_eq!(
            writer.take(),
            "%{\x1b[48;2;0;0;0m\x1b[38;2;255;255;255m%}x%{\x1b[0m%}"
        );
    }

    #[test]
    fn uncolored_text_is_written_verbatim() {
        let mut writer = AnsiColorWriter::new(AnsiUtils::new(Shell::Bash));
        writer.write("transparent", "", "plain");
        assert_eq!(writer.take(), "plain");
    }

    #[test]
    fn plain_writer_drops_colors() {
        let mut writer = PlainWriter::new();
        writer.write("#123456", "red", "a");
        writer.write("", "", "b");
        assert_eq!(writer.take(), "ab");
    }
}
