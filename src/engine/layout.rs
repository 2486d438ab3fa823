//! Block layout policy: width budgets, fill sizing and the right prompt gate.
//!
//! Everything here is pure arithmetic over visible widths so the rules can be
//! exercised without an engine.

use crate::ansi::AnsiUtils;
use crate::config::{Block, BlockKind};

/// Added to a connection's width budget to compensate for the cursor origin.
pub const FILL_WIDTH_CORRECTION: i64 = 3;

/// Minimum gap, in columns, between the left prompt and the right prompt.
pub const RPROMPT_BREATHING_ROOM: i64 = 30;

/// Running count of visible columns consumed on the current output line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineWidth {
    consumed: usize,
}

impl LineWidth {
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Account for a rendered, non-connection block.
    ///
    /// A block that starts a new line restarts the count; with a leading
    /// newline the block itself is not counted.
    pub fn account(&mut self, block: &Block, width: usize) {
        if block.kind == BlockKind::Connection {
            return;
        }
        if block.breaks_line() {
            self.consumed = 0;
            return;
        }
        self.consumed = self.consumed.saturating_add(width);
    }
}

/// Width budget of a connection block.
pub fn connection_width(terminal_width: usize, consumed: usize) -> i64 {
    terminal_width as i64 - consumed as i64 + FILL_WIDTH_CORRECTION
}

/// Repeat `unit` over exactly `width` visible columns.
///
/// Returns `None` when the budget is 1 or less, or the unit has no width.
pub fn fill(ansi: &AnsiUtils, unit: &str, width: i64) -> Option<String> {
    if width <= 1 {
        return None;
    }
    let unit_width = ansi.len_without_ansi(unit);
    if unit_width == 0 {
        return None;
    }
    let width = width as usize;
    let repetitions = width.div_ceil(unit_width);
    Some(ansi.truncate_to(&unit.repeat(repetitions), width))
}

/// Fit prompt text into an optional width budget.
///
/// Unbounded text is returned untouched; a finite budget `w` keeps `w - 1`
/// columns and budgets of 1 or less write nothing.
pub fn fit_prompt(ansi: &AnsiUtils, text: &str, max_width: Option<i64>) -> Option<String> {
    match max_width {
        None => Some(text.to_string()),
        Some(width) if width > 1 => Some(ansi.truncate_to(text, (width - 1) as usize)),
        Some(_) => None,
    }
}

/// Whether a right prompt fits beside a left prompt on the last visual line.
pub fn rprompt_fits(terminal_width: usize, prompt_width: usize, rprompt_width: usize) -> bool {
    if terminal_width == 0 {
        return true;
    }
    let terminal_width = terminal_width as i64;
    let prompt_width = prompt_width as i64;
    let mut available = terminal_width - prompt_width;
    if available < 0 {
        available = terminal_width - prompt_width % terminal_width;
    }
    available - rprompt_width as i64 >= RPROMPT_BREATHING_ROOM
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Alignment;
    use crate::segments::SegmentConfig;
    use crate::shell::Shell;
    use crate::width::display_width;

    fn plain() -> AnsiUtils {
        AnsiUtils::new(Shell::Plain)
    }

    #[test]
    fn connection_budget_uses_correction() {
        assert_eq!(connection_width(10, 3), 10);
        assert_eq!(connection_width(80, 20), 63);
        assert_eq!(connection_width(0, 5), -2);
    }

    #[test]
    fn fill_is_exact_width_of_whole_units() {
        let text = fill(&plain(), "-", 10).unwrap();
        assert_eq!(text, "-".repeat(10));

        let styled = fill(&plain(), "\x1b[32m=\x1b[0m", 7).unwrap();
        assert_eq!(display_width(&styled), 7);

        let pair = fill(&plain(), "ab", 6).unwrap();
        assert_eq!(pair, "ababab");
        let cut = fill(&plain(), "ab", 5).unwrap();
        assert_eq!(cut, "ababa");
    }

    #[test]
    fn fill_suppressed_for_tiny_budgets() {
        assert_eq!(fill(&plain(), "-", 1), None);
        assert_eq!(fill(&plain(), "-", -2), None);
        assert_eq!(fill(&plain(), "", 20), None);
    }

    #[test]
    fn prompt_truncates_to_budget_minus_one() {
        let ansi = plain();
        assert_eq!(fit_prompt(&ansi, "abcdef", None).unwrap(), "abcdef");
        assert_eq!(fit_prompt(&ansi, "abcdef", Some(4)).unwrap(), "abc");
        assert_eq!(fit_prompt(&ansi, "ab", Some(10)).unwrap(), "ab");
        assert_eq!(fit_prompt(&ansi, "ab", Some(1)), None);
        for width in 2..10 {
            let text = fit_prompt(&ansi, "\x1b[1mabcde\x1b[0m", Some(width)).unwrap();
            assert_eq!(display_width(&text), 5.min(width as usize - 1));
        }
    }

    #[test]
    fn gate_fails_open_without_width() {
        assert!(rprompt_fits(0, 500, 500));
    }

    #[test]
    fn gate_requires_breathing_room() {
        assert!(!rprompt_fits(50, 5, 40));
        assert!(rprompt_fits(80, 10, 40));
        assert!(!rprompt_fits(80, 11, 40));
    }

    #[test]
    fn gate_reasons_about_last_wrapped_line() {
        // 90 columns on an 80 wide terminal use 10 of the last line, leaving 70.
        assert!(rprompt_fits(80, 90, 40));
        assert!(!rprompt_fits(80, 150, 40));
    }

    #[test]
    fn line_width_resets_on_new_lines() {
        let mut line = LineWidth::default();
        let left = Block::prompt(Alignment::Left, vec![SegmentConfig::text("abc")]);
        line.account(&left, 3);
        line.account(&Block::new(BlockKind::Connection, Vec::new()), 50);
        assert_eq!(line.consumed(), 3);
        line.account(&left.clone().with_newline(true), 3);
        assert_eq!(line.consumed(), 0);
        line.account(&left, 4);
        assert_eq!(line.consumed(), 4);
        line.account(&Block::new(BlockKind::LineBreak, Vec::new()), 0);
        assert_eq!(line.consumed(), 0);
    }
}
