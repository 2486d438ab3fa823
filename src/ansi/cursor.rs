//! Terminal cursor utility helpers for composing ANSI sequences.
//!
//! These helpers return the raw sequences; shell specific wrapping is applied
//! by [`AnsiUtils`](super::AnsiUtils).

const CSI: &str = "\x1b[";

/// Move the cursor right by `cols` columns.
pub fn move_right(cols: usize) -> String {
    if cols == 0 {
        String::new()
    } else {
        format!("{CSI}{cols}C")
    }
}

/// Move the cursor left by `cols` columns.
pub fn move_left(cols: usize) -> String {
    if cols == 0 {
        String::new()
    } else {
        format!("{CSI}{cols}D")
    }
}

/// Move the cursor down `lines`, keeping the current column.
pub fn move_down(lines: usize) -> String {
    if lines == 0 {
        String::new()
    } else {
        format!("{CSI}{lines}B")
    }
}

/// Move the cursor up `lines`, placing it at column 1 of the destination row.
pub fn move_up_lines(lines: usize) -> String {
    if lines == 0 {
        String::new()
    } else {
        format!("{CSI}{lines}F")
    }
}

/// Save the current cursor position (DEC variant, understood by conhost).
pub fn save_position() -> &'static str {
    "\x1b7"
}

/// Restore the most recently saved cursor position.
pub fn restore_position() -> &'static str {
    "\x1b8"
}

/// Clear from the cursor to the end of the line.
pub fn clear_to_line_end() -> &'static str {
    "\x1b[K"
}

/// Reset every style attribute.
pub fn reset_style() -> &'static str {
    "\x1b[0m"
}

/// Set the terminal window title.
pub fn set_title(title: &str) -> String {
    format!("\x1b]0;{title}\x07")
}

/// Report the working directory to the terminal (OSC 9;9).
pub fn working_directory(path: &str, terminator: &str) -> String {
    format!("\x1b]9;9;\"{path}\"{terminator}")
}
