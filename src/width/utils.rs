//! Terminal display width helpers.
//!
//! Provides ANSI-aware width calculation and truncation for rendered prompt
//! text. Escape sequences and shell zero-width markers (such as zsh's `%{`
//! and `%}`) never count toward the visible width and always survive
//! truncation, so styles opened before a cut are still closed after it.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    UnicodeWidthStr::width(&*clean_str)
}

/// Display width ignoring both ANSI escapes and the given zero-width markers.
pub fn visible_width(text: &str, markers: &[&str]) -> usize {
    if markers.is_empty() {
        return display_width(text);
    }
    let mut clean = text.to_string();
    for marker in markers.iter().filter(|m| !m.is_empty()) {
        clean = clean.replace(marker, "");
    }
    display_width(&clean)
}

/// Keep at most `width` visible columns of `text`.
///
/// Invisible tokens after the cut are preserved; a wide character that would
/// straddle the limit is dropped.
pub fn truncate_to_width(text: &str, width: usize, markers: &[&str]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut used = 0usize;
    let mut exhausted = false;
    for token in tokenize(text, markers) {
        match token {
            Token::Invisible(raw) => out.push_str(raw),
            Token::Visible(raw, cols) => {
                if exhausted {
                    continue;
                }
                if used + cols > width {
                    exhausted = true;
                    continue;
                }
                used += cols;
                out.push_str(raw);
            }
        }
    }
    out
}

/// Remove the last `count` visible columns of `text`, keeping every escape.
pub fn truncate_last_visible(text: &str, count: usize, markers: &[&str]) -> String {
    if count == 0 {
        return text.to_string();
    }
    let tokens = tokenize(text, markers);
    let mut keep = vec![true; tokens.len()];
    let mut removed = 0usize;
    for (idx, token) in tokens.iter().enumerate().rev() {
        if removed >= count {
            break;
        }
        if let Token::Visible(_, cols) = token {
            keep[idx] = false;
            removed += cols;
        }
    }
    tokens
        .iter()
        .zip(keep)
        .filter(|(_, keep)| *keep)
        .map(|(token, _)| token.raw())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Invisible(&'a str),
    Visible(&'a str, usize),
}

impl<'a> Token<'a> {
    fn raw(&self) -> &'a str {
        match self {
            Token::Invisible(raw) | Token::Visible(raw, _) => raw,
        }
    }
}

fn tokenize<'a>(text: &'a str, markers: &[&str]) -> Vec<Token<'a>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut idx = 0usize;

    'scan: while idx < bytes.len() {
        if bytes[idx] == ESC {
            let end = escape_end(bytes, idx);
            tokens.push(Token::Invisible(&text[idx..end]));
            idx = end;
            continue;
        }

        for marker in markers.iter().filter(|m| !m.is_empty()) {
            if text[idx..].starts_with(marker) {
                let end = idx + marker.len();
                tokens.push(Token::Invisible(&text[idx..end]));
                idx = end;
                continue 'scan;
            }
        }

        let Some(ch) = text[idx..].chars().next() else {
            break;
        };
        let end = idx + ch.len_utf8();
        let cols = UnicodeWidthChar::width(ch).unwrap_or(0);
        tokens.push(Token::Visible(&text[idx..end], cols));
        idx = end;
    }

    tokens
}

/// Byte index one past the escape sequence starting at `start`.
fn escape_end(bytes: &[u8], start: usize) -> usize {
    let Some(&kind) = bytes.get(start + 1) else {
        return bytes.len();
    };
    match kind {
        b'[' => {
            let mut idx = start + 2;
            while idx < bytes.len() {
                if (0x40..=0x7e).contains(&bytes[idx]) {
                    return idx + 1;
                }
                idx += 1;
            }
            bytes.len()
        }
        b']' => {
            let mut idx = start + 2;
            while idx < bytes.len() {
                if bytes[idx] == BEL {
                    return idx + 1;
                }
                if bytes[idx] == ESC && bytes.get(idx + 1) == Some(&b'\\') {
                    return idx + 2;
                }
                idx += 1;
            }
            bytes.len()
        }
        // nF sequences such as ESC ( B: intermediates, then one final byte.
        0x20..=0x2f => {
            let mut idx = start + 2;
            while idx < bytes.len() && (0x20..=0x2f).contains(&bytes[idx]) {
                idx += 1;
            }
            match bytes.get(idx) {
                Some(final_byte) if (0x30..=0x7e).contains(final_byte) => idx + 1,
                _ => idx,
            }
        }
        // ESC 7, ESC 8 and friends; never split a UTF-8 char.
        _ if kind.is_ascii() => start + 2,
        _ => start + 1,
    }
}
