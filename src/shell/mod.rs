//! Host shell identity.
//!
//! Every per-shell quirk lives on [`Shell`] so the engine can dispatch with an
//! exhaustive `match` instead of comparing shell names at each call site.

use std::fmt;
use std::str::FromStr;

/// Shells the engine knows how to encode a prompt for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shell {
    Zsh,
    Bash,
    Pwsh,
    PowerShell5,
    /// No shell integration, raw escapes only.
    Plain,
    Unknown,
}

impl Shell {
    pub fn name(&self) -> &'static str {
        match self {
            Shell::Zsh => "zsh",
            Shell::Bash => "bash",
            Shell::Pwsh => "pwsh",
            Shell::PowerShell5 => "powershell",
            Shell::Plain => "plain",
            Shell::Unknown => "shell",
        }
    }

    /// Zero-width markers wrapped around every escape sequence.
    pub fn escape_wrappers(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Shell::Zsh => Some(("%{", "%}")),
            Shell::Bash => Some(("\\[", "\\]")),
            Shell::Pwsh | Shell::PowerShell5 | Shell::Plain | Shell::Unknown => None,
        }
    }

    /// PowerShell leaks the background color of the prompt into the next line
    /// unless the rest of the line is cleared after each block.
    pub fn needs_clear_line(&self) -> bool {
        matches!(self, Shell::Pwsh | Shell::PowerShell5)
    }

    /// Whether final assembly positions the right prompt with cursor escapes.
    pub fn places_rprompt(&self) -> bool {
        matches!(
            self,
            Shell::Pwsh | Shell::PowerShell5 | Shell::Bash | Shell::Plain
        )
    }

    /// Bash cannot measure colored text inside its prompt, so the right
    /// prompt is rendered without styles.
    pub fn plain_rprompt(&self) -> bool {
        matches!(self, Shell::Bash)
    }

    /// Escape text for a double-quoted zsh variable assignment.
    pub fn quote(&self, text: &str) -> String {
        text.replace('"', "\"\"")
    }
}

impl FromStr for Shell {
    type Err = std::convert::Infallible;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let shell = match name.trim().to_ascii_lowercase().as_str() {
            "zsh" => Shell::Zsh,
            "bash" => Shell::Bash,
            "pwsh" => Shell::Pwsh,
            "powershell" | "powershell5" => Shell::PowerShell5,
            "plain" => Shell::Plain,
            _ => Shell::Unknown,
        };
        Ok(shell)
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
