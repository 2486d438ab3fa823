//! Prompt configuration.
//!
//! Configuration is read from JSON and never written back. Block order in
//! the file is the render order.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::console_title::ConsoleTitleStyle;
use crate::error::{PromptError, Result};
use crate::segments::SegmentConfig;

/// Environment variable consulted when no config path is passed.
pub const CONFIG_ENV_VAR: &str = "PROMPTLINE_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub blocks: Vec<Block>,
    pub console_title: bool,
    pub console_title_style: ConsoleTitleStyle,
    pub console_title_template: String,
    pub final_space: bool,
    /// Report the working directory to the terminal after the prompt.
    pub osc99: bool,
    pub transient_prompt: Option<TransientPrompt>,
    pub tooltips: Vec<SegmentConfig>,
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| PromptError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Load from `path`, or from `$PROMPTLINE_CONFIG` when no path is given.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let path = std::env::var_os(CONFIG_ENV_VAR).ok_or(PromptError::MissingConfig)?;
                Self::load(path)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    #[default]
    Prompt,
    #[serde(rename = "rprompt")]
    RightPrompt,
    Connection,
    /// Deprecated standalone line break; prefer `newline` on the next block.
    #[serde(rename = "newline")]
    LineBreak,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub alignment: Alignment,
    /// Start a new line before rendering this block.
    pub newline: bool,
    pub vertical_offset: i32,
    pub horizontal_offset: i32,
    pub segments: Vec<SegmentConfig>,
}

impl Block {
    pub fn new(kind: BlockKind, segments: Vec<SegmentConfig>) -> Self {
        Self {
            kind,
            segments,
            ..Self::default()
        }
    }

    pub fn prompt(alignment: Alignment, segments: Vec<SegmentConfig>) -> Self {
        Self {
            alignment,
            ..Self::new(BlockKind::Prompt, segments)
        }
    }

    pub fn with_newline(mut self, newline: bool) -> Self {
        self.newline = newline;
        self
    }

    pub fn with_offsets(mut self, vertical: i32, horizontal: i32) -> Self {
        self.vertical_offset = vertical;
        self.horizontal_offset = horizontal;
        self
    }

    /// Starts a new output line (leading newline or deprecated line break).
    pub fn breaks_line(&self) -> bool {
        self.newline || self.kind == BlockKind::LineBreak
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransientPrompt {
    pub template: String,
    pub foreground: String,
    pub background: String,
}
