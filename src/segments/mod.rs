//! Segment capability and configuration.
//!
//! A segment is resolved from its [`SegmentConfig`] against the environment,
//! asked whether it is enabled, then asked for its text. Styling is applied
//! by the block renderer, never by the segment itself.

mod builtin;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::env::Environment;

pub use builtin::{EnvVarSegment, PathSegment, SessionSegment, ShellSegment, TextSegment};

#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("unknown segment type `{0}`")]
    UnknownType(String),
    #[error("segment `{segment}` is missing property `{property}`")]
    MissingProperty {
        segment: &'static str,
        property: &'static str,
    },
}

pub trait Segment {
    fn name(&self) -> &str;

    /// Resolve whether the segment renders. Called once, before `text`.
    fn enabled(&mut self) -> bool;

    fn text(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentStyle {
    #[default]
    Plain,
    Powerline,
    Diamond,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub style: SegmentStyle,
    pub foreground: String,
    pub background: String,
    pub powerline_symbol: String,
    pub leading_diamond: String,
    pub trailing_diamond: String,
    pub properties: Map<String, Value>,
    /// Commands that trigger this segment as a tooltip.
    pub tips: Vec<String>,
}

impl SegmentConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// A `text` segment showing `text` verbatim.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new("text").with_property("text", Value::String(text.into()))
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn with_style(mut self, style: SegmentStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_colors(mut self, foreground: impl Into<String>, background: impl Into<String>) -> Self {
        self.foreground = foreground.into();
        self.background = background.into();
        self
    }

    pub fn with_powerline_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.powerline_symbol = symbol.into();
        self
    }

    pub fn with_diamonds(mut self, leading: impl Into<String>, trailing: impl Into<String>) -> Self {
        self.leading_diamond = leading.into();
        self.trailing_diamond = trailing.into();
        self
    }

    pub fn with_tips<I, S>(mut self, tips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tips = tips.into_iter().map(Into::into).collect();
        self
    }

    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    pub fn invoked_by(&self, tip: &str) -> bool {
        self.tips.iter().any(|candidate| candidate == tip)
    }

    pub fn resolve<'a>(
        &self,
        env: &'a dyn Environment,
    ) -> Result<Box<dyn Segment + 'a>, SegmentError> {
        let segment: Box<dyn Segment + 'a> = match self.kind.as_str() {
            "text" => Box::new(TextSegment::new(
                env,
                self.property_str("text").unwrap_or_default(),
            )),
            "path" => Box::new(PathSegment::new(
                env,
                self.property_str("style").unwrap_or("full"),
            )),
            "shell" => Box::new(ShellSegment::new(env)),
            "session" => Box::new(SessionSegment::new(env)),
            "envvar" => {
                let var = self
                    .property_str("var_name")
                    .ok_or(SegmentError::MissingProperty {
                        segment: "envvar",
                        property: "var_name",
                    })?;
                Box::new(EnvVarSegment::new(env, var))
            }
            other => return Err(SegmentError::UnknownType(other.to_string())),
        };
        Ok(segment)
    }
}
