use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

use crate::config::Config;
use crate::engine::Engine;
use crate::env::Environment;
use crate::error::PromptError;
use crate::logging::{FileSink, LOG_ENV_VAR, Logger, LoggingError};

/// Log files are truncated once they grow past this size.
pub const LOG_FILE_MAX_BYTES: u64 = 1024 * 1024;

pub type DriverResult<T> = std::result::Result<T, CliDriverError>;

#[derive(Debug, Error)]
pub enum CliDriverError {
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error("log sink error: {0}")]
    Logging(#[from] LoggingError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Which prompt the shell asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderMode {
    Primary,
    Debug,
    Tooltip(String),
    Transient,
}

/// Owns the configuration and environment for one CLI invocation and writes
/// the requested prompt to an output handle.
pub struct CliDriver {
    config: Config,
    env: Box<dyn Environment>,
    logger: Option<Logger>,
}

impl CliDriver {
    pub fn new(config: Config, env: Box<dyn Environment>) -> Self {
        Self {
            config,
            env,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Option<Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Open a file logger from `path`, or from `$PROMPTLINE_LOG` when unset.
    pub fn file_logger(path: Option<&Path>) -> DriverResult<Option<Logger>> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match std::env::var_os(LOG_ENV_VAR) {
                Some(path) => path.into(),
                None => return Ok(None),
            },
        };
        let sink = FileSink::new(path, LOG_FILE_MAX_BYTES)?;
        Ok(Some(Logger::new(sink)))
    }

    pub fn render(&self, mode: &RenderMode) -> String {
        let mut engine = Engine::for_env(&self.config, self.env.as_ref());
        if let Some(logger) = self.logger.clone() {
            engine = engine.with_logger(logger);
        }
        match mode {
            RenderMode::Primary => engine.render(),
            RenderMode::Debug => engine.debug(),
            RenderMode::Tooltip(tip) => engine.render_tooltip(tip),
            RenderMode::Transient => engine.render_transient(),
        }
    }

    pub fn run(&self, mode: &RenderMode, out: &mut impl Write) -> DriverResult<()> {
        let prompt = self.render(mode);
        out.write_all(prompt.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
