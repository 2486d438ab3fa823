//! Prompt engine.
//!
//! One [`Engine`] value renders exactly one prompt: it walks the configured
//! blocks in order, accumulates the console buffer and the deferred right
//! prompt, then assembles the shell specific output. Every render method
//! consumes the engine, so state never leaks between invocations.

use std::time::Instant;

use serde_json::json;

use crate::ansi::{AnsiColorWriter, AnsiUtils, ColorWriter, PlainWriter};
use crate::block::{RenderedBlock, render_block};
use crate::config::{Alignment, Block, BlockKind, Config};
use crate::console_title::ConsoleTitle;
use crate::env::Environment;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::{RenderMetrics, RightPromptOutcome};
use crate::shell::Shell;

pub mod debug;
pub mod layout;
mod tooltip;
mod transient;

pub use debug::{DEBUG_NAME_PADDING, SegmentTiming};
pub use layout::{FILL_WIDTH_CORRECTION, RPROMPT_BREATHING_ROOM};

use layout::{LineWidth, connection_width, fill, fit_prompt, rprompt_fits};

const LOG_TARGET: &str = "promptline::engine";
const METRICS_TARGET: &str = "promptline::engine.metrics";

pub struct Engine<'a> {
    config: &'a Config,
    env: &'a dyn Environment,
    ansi: AnsiUtils,
    writer: Box<dyn ColorWriter + 'a>,
    logger: Option<Logger>,
    metrics: RenderMetrics,
    console: String,
    rprompt: String,
}

impl<'a> Engine<'a> {
    pub fn new(
        config: &'a Config,
        env: &'a dyn Environment,
        ansi: AnsiUtils,
        writer: Box<dyn ColorWriter + 'a>,
    ) -> Self {
        Self {
            config,
            env,
            ansi,
            writer,
            logger: None,
            metrics: RenderMetrics::new(),
            console: String::new(),
            rprompt: String::new(),
        }
    }

    /// Engine using the environment's shell for escapes and colors.
    pub fn for_env(config: &'a Config, env: &'a dyn Environment) -> Self {
        let ansi = AnsiUtils::new(env.shell());
        Self::new(config, env, ansi, Box::new(AnsiColorWriter::new(ansi)))
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    fn shell(&self) -> Shell {
        self.ansi.shell()
    }

    fn write(&mut self, text: &str) {
        self.console.push_str(text);
    }

    /// Remove the last `columns` visible characters already written.
    fn backspace(&mut self, columns: usize) {
        self.console = self.ansi.truncate_by(&self.console, columns);
        self.metrics.record_erase(columns);
    }

    fn terminal_width(&self) -> usize {
        match self.env.terminal_width() {
            Ok(width) => width,
            Err(err) => {
                self.log(
                    LogLevel::Debug,
                    "terminal_width_unavailable",
                    [json_kv("reason", err.to_string())],
                );
                0
            }
        }
    }

    fn console_title(&self) -> ConsoleTitle<'a> {
        let config = self.config;
        ConsoleTitle::new(
            self.env,
            self.ansi,
            config.console_title_style,
            &config.console_title_template,
        )
    }

    /// Render the primary prompt.
    pub fn render(mut self) -> String {
        let started = Instant::now();
        let config = self.config;
        let mut line = LineWidth::default();
        // Fill columns written by the previous active block, if it was a connection.
        let mut erasable = 0usize;

        for block in &config.blocks {
            let rendered = self.render_block_text(block);
            let max_width = match block.kind {
                BlockKind::Connection => {
                    Some(connection_width(self.terminal_width(), line.consumed()))
                }
                _ => {
                    if rendered.enabled {
                        line.account(block, self.ansi.len_without_ansi(&rendered.text));
                    }
                    None
                }
            };

            if let Some(filled) = self.write_block(block, &rendered, max_width, erasable) {
                erasable = filled;
            }
        }

        let output = self.assemble();
        self.emit_metrics(started);
        output
    }

    fn render_block_text(&mut self, block: &Block) -> RenderedBlock {
        if block.kind == BlockKind::RightPrompt && self.shell().plain_rprompt() {
            return render_block(block, self.env, &mut PlainWriter::new());
        }
        render_block(block, self.env, self.writer.as_mut())
    }

    /// Write one block.
    ///
    /// Returns `None` for an inactive block, otherwise the number of fill
    /// columns it wrote. A right aligned block erases at most `erasable`
    /// columns of the fill before it.
    fn write_block(
        &mut self,
        block: &Block,
        rendered: &RenderedBlock,
        max_width: Option<i64>,
        erasable: usize,
    ) -> Option<usize> {
        if !rendered.enabled {
            return None;
        }
        self.metrics.record_block(rendered.segments);
        let mut filled = 0;

        if block.newline {
            self.write("\n");
        }

        match block.kind {
            BlockKind::LineBreak => self.write("\n"),
            BlockKind::Prompt => {
                if block.vertical_offset != 0 {
                    let change = self.ansi.change_line(block.vertical_offset);
                    self.write(&change);
                }
                if block.alignment == Alignment::Right {
                    let erase = self.ansi.len_without_ansi(&rendered.text).min(erasable);
                    if erase > 0 {
                        self.backspace(erase);
                    }
                    let forward = self.ansi.carriage_forward();
                    let position = self
                        .ansi
                        .cursor_for_right_write(&rendered.text, block.horizontal_offset);
                    self.write(&forward);
                    self.write(&position);
                }
                if let Some(text) = fit_prompt(&self.ansi, &rendered.text, max_width) {
                    self.write(&text);
                }
            }
            BlockKind::RightPrompt => {
                self.rprompt = self.ansi.format_rprompt(&rendered.text);
            }
            BlockKind::Connection => {
                if let Some(text) = fill(&self.ansi, &rendered.text, max_width.unwrap_or(-1)) {
                    filled = self.ansi.len_without_ansi(&text);
                    self.metrics.record_fill(filled);
                    self.write(&text);
                }
            }
        }

        if self.shell().needs_clear_line()
            && matches!(block.kind, BlockKind::Prompt | BlockKind::Connection)
        {
            let clear = self.ansi.clear_after();
            self.write(&clear);
        }
        Some(filled)
    }

    /// Whether the pending right prompt fits beside what was written so far.
    pub fn can_write_rprompt(&self) -> bool {
        let width = self.terminal_width();
        if width == 0 {
            return true;
        }
        let prompt_width = self.ansi.len_without_ansi(&self.console);
        let rprompt_width = self.ansi.len_without_ansi(&self.rprompt);
        rprompt_fits(width, prompt_width, rprompt_width)
    }

    fn assemble(&mut self) -> String {
        if self.config.console_title {
            let title = self.console_title().title_escape();
            self.write(&title);
        }
        let reset = self.ansi.reset();
        self.write(&reset);
        if self.config.final_space {
            self.write(" ");
        }

        if self.config.osc99 {
            let cwd = self.working_dir();
            let notification = self.ansi.console_pwd(&cwd);
            self.write(&notification);
            return std::mem::take(&mut self.console);
        }

        self.print()
    }

    fn working_dir(&self) -> String {
        let cwd = self.env.current_dir();
        if !self.env.is_wsl() {
            return cwd;
        }
        match self.env.run_command("wslpath", &["-m", &cwd]) {
            Ok(translated) if !translated.trim().is_empty() => translated.trim().to_string(),
            Ok(_) => cwd,
            Err(err) => {
                self.log(
                    LogLevel::Debug,
                    "wslpath_failed",
                    [json_kv("reason", err.to_string())],
                );
                cwd
            }
        }
    }

    fn print(&mut self) -> String {
        let shell = self.shell();
        match shell {
            Shell::Zsh => {
                if !self.env.args().eval {
                    return std::mem::take(&mut self.console);
                }
                if !self.rprompt.is_empty() {
                    self.metrics.record_rprompt(RightPromptOutcome::Assigned);
                }
                format!(
                    "PS1=\"{}\"\nRPROMPT=\"{}\"",
                    shell.quote(&self.console),
                    shell.quote(&self.rprompt)
                )
            }
            _ if shell.places_rprompt() => {
                if self.rprompt.is_empty() {
                    return std::mem::take(&mut self.console);
                }
                if !self.can_write_rprompt() {
                    self.metrics.record_rprompt(RightPromptOutcome::Dropped);
                    self.log(
                        LogLevel::Debug,
                        "rprompt_dropped",
                        [json_kv("width", self.ansi.len_without_ansi(&self.rprompt))],
                    );
                    return std::mem::take(&mut self.console);
                }
                let rprompt = std::mem::take(&mut self.rprompt);
                let save = self.ansi.save_cursor();
                let forward = self.ansi.carriage_forward();
                let position = self.ansi.cursor_for_right_write(&rprompt, 0);
                let restore = self.ansi.restore_cursor();
                self.write(&save);
                self.write(&forward);
                self.write(&position);
                self.write(&rprompt);
                self.write(&restore);
                self.metrics.record_rprompt(RightPromptOutcome::Written);
                std::mem::take(&mut self.console)
            }
            _ => std::mem::take(&mut self.console),
        }
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.logger.as_ref() {
            let event = event_with_fields(level, LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn emit_metrics(&self, started: Instant) {
        let Some(logger) = self.logger.as_ref() else {
            return;
        };
        self.log(
            LogLevel::Info,
            "render_completed",
            [
                json_kv("shell", json!(self.shell().name())),
                json_kv("blocks", json!(self.config.blocks.len())),
            ],
        );
        let snapshot = self.metrics.snapshot(started.elapsed());
        let _ = logger.log_event(snapshot.to_log_event(METRICS_TARGET));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransientPrompt;
    use crate::env::{Platform, StaticEnvironment};
    use crate::logging::MemorySink;
    use crate::segments::SegmentConfig;
    use crate::width::display_width;

    fn left(text: &str) -> Block {
        Block::prompt(Alignment::Left, vec![SegmentConfig::text(text)])
    }

    fn right(text: &str) -> Block {
        Block::prompt(Alignment::Right, vec![SegmentConfig::text(text)])
    }

    fn connection(unit: &str) -> Block {
        Block::new(BlockKind::Connection, vec![SegmentConfig::text(unit)])
    }

    fn rprompt(text: &str) -> Block {
        Block::new(BlockKind::RightPrompt, vec![SegmentConfig::text(text)])
    }

    fn config(blocks: Vec<Block>) -> Config {
        Config {
            blocks,
            ..Config::default()
        }
    }

    fn render(config: &Config, env: &StaticEnvironment) -> String {
        Engine::for_env(config, env).render()
    }

    #[test]
    fn left_blocks_concatenate_without_width() {
        let config = config(vec![left("A"), left("B")]);
        let env = StaticEnvironment::new(Shell::Plain);
        assert_eq!(render(&config, &env), "AB\x1b[0m");
    }

    #[test]
    fn final_space_and_title_follow_reset() {
        let mut config = config(vec![left("A")]);
        config.final_space = true;
        config.console_title = true;
        let env = StaticEnvironment::new(Shell::Plain).with_cwd("/srv/app");
        assert_eq!(render(&config, &env), "A\x1b]0;app\x07\x1b[0m ");
    }

    #[test]
    fn connection_fills_remaining_width() {
        let config = config(vec![left("abc"), connection("-")]);
        let env = StaticEnvironment::new(Shell::Plain).with_width(10);
        let output = render(&config, &env);
        // 10 - 3 + FILL_WIDTH_CORRECTION
        assert_eq!(output, format!("abc{}\x1b[0m", "-".repeat(10)));
    }

    #[test]
    fn connection_without_width_is_suppressed() {
        let config = config(vec![left("abcdef"), connection("-")]);
        let env = StaticEnvironment::new(Shell::Plain);
        assert_eq!(render(&config, &env), "abcdef\x1b[0m");
    }

    #[test]
    fn right_block_after_connection_erases_fill() {
        let config = config(vec![left("ab"), connection("-"), right("xyz")]);
        let env = StaticEnvironment::new(Shell::Plain).with_width(20);
        let output = render(&config, &env);
        let fill = "-".repeat(20 - 2 + 3 - 3);
        let expected = format!("ab{fill}\x1b[1000C\x1b[3Dxyz\x1b[0m");
        assert_eq!(output, expected);
    }

    #[test]
    fn right_block_after_suppressed_fill_keeps_left_prompt() {
        let config = config(vec![left("abcdef"), connection("-"), right("xyz")]);
        let env = StaticEnvironment::new(Shell::Plain);
        assert_eq!(render(&config, &env), "abcdef\x1b[1000C\x1b[3Dxyz\x1b[0m");

        // "abcdefghi" leaves a budget of 1 on a 7 wide terminal: no fill.
        let config = self::config(vec![left("abcdefghi"), connection("-"), right("xyz")]);
        let env = StaticEnvironment::new(Shell::Plain).with_width(7);
        assert!(render(&config, &env).starts_with("abcdefghi\x1b[1000C"));
    }

    #[test]
    fn right_block_erases_no_more_than_the_fill() {
        let config = config(vec![left("abcdefg"), connection("-"), right("wxyz")]);
        let env = StaticEnvironment::new(Shell::Plain).with_width(6);
        // Budget 6 - 7 + 3 = 2 columns of fill, both erased; "abcdefg" survives.
        assert_eq!(
            render(&config, &env),
            "abcdefg\x1b[1000C\x1b[4Dwxyz\x1b[0m"
        );
    }

    #[test]
    fn right_block_without_connection_keeps_buffer() {
        let config = config(vec![left("ab"), right("xyz").with_offsets(0, 1)]);
        let env = StaticEnvironment::new(Shell::Plain).with_width(20);
        assert_eq!(render(&config, &env), "ab\x1b[1000C\x1b[2Dxyz\x1b[0m");
    }

    #[test]
    fn disabled_block_is_not_previous_active() {
        let config = config(vec![
            left("ab"),
            connection("-"),
            left(""),
            right("xyz"),
        ]);
        let env = StaticEnvironment::new(Shell::Plain).with_width(10);
        let output = render(&config, &env);
        assert!(output.starts_with("ab--------\x1b[1000C"));
    }

    #[test]
    fn vertical_offset_and_newline() {
        let config = config(vec![
            left("a"),
            left("b").with_newline(true).with_offsets(-1, 0),
            Block::new(BlockKind::LineBreak, Vec::new()),
            left("c"),
        ]);
        let env = StaticEnvironment::new(Shell::Plain);
        assert_eq!(render(&config, &env), "a\n\x1b[1Fb\nc\x1b[0m");
    }

    #[test]
    fn powershell_clears_line_after_blocks() {
        let config = config(vec![left("a"), rprompt("r")]);
        let env = StaticEnvironment::new(Shell::Pwsh);
        let output = render(&config, &env);
        assert!(output.starts_with("a\x1b[K\x1b[0m"));
        assert_eq!(output.matches("\x1b[K").count(), 1);
    }

    #[test]
    fn rprompt_written_when_it_fits() {
        let config = config(vec![left("ab"), rprompt("rp")]);
        let env = StaticEnvironment::new(Shell::Plain).with_width(80);
        assert_eq!(
            render(&config, &env),
            "ab\x1b[0m\x1b7\x1b[1000C\x1b[2Drp\x1b8"
        );
    }

    #[test]
    fn rprompt_dropped_without_breathing_room() {
        let wide = "r".repeat(40);
        let config = config(vec![left("abcde"), rprompt(&wide)]);
        let env = StaticEnvironment::new(Shell::Plain).with_width(50);
        let engine = Engine::for_env(&config, &env);
        assert_eq!(engine.render(), "abcde\x1b[0m");
    }

    #[test]
    fn rprompt_gate_fails_open() {
        let wide = "r".repeat(400);
        let config = config(vec![left(&"l".repeat(300)), rprompt(&wide)]);
        let env = StaticEnvironment::new(Shell::Plain);
        assert!(render(&config, &env).ends_with("\x1b8"));
    }

    #[test]
    fn bash_rprompt_is_plain_and_wrapped() {
        let colored = SegmentConfig::text("rp").with_colors("#ff0000", "");
        let config = config(vec![
            left("ab"),
            Block::new(BlockKind::RightPrompt, vec![colored]),
        ]);
        let env = StaticEnvironment::new(Shell::Bash).with_width(80);
        assert_eq!(
            render(&config, &env),
            "ab\\[\x1b[0m\\]\\[\x1b7\\]\\[\x1b[1000C\\]\\[\x1b[2D\\]\\[rp\\]\\[\x1b8\\]"
        );
    }

    #[test]
    fn unknown_shell_never_places_rprompt() {
        let config = config(vec![left("ab"), rprompt("rp")]);
        let env = StaticEnvironment::new(Shell::Unknown).with_width(80);
        assert_eq!(render(&config, &env), "ab\x1b[0m");
    }

    #[test]
    fn zsh_without_eval_returns_plain_buffer() {
        let config = config(vec![left("ab"), rprompt("rp")]);
        let env = StaticEnvironment::new(Shell::Zsh).with_width(80);
        let output = render(&config, &env);
        assert_eq!(output, "ab%{\x1b[0m%}");
        assert!(!output.contains("PS1="));
        assert!(!output.contains("RPROMPT="));
    }

    #[test]
    fn zsh_eval_emits_assignments() {
        let config = config(vec![left("say \"hi\""), rprompt("r\"p")]);
        let env = StaticEnvironment::new(Shell::Zsh).with_eval(true);
        assert_eq!(
            render(&config, &env),
            "PS1=\"say \"\"hi\"\"%{\x1b[0m%}\"\nRPROMPT=\"r\"\"p\""
        );
    }

    #[test]
    fn osc99_appends_working_directory() {
        let mut config = config(vec![left("a"), rprompt("rp")]);
        config.osc99 = true;
        let env = StaticEnvironment::new(Shell::Plain).with_cwd("/srv");
        assert_eq!(render(&config, &env), "a\x1b[0m\x1b]9;9;\"/srv\"\x1b\\");
    }

    #[test]
    fn osc99_translates_wsl_paths() {
        let mut config = config(vec![left("a")]);
        config.osc99 = true;
        let env = StaticEnvironment::new(Shell::Plain)
            .with_cwd("/mnt/c/src")
            .with_wsl(true)
            .with_command_output("wslpath -m /mnt/c/src", "C:/src\n");
        assert!(render(&config, &env).ends_with("\x1b]9;9;\"C:/src\"\x1b\\"));

        let untranslated = StaticEnvironment::new(Shell::Plain)
            .with_cwd("/mnt/d")
            .with_wsl(true);
        assert!(render(&config, &untranslated).ends_with("\x1b]9;9;\"/mnt/d\"\x1b\\"));
    }

    #[test]
    fn osc99_skips_wslpath_outside_linux() {
        let mut config = config(vec![left("a")]);
        config.osc99 = true;
        let env = StaticEnvironment::new(Shell::Pwsh)
            .with_cwd("/mnt/c/src")
            .with_wsl(true)
            .with_platform(Platform::Windows)
            .with_command_output("wslpath -m /mnt/c/src", "C:/src");
        assert!(render(&config, &env).ends_with("\x1b]9;9;\"/mnt/c/src\"\x1b\\"));
    }

    #[test]
    fn no_working_directory_escape_without_osc99() {
        let config = config(vec![left("a"), connection("-"), right("b")]);
        for shell in [Shell::Zsh, Shell::Bash, Shell::Pwsh, Shell::Plain] {
            let env = StaticEnvironment::new(shell).with_width(40).with_cwd("/x");
            assert!(!render(&config, &env).contains("\x1b]9;9;"));
        }
    }

    #[test]
    fn fill_after_newline_ignores_previous_lines() {
        let config = config(vec![
            left("abcdefgh"),
            left("x").with_newline(true),
            connection("="),
        ]);
        let env = StaticEnvironment::new(Shell::Plain).with_width(10);
        let output = render(&config, &env);
        let last_line = output.rsplit('\n').next().unwrap();
        assert_eq!(display_width(last_line), 1 + 13);
    }

    #[test]
    fn render_logs_metrics_and_dropped_rprompt() {
        let sink = MemorySink::new();
        let wide = "r".repeat(40);
        let config = config(vec![left("abcde"), rprompt(&wide)]);
        let env = StaticEnvironment::new(Shell::Plain).with_width(50);
        Engine::for_env(&config, &env)
            .with_logger(Logger::new(sink.clone()))
            .render();
        let messages = sink.messages();
        assert!(messages.contains(&"rprompt_dropped".to_string()));
        assert!(messages.contains(&"render_completed".to_string()));
        let metrics = sink
            .events()
            .into_iter()
            .find(|event| event.message == "render_metrics")
            .unwrap();
        assert_eq!(metrics.fields["blocks"], json!(2));
        assert_eq!(metrics.fields["rprompt"], json!("dropped"));
    }

    #[test]
    fn transient_config_does_not_affect_primary() {
        let mut config = config(vec![left("A")]);
        config.transient_prompt = Some(TransientPrompt::default());
        let env = StaticEnvironment::new(Shell::Plain);
        assert_eq!(render(&config, &env), "A\x1b[0m");
    }
}
