use criterion::{Criterion, black_box, criterion_group, criterion_main};
use promptline::logging::{LogEvent, LogSink};
use promptline::{
    Alignment, Block, BlockKind, Config, Engine, Logger, LoggingResult, SegmentConfig,
    SegmentStyle, Shell, StaticEnvironment,
};

#[derive(Clone, Default)]
struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) -> LoggingResult<()> {
        Ok(())
    }
}

fn render_two_line_prompt(c: &mut Criterion) {
    let config = build_config();
    let logger = Logger::new(NullSink);
    for shell in [Shell::Zsh, Shell::Bash, Shell::Pwsh] {
        let env = StaticEnvironment::new(shell)
            .with_width(120)
            .with_cwd("/home/user/src/promptline/crates/engine");
        c.bench_function(&format!("render_two_line_prompt_{shell}"), |b| {
            b.iter(|| {
                Engine::for_env(black_box(&config), &env)
                    .with_logger(logger.clone())
                    .render()
            });
        });
    }
}

fn render_debug_report(c: &mut Criterion) {
    let config = build_config();
    let env = StaticEnvironment::new(Shell::Plain).with_width(120);
    c.bench_function("render_debug_report", |b| {
        b.iter(|| Engine::for_env(black_box(&config), &env).debug());
    });
}

fn build_config() -> Config {
    let powerline = |text: &str, background: &str| {
        SegmentConfig::text(text)
            .with_style(SegmentStyle::Powerline)
            .with_colors("#ffffff", background)
            .with_powerline_symbol("\u{e0b0}")
    };

    Config {
        final_space: true,
        console_title: true,
        blocks: vec![
            Block::prompt(
                Alignment::Left,
                vec![
                    SegmentConfig::new("session")
                        .with_style(SegmentStyle::Diamond)
                        .with_colors("#100e23", "#ffe9aa")
                        .with_diamonds("\u{e0b6}", ""),
                    powerline("{{ .Path }}", "#91ddff"),
                    powerline("main ≡", "#95ffa4"),
                ],
            ),
            Block::new(
                BlockKind::Connection,
                vec![SegmentConfig::text("─").with_colors("#555555", "")],
            ),
            Block::prompt(
                Alignment::Right,
                vec![SegmentConfig::new("shell").with_colors("#ff479c", "")],
            ),
            Block::prompt(Alignment::Left, vec![SegmentConfig::text("❯ ")]).with_newline(true),
            Block::new(
                BlockKind::RightPrompt,
                vec![SegmentConfig::text("{{ .User }}@{{ .Host }}")],
            ),
        ],
        ..Config::default()
    }
}

criterion_group!(benches, render_two_line_prompt, render_debug_report);
criterion_main!(benches);
