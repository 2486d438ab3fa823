//! Segment styling for a single block.

use crate::ansi::ColorWriter;
use crate::config::{Block, BlockKind};
use crate::env::Environment;
use crate::segments::{SegmentConfig, SegmentStyle};

/// Styled text of one block plus whether anything in it rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedBlock {
    pub text: String,
    pub enabled: bool,
    pub segments: usize,
}

/// Resolve and style every enabled segment of `block`.
///
/// Segments that fail to resolve are skipped. A deprecated line-break block
/// has no segments and is always enabled.
pub fn render_block(
    block: &Block,
    env: &dyn Environment,
    writer: &mut dyn ColorWriter,
) -> RenderedBlock {
    let mut rendered = render_segments(&block.segments, env, writer);
    if block.kind == BlockKind::LineBreak {
        rendered.enabled = true;
    }
    rendered
}

pub fn render_segments(
    segments: &[SegmentConfig],
    env: &dyn Environment,
    writer: &mut dyn ColorWriter,
) -> RenderedBlock {
    let active: Vec<(&SegmentConfig, String)> = segments
        .iter()
        .filter_map(|config| {
            let mut segment = config.resolve(env).ok()?;
            segment.enabled().then(|| (config, segment.text()))
        })
        .collect();

    for (idx, (config, text)) in active.iter().enumerate() {
        match config.style {
            SegmentStyle::Plain => writer.write(&config.background, &config.foreground, text),
            SegmentStyle::Diamond => {
                writer.write("", &config.background, &config.leading_diamond);
                writer.write(&config.background, &config.foreground, text);
                writer.write("", &config.background, &config.trailing_diamond);
            }
            SegmentStyle::Powerline => {
                writer.write(&config.background, &config.foreground, text);
                let next_background = active
                    .get(idx + 1)
                    .filter(|(next, _)| next.style == SegmentStyle::Powerline)
                    .map(|(next, _)| next.background.as_str())
                    .unwrap_or("");
                writer.write(next_background, &config.background, &config.powerline_symbol);
            }
        }
    }

    RenderedBlock {
        text: writer.take(),
        enabled: !active.is_empty(),
        segments: active.len(),
    }
}
