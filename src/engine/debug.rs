//! Segment timing report.

use std::time::{Duration, Instant};

use crate::ansi::ColorWriter;

use super::Engine;

/// Added to the longest entry name so the duration column lines up.
pub const DEBUG_NAME_PADDING: usize = 7;

const CONSOLE_TITLE_ENTRY: &str = "ConsoleTitle";
const REPORT_HEADER: &str = "\n\x1b[1mHere are the timings of segments in your prompt:\x1b[0m\n\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentTiming {
    pub name: String,
    pub name_length: usize,
    pub enabled: bool,
    pub text: String,
    pub enabled_duration: Duration,
    pub text_duration: Duration,
}

impl SegmentTiming {
    /// Enablement time, plus render time when the segment rendered.
    pub fn duration(&self) -> Duration {
        if self.enabled {
            self.enabled_duration + self.text_duration
        } else {
            self.enabled_duration
        }
    }
}

impl Engine<'_> {
    /// Time the console title and every segment of every block, in order.
    pub fn segment_timings(&mut self) -> Vec<SegmentTiming> {
        let config = self.config;
        let mut timings = Vec::new();

        let start = Instant::now();
        let title = self.console_title().template_text();
        timings.push(SegmentTiming {
            name: CONSOLE_TITLE_ENTRY.to_string(),
            name_length: CONSOLE_TITLE_ENTRY.len(),
            enabled: config.console_title,
            text: title,
            enabled_duration: Duration::ZERO,
            text_duration: start.elapsed(),
        });

        for block in &config.blocks {
            for segment_config in &block.segments {
                let mut timing = SegmentTiming {
                    name: segment_config.kind.clone(),
                    name_length: segment_config.kind.len(),
                    enabled: false,
                    text: String::new(),
                    enabled_duration: Duration::ZERO,
                    text_duration: Duration::ZERO,
                };

                let Ok(mut segment) = segment_config.resolve(self.env) else {
                    timings.push(timing);
                    continue;
                };
                timing.name = segment.name().to_string();
                timing.name_length = timing.name.len();

                let start = Instant::now();
                timing.enabled = segment.enabled();
                timing.enabled_duration = start.elapsed();

                if timing.enabled {
                    let start = Instant::now();
                    let text = segment.text();
                    timing.text_duration = start.elapsed();
                    self.writer.write(
                        &segment_config.background,
                        &segment_config.foreground,
                        &text,
                    );
                    timing.text = self.writer.take();
                }
                timings.push(timing);
            }
        }

        timings
    }

    /// Render the timing report.
    pub fn debug(mut self) -> String {
        self.write(REPORT_HEADER);
        let timings = self.segment_timings();
        let name_width = timings
            .iter()
            .map(|timing| timing.name_length)
            .max()
            .unwrap_or(0)
            + DEBUG_NAME_PADDING;

        for timing in &timings {
            let name = format!("{}({})", timing.name, timing.enabled);
            let line = format!(
                "{:<width$} - {:>3} ms - {}\n",
                name,
                timing.duration().as_millis(),
                timing.text,
                width = name_width
            );
            self.write(&line);
        }
        std::mem::take(&mut self.console)
    }
}
