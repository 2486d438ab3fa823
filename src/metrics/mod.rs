use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// What happened to the deferred right prompt during final assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RightPromptOutcome {
    #[default]
    Absent,
    Written,
    Dropped,
    /// Handed to the shell through a prompt variable.
    Assigned,
}

impl RightPromptOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            RightPromptOutcome::Absent => "absent",
            RightPromptOutcome::Written => "written",
            RightPromptOutcome::Dropped => "dropped",
            RightPromptOutcome::Assigned => "assigned",
        }
    }
}

/// Counters accumulated over one render.
#[derive(Debug, Default, Clone)]
pub struct RenderMetrics {
    blocks: u64,
    segments: u64,
    fill_columns: u64,
    erased_columns: u64,
    rprompt: RightPromptOutcome,
}

impl RenderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_block(&mut self, segments: usize) {
        self.blocks = self.blocks.saturating_add(1);
        self.segments = self.segments.saturating_add(segments as u64);
    }

    pub fn record_fill(&mut self, columns: usize) {
        self.fill_columns = self.fill_columns.saturating_add(columns as u64);
    }

    pub fn record_erase(&mut self, columns: usize) {
        self.erased_columns = self.erased_columns.saturating_add(columns as u64);
    }

    pub fn record_rprompt(&mut self, outcome: RightPromptOutcome) {
        self.rprompt = outcome;
    }

    pub fn snapshot(&self, elapsed: Duration) -> MetricSnapshot {
        MetricSnapshot {
            elapsed_us: elapsed.as_micros() as u64,
            blocks: self.blocks,
            segments: self.segments,
            fill_columns: self.fill_columns,
            erased_columns: self.erased_columns,
            rprompt: self.rprompt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub elapsed_us: u64,
    pub blocks: u64,
    pub segments: u64,
    pub fill_columns: u64,
    pub erased_columns: u64,
    pub rprompt: RightPromptOutcome,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "render_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("elapsed_us".to_string(), json!(self.elapsed_us));
        map.insert("blocks".to_string(), json!(self.blocks));
        map.insert("segments".to_string(), json!(self.segments));
        map.insert("fill_columns".to_string(), json!(self.fill_columns));
        map.insert("erased_columns".to_string(), json!(self.erased_columns));
        map.insert("rprompt".to_string(), json!(self.rprompt.as_str()));
        map
    }
}
