use std::time::Instant;

/// Observer for subtitle pipeline events.
///
/// Decouples the use case from where status goes (log crate, tests).
pub trait PipelineLogger: Send {
    /// Announce the start of pipeline step `step` of `total`.
    fn stage(&mut self, step: usize, total: usize, message: &str);

    /// Record how long a named step took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-pipeline summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn stage(&mut self, _step: usize, _total: usize, _message: &str) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI logger: forwards events to the `log` crate and keeps per-stage
/// timings for the closing summary.
pub struct ConsolePipelineLogger {
    timings: Vec<(String, f64)>,
    messages: Vec<String>,
    start_time: Instant,
}

impl ConsolePipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: Vec::new(),
            messages: Vec::new(),
            start_time: Instant::now(),
        }
    }

    /// Returns the formatted summary string, or `None` if no timings were recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Pipeline summary ({} stages, {:.1}s total):",
            self.timings.len(),
            elapsed_ms / 1000.0
        )];
        for (stage, ms) in &self.timings {
            let pct = if elapsed_ms > 0.0 {
                ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!("  {stage:12}: {ms:8.0}ms  ({pct:4.1}%)"));
        }
        Some(lines.join("\n"))
    }

    pub fn timing_for(&self, stage: &str) -> Option<f64> {
        self.timings
            .iter()
            .find(|(name, _)| name == stage)
            .map(|(_, ms)| *ms)
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl Default for ConsolePipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for ConsolePipelineLogger {
    fn stage(&mut self, step: usize, total: usize, message: &str) {
        let line = format!("[{step}/{total}] {message}");
        log::info!("{line}");
        self.messages.push(line);
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        match self.timings.iter_mut().find(|(name, _)| name == stage) {
            Some((_, total)) => *total += duration_ms,
            None => self.timings.push((stage.to_string(), duration_ms)),
        }
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
