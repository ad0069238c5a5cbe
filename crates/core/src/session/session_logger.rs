use std::collections::BTreeMap;
use std::time::Instant;

/// Cross-cutting observer for the authentication and presentation loops.
///
/// Keeps the use cases free of any particular output mechanism.
pub trait SessionLogger: Send {
    /// Called once per processed frame.
    fn frame(&mut self, index: usize);

    /// Time spent in a named stage for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// A state-changing action fired (e.g. "Next Slide").
    fn action(&mut self, name: &str);

    fn info(&mut self, message: &str);

    /// End-of-session report. Default: no-op.
    fn summary(&self) {}
}

/// Running totals for one timed stage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StageTiming {
    pub count: usize,
    pub total_ms: f64,
}

impl StageTiming {
    pub fn avg_ms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_ms / self.count as f64
        }
    }
}

/// Discards all events.
pub struct NullSessionLogger;

impl SessionLogger for NullSessionLogger {
    fn frame(&mut self, _index: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn action(&mut self, _name: &str) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI logger: per-stage timing averages, action counts and throughput.
///
/// Frame progress is logged every `throttle_frames` frames.
pub struct StdoutSessionLogger {
    throttle_frames: usize,
    timings: BTreeMap<String, StageTiming>,
    actions: BTreeMap<String, usize>,
    start_time: Instant,
    frames: usize,
}

impl StdoutSessionLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: BTreeMap::new(),
            actions: BTreeMap::new(),
            start_time: Instant::now(),
            frames: 0,
        }
    }

    /// Formatted summary, or `None` if no frame was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Session summary ({} frames, {:.1}s total):",
            self.frames,
            elapsed_ms / 1000.0
        )];

        for (stage, timing) in &self.timings {
            lines.push(format!(
                "  {stage:12}: avg {:6.2}ms  total {:7.0}ms",
                timing.avg_ms(),
                timing.total_ms
            ));
        }

        for (name, count) in &self.actions {
            lines.push(format!("  {name}: {count}"));
        }

        if elapsed_ms > 0.0 {
            let fps = self.frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn stage_timing(&self, stage: &str) -> Option<StageTiming> {
        self.timings.get(stage).copied()
    }

    pub fn action_count(&self, name: &str) -> usize {
        self.actions.get(name).copied().unwrap_or(0)
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Default for StdoutSessionLogger {
    fn default() -> Self {
        Self::new(300)
    }
}

impl SessionLogger for StdoutSessionLogger {
    fn frame(&mut self, index: usize) {
        self.frames += 1;
        if index > 0 && index % self.throttle_frames == 0 {
            log::info!("Processed {index} frames");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        let timing = self.timings.entry(stage.to_string()).or_default();
        timing.count += 1;
        timing.total_ms += duration_ms;
    }

    fn action(&mut self, name: &str) {
        *self.actions.entry(name.to_string()).or_default() += 1;
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
