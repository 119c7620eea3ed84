use log::{debug, log_enabled, Level};
use std::time::{Duration, Instant};

fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    let secs = duration.as_secs();
    if millis < 1_000 {
        format!("{millis} ms")
    } else if secs < 60 {
        format!("{secs}.{:03} s", duration.subsec_millis())
    } else {
        format!("{}:{:02}.{:03} min", secs / 60, secs % 60, duration.subsec_millis())
    }
}

fn format_steps(label: &str, steps: &[(String, Duration)]) -> String {
    let total: Duration = steps.iter().map(|(_, took)| *took).sum();
    let parts: Vec<String> = steps.iter()
        .map(|(step, took)| format!("{step} {}", format_duration(*took)))
        .collect();
    format!("{label} {}, total {}", parts.join(", "), format_duration(total))
}

/// Collects the durations of consecutive steps and logs them as one debug line
/// when stopped or dropped.
pub struct StepMeasure {
    label: String,
    current: Option<(String, Instant)>,
    steps: Vec<(String, Duration)>,
}

impl StepMeasure {
    /// `label` prefixes the summary line, e.g. `[provider]`.
    pub fn new(label: &str, step: &str) -> Self {
        let enabled = log_enabled!(Level::Debug);
        Self {
            label: label.to_string(),
            current: enabled.then(|| (step.to_string(), Instant::now())),
            steps: vec![],
        }
    }

    fn finish_current(&mut self) {
        if let Some((step, start)) = self.current.take() {
            self.steps.push((step, start.elapsed()));
        }
    }

    /// Ends the running step and starts the next one.
    pub fn tick(&mut self, step: &str) {
        if self.current.is_some() {
            self.finish_current();
            self.current = Some((step.to_string(), Instant::now()));
        }
    }

    pub fn stop(&mut self) {
        self.finish_current();
        if !self.steps.is_empty() {
            debug!("{}", format_steps(&self.label, &self.steps));
            self.steps.clear();
        }
    }
}

impl Drop for StepMeasure {
    fn drop(&mut self) {
        self.stop();
    }
}
