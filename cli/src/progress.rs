use crate::ui;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Spinner shown while a request to the prediction service is outstanding
pub struct Spinner {
    bar: ProgressBar,
    start_time: Instant,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg} ({elapsed})") {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self {
            bar,
            start_time: Instant::now(),
        }
    }

    /// Stop the spinner and report success with the elapsed time
    pub fn finish_success(self, message: &str) {
        self.bar.finish_and_clear();
        ui::success_message(&format!(
            "{message} ({})",
            format_duration(self.start_time.elapsed())
        ));
    }

    /// Stop the spinner without a success line; the caller reports the failure
    pub fn finish_error(self) {
        self.bar.abandon();
    }
}

/// Format a duration in a human-readable way
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{millis} ms")
    } else if millis < 60_000 {
        format!("{:.1} seconds", duration.as_secs_f64())
    } else {
        let seconds = duration.as_secs();
        format!(
            "{} minutes {seconds_remainder} seconds",
            seconds / 60,
            seconds_remainder = seconds % 60
        )
    }
}
