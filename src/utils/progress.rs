use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Step-level progress bar for the cleaning run.
///
/// Report lines always reach stdout: with a visible bar they are printed while
/// the bar is suspended, with a hidden reporter they go straight to stdout.
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new(total: u64, message: &str, hidden: bool) -> Self {
        if hidden {
            return Self::hidden();
        }

        let pb = ProgressBar::new(total);
        match ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        {
            Ok(style) => pb.set_style(style.progress_chars("#>-")),
            Err(e) => tracing::debug!("Falling back to default progress style: {}", e),
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            progress_bar: Some(pb),
        }
    }

    pub fn hidden() -> Self {
        Self { progress_bar: None }
    }

    pub fn increment(&self, delta: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(delta);
        }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(message.to_string());
        }
    }

    pub fn finish_and_clear(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }

    pub fn println(&self, message: &str) {
        match self.progress_bar {
            Some(ref pb) => pb.suspend(|| println!("{}", message)),
            None => println!("{}", message),
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            if !pb.is_finished() {
                pb.finish_and_clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_reporter_is_inert() {
        let reporter = ProgressReporter::hidden();
        reporter.increment(1);
        reporter.set_message("step");
        reporter.println("Saved nothing (0 rows)");
        reporter.finish_and_clear();
    }

    #[test]
    fn test_visible_reporter_counts_steps() {
        let reporter = ProgressReporter::new(7, "Cleaning", false);
        reporter.increment(3);
        if let Some(ref pb) = reporter.progress_bar {
            assert_eq!(pb.position(), 3);
            assert_eq!(pb.length(), Some(7));
        }
        reporter.finish_and_clear();
    }
}
