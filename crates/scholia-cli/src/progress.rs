use indicatif::{ProgressBar, ProgressStyle};
use scholia_pipeline::StageEvent;
use std::time::Duration;
use tokio::sync::mpsc;

/// Spinner showing the stage currently running. Hidden in verbose mode,
/// where the logs already narrate every stage.
#[derive(Clone)]
pub struct StageProgress {
    bar: ProgressBar,
}

impl StageProgress {
    pub fn new(visible: bool) -> Self {
        if !visible {
            return Self { bar: ProgressBar::hidden() };
        }

        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn handle(&self, event: &StageEvent) {
        match event {
            StageEvent::Started { stage } => self.bar.set_message(stage.to_string()),
            StageEvent::Skipped { stage, reason } => {
                self.bar.println(format!("  {} skipped ({})", stage.description(), reason));
            }
            StageEvent::Completed { .. } => {}
        }
    }

    /// Drain `events` until the run drops its sender
    pub async fn follow(self, mut events: mpsc::UnboundedReceiver<StageEvent>) {
        while let Some(event) = events.recv().await {
            self.handle(&event);
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
