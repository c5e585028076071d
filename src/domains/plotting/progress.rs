//! Per-request progress reporting.

use crate::core::session::{ProgressUpdate, ToolSession};

/// Tracks the milestones of one request.
///
/// Steps never go backwards: a report with a smaller step than the current
/// one is sent at the current step. [`close`](Self::close) consumes the
/// reporter, so a request can close it only once.
pub struct ProgressReporter<'a> {
    session: &'a dyn ToolSession,
    step: u32,
    total: Option<u32>,
}

impl<'a> ProgressReporter<'a> {
    /// Open a reporter and send the initial update at step 0.
    pub async fn start(session: &'a dyn ToolSession, total: Option<u32>, message: &str) -> Self {
        let reporter = Self {
            session,
            step: 0,
            total,
        };
        reporter.send(message).await;
        reporter
    }

    /// Change the expected number of steps without sending anything.
    pub fn set_total(&mut self, total: u32) {
        self.total = Some(total);
    }

    /// Re-base the total and announce a new phase at the current step.
    pub async fn restart(&mut self, total: u32, message: &str) {
        self.set_total(total);
        self.send(message).await;
    }

    pub async fn report(&mut self, step: u32, message: &str) {
        self.step = self.step.max(step);
        self.send(message).await;
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Send the final update and release the reporter.
    pub async fn close(self, message: &str) {
        self.send(message).await;
    }

    async fn send(&self, message: &str) {
        self.session
            .progress(ProgressUpdate {
                step: self.step,
                total: self.total,
                message: Some(message.to_string()),
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::recording::RecordingSession;

    #[tokio::test]
    async fn test_steps_never_decrease() {
        let session = RecordingSession::new();
        let mut reporter = ProgressReporter::start(&session, Some(3), "start").await;
        reporter.report(2, "two").await;
        reporter.report(1, "late").await;
        reporter.close("done").await;

        let steps: Vec<u32> = session.updates().iter().map(|u| u.step).collect();
        assert_eq!(steps, vec![0, 2, 2, 2]);
    }

    #[tokio::test]
    async fn test_restart_keeps_step() {
        let session = RecordingSession::new();
        let mut reporter = ProgressReporter::start(&session, None, "Initializing plot...").await;
        reporter.set_total(2);
        reporter.report(1, "Calling Desmos API...").await;
        reporter.restart(3, "Starting local rendering...").await;
        assert_eq!(reporter.step(), 1);
        reporter.close("done").await;

        let updates = session.updates();
        assert_eq!(updates[0].total, None);
        assert_eq!(updates[1].total, Some(2));
        assert_eq!(updates[2].step, 1);
        assert_eq!(updates[2].total, Some(3));
        assert_eq!(
            updates[2].message.as_deref(),
            Some("Starting local rendering...")
        );
    }
}
