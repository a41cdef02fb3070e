//! Timer Ownership
//!
//! A spawned timer task is aborted when its guard is cancelled or dropped.

use tokio::task::JoinHandle;

/// Owns at most one running timer task.
#[derive(Debug, Default)]
pub struct TimerGuard {
    handle: Option<JoinHandle<()>>,
}

impl TimerGuard {
    /// Guard an already spawned task.
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// Abort the task. Returns whether one was still running.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let running = !handle.is_finished();
                handle.abort();
                running
            }
            None => false,
        }
    }

    /// Is the guarded task still running?
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_task() {
        let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(1);
        let mut guard = TimerGuard::new(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            let _ = tx.send(()).await;
        }));

        assert!(guard.is_active());
        assert!(guard.cancel());
        assert!(!guard.is_active());
        assert!(!guard.cancel());

        // Sender dropped with the aborted task.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts() {
        let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(1);
        {
            let _guard = TimerGuard::new(tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(5)).await;
                let _ = tx.send(()).await;
            }));
        }

        assert!(rx.recv().await.is_none());
    }
}
