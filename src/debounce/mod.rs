use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Delivers the last pushed value once no new value arrived for `delay`.
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    tx: UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> (Self, UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            pending: None,
            tx,
        };
        (debouncer, rx)
    }

    pub fn from_millis(delay_ms: u64) -> (Self, UnboundedReceiver<T>) {
        Self::new(Duration::from_millis(delay_ms))
    }

    /// Restarts the quiet period with `value` as the candidate.
    pub fn push(&mut self, value: T) {
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            // The receiver may already be gone on shutdown.
            let _ = tx.send(value);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    async fn settle() {
        // Lets spawned timers observe the advanced clock.
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivers_after_quiet_period() {
        let (mut debouncer, mut rx) = Debouncer::from_millis(400);

        debouncer.push("ana");
        settle().await;
        advance(Duration::from_millis(399)).await;
        settle().await;
        assert!(rx.try_recv().is_err());
        assert!(debouncer.is_pending());

        advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(rx.try_recv().unwrap(), "ana");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_delivers_only_last_value() {
        let (mut debouncer, mut rx) = Debouncer::from_millis(400);

        for term in ["a", "an", "ana"] {
            debouncer.push(term);
            settle().await;
            advance(Duration::from_millis(200)).await;
            settle().await;
        }
        assert!(rx.try_recv().is_err());

        advance(Duration::from_millis(200)).await;
        settle().await;
        assert_eq!(rx.try_recv().unwrap(), "ana");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_value() {
        let (mut debouncer, mut rx) = Debouncer::from_millis(400);

        debouncer.push("ana");
        drop(debouncer);
        advance(Duration::from_secs(1)).await;
        settle().await;

        // Sender dropped with the aborted timer: channel closes empty.
        assert_eq!(rx.recv().await, None);
    }
}
