//! Trailing debounce for overflow checks.
//!
//! Each `schedule` aborts the previously armed timer and starts a new one, so a
//! burst of edits produces a single check after the last edit has been quiet for
//! `delay`. Fired checks arrive on the receiver returned by [`OverflowDebouncer::new`].

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::models::document::PageId;

pub struct OverflowDebouncer {
    delay: Duration,
    tx: mpsc::UnboundedSender<PageId>,
    pending: Option<JoinHandle<()>>,
}

impl OverflowDebouncer {
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<PageId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Must be called within a Tokio runtime.
    pub fn schedule(&mut self, page: PageId) {
        self.cancel();
        let tx = self.tx.clone();
        let delay = self.delay;
        trace!(page = %page, ?delay, "overflow check scheduled");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session was dropped; nothing to do.
            let _ = tx.send(page);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// True while a timer is armed and has not yet fired.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for OverflowDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_once_with_last_page() {
        let (mut d, mut rx) = OverflowDebouncer::new(Duration::from_millis(300));
        d.schedule(PageId(1));
        tokio::time::sleep(Duration::from_millis(100)).await;
        d.schedule(PageId(2));
        tokio::time::sleep(Duration::from_millis(100)).await;
        d.schedule(PageId(3));

        assert_eq!(rx.recv().await, Some(PageId(3)));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_only_after_quiet_period() {
        let (mut d, mut rx) = OverflowDebouncer::new(Duration::from_millis(300));
        let start = tokio::time::Instant::now();
        d.schedule(PageId(1));
        assert!(d.is_pending());
        assert_eq!(rx.recv().await, Some(PageId(1)));
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let (mut d, mut rx) = OverflowDebouncer::new(Duration::from_millis(300));
        d.schedule(PageId(1));
        d.cancel();
        assert!(!d.is_pending());
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timer() {
        let (mut d, mut rx) = OverflowDebouncer::new(Duration::from_millis(50));
        d.schedule(PageId(4));
        drop(d);
        // Sender dropped together with the aborted task: channel closes empty.
        assert_eq!(rx.recv().await, None);
    }
}
