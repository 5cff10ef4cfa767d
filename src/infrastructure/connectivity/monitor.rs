use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// Observes reachable/unreachable transitions of the remote service and
/// notifies subscribers exactly once per transition to reachable, after a
/// settle delay that suppresses flapping links.
///
/// `set_reachable` is the ingestion point for platform connectivity
/// signals. Subscribers receive one unit per settled transition; dropping
/// the receiver unsubscribes.
pub struct ConnectivityMonitor {
    reachable: Arc<AtomicBool>,
    settle_delay: Duration,
    /// Bumped on every transition; a settle timer only fires if no
    /// further transition happened while it slept.
    epoch: Arc<AtomicU64>,
    subscribers: Arc<Mutex<Vec<UnboundedSender<()>>>>,
}

impl ConnectivityMonitor {
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            reachable: Arc::new(AtomicBool::new(false)),
            settle_delay,
            epoch: Arc::new(AtomicU64::new(0)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.reachable.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> UnboundedReceiver<()> {
        let (tx, rx) = mpsc::unbounded_channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }

    pub fn set_reachable(&self, reachable: bool) {
        let was = self.reachable.swap(reachable, Ordering::SeqCst);
        if was == reachable {
            return;
        }
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(reachable, "Connectivity transition");

        if reachable {
            let reachable_flag = Arc::clone(&self.reachable);
            let epochs = Arc::clone(&self.epoch);
            let subscribers = Arc::clone(&self.subscribers);
            let settle_delay = self.settle_delay;
            tokio::spawn(async move {
                tokio::time::sleep(settle_delay).await;
                let settled = epochs.load(Ordering::SeqCst) == epoch
                    && reachable_flag.load(Ordering::SeqCst);
                if settled {
                    if let Ok(mut subscribers) = subscribers.lock() {
                        subscribers.retain(|tx| tx.send(()).is_ok());
                    }
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(settle_ms: u64) -> ConnectivityMonitor {
        ConnectivityMonitor::new(Duration::from_millis(settle_ms))
    }

    #[tokio::test]
    async fn transition_to_reachable_fires_once_after_settle() {
        let monitor = monitor(20);
        let mut rx = monitor.subscribe();

        monitor.set_reachable(true);
        assert!(monitor.is_reachable());
        // Nothing before the settle delay elapses.
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn repeated_reachable_reports_do_not_renotify() {
        let monitor = monitor(10);
        let mut rx = monitor.subscribe();

        monitor.set_reachable(true);
        monitor.set_reachable(true);
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn flapping_within_settle_window_is_suppressed() {
        let monitor = monitor(50);
        let mut rx = monitor.subscribe();

        monitor.set_reachable(true);
        tokio::time::sleep(Duration::from_millis(10)).await;
        monitor.set_reachable(false);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());

        // A stable transition afterwards still notifies.
        monitor.set_reachable(true);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn each_subscriber_fires_independently_and_drop_unsubscribes() {
        let monitor = monitor(10);
        let mut first = monitor.subscribe();
        let second = monitor.subscribe();

        drop(second);

        monitor.set_reachable(true);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(first.try_recv().is_ok());

        // The closed sender was pruned during dispatch.
        assert_eq!(monitor.subscribers.lock().unwrap().len(), 1);
    }
}
