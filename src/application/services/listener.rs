use crate::application::ports::RealtimeChannel;
use crate::application::services::DashboardAggregator;
use crate::domain::value_objects::Collection;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Connecting,
    Subscribed,
    Disconnected,
}

/// Keeps one live subscription per collection and forwards change events
/// into the dashboard projection. A periodic full refetch backstops the
/// push channel in case it silently drops events.
pub struct RealtimeListener {
    channel: Arc<dyn RealtimeChannel>,
    dashboard: Arc<DashboardAggregator>,
    reconnect_delay: Duration,
    refetch_interval: Duration,
    states: HashMap<Collection, watch::Sender<SubscriptionState>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    started: AtomicBool,
}

impl RealtimeListener {
    pub fn new(
        channel: Arc<dyn RealtimeChannel>,
        dashboard: Arc<DashboardAggregator>,
        reconnect_delay: Duration,
        refetch_interval: Duration,
    ) -> Self {
        let states = Collection::ALL
            .into_iter()
            .map(|collection| {
                let (tx, _) = watch::channel(SubscriptionState::Disconnected);
                (collection, tx)
            })
            .collect();
        Self {
            channel,
            dashboard,
            reconnect_delay,
            refetch_interval,
            states,
            tasks: Mutex::new(Vec::new()),
            started: AtomicBool::new(false),
        }
    }

    pub fn state(&self, collection: Collection) -> watch::Receiver<SubscriptionState> {
        self.states[&collection].subscribe()
    }

    pub async fn start(&self) {
        if self
            .started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Realtime listener already started");
            return;
        }

        let mut tasks = self.tasks.lock().await;
        for collection in Collection::ALL {
            let channel = Arc::clone(&self.channel);
            let dashboard = Arc::clone(&self.dashboard);
            let state_tx = self.states[&collection].clone();
            let reconnect_delay = self.reconnect_delay;
            tasks.push(tokio::spawn(async move {
                run_subscription(channel, dashboard, collection, state_tx, reconnect_delay).await;
            }));
        }

        let dashboard = Arc::clone(&self.dashboard);
        let refetch_interval = self.refetch_interval;
        tasks.push(tokio::spawn(async move {
            loop {
                tokio::time::sleep(refetch_interval).await;
                if let Err(err) = dashboard.refresh().await {
                    warn!(error = %err, "Fallback refetch failed");
                }
            }
        }));
    }

    /// Releases every subscription and background task. Idempotent.
    pub async fn shutdown(&self) {
        let mut tasks = self.tasks.lock().await;
        for task in tasks.drain(..) {
            task.abort();
        }
        for state_tx in self.states.values() {
            state_tx.send_replace(SubscriptionState::Disconnected);
        }
        self.started.store(false, Ordering::SeqCst);
    }
}

async fn run_subscription(
    channel: Arc<dyn RealtimeChannel>,
    dashboard: Arc<DashboardAggregator>,
    collection: Collection,
    state_tx: watch::Sender<SubscriptionState>,
    reconnect_delay: Duration,
) {
    loop {
        state_tx.send_replace(SubscriptionState::Connecting);
        match channel.subscribe(collection, None).await {
            Ok(mut stream) => {
                state_tx.send_replace(SubscriptionState::Subscribed);
                debug!(%collection, "Realtime subscription established");
                while let Some(event) = stream.next().await {
                    dashboard.apply_event(event).await;
                }
                warn!(%collection, "Realtime stream ended");
            }
            Err(err) => {
                warn!(%collection, error = %err, "Realtime subscribe failed");
            }
        }
        state_tx.send_replace(SubscriptionState::Disconnected);
        tokio::time::sleep(reconnect_delay).await;
    }
}
