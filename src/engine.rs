use crate::application::ports::{Geolocator, QueueStore, RealtimeChannel, RemoteGateway, SessionProvider};
use crate::application::services::{
    CaptureService, DashboardAggregator, RealtimeListener, SyncReconciler,
};
use crate::domain::value_objects::QueueKind;
use crate::infrastructure::connectivity::ConnectivityMonitor;
use crate::shared::config::AppConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// One-per-process wiring of the synchronization core. Owns every service
/// and the background task handles; consumers hold it by reference and
/// read through `dashboard` / `reconciler`, never writing to the queue or
/// projection except through `capture`.
pub struct SyncEngine {
    config: AppConfig,
    pub connectivity: Arc<ConnectivityMonitor>,
    pub dashboard: Arc<DashboardAggregator>,
    pub capture: Arc<CaptureService>,
    pub reconciler: Arc<SyncReconciler>,
    pub listener: Arc<RealtimeListener>,
    background: tokio::sync::Mutex<Vec<JoinHandle<()>>>,
}

impl SyncEngine {
    pub async fn new(
        config: AppConfig,
        queues: Arc<dyn QueueStore>,
        remote: Arc<dyn RemoteGateway>,
        session: Arc<dyn SessionProvider>,
        channel: Arc<dyn RealtimeChannel>,
        geolocator: Arc<dyn Geolocator>,
    ) -> anyhow::Result<Self> {
        let connectivity = Arc::new(ConnectivityMonitor::new(Duration::from_millis(
            config.sync.settle_delay_ms,
        )));
        let dashboard = Arc::new(DashboardAggregator::new(remote.clone()));

        // Queued records survive restarts; surface them immediately.
        for kind in QueueKind::ALL {
            let records = queues.load(kind).await?;
            if !records.is_empty() {
                dashboard.restore_pending(records).await;
            }
        }

        let capture = Arc::new(CaptureService::new(
            queues.clone(),
            dashboard.clone(),
            geolocator,
            Duration::from_secs(config.sync.location_timeout_secs),
        ));
        let reconciler = Arc::new(SyncReconciler::new(
            queues,
            remote,
            session,
            dashboard.clone(),
            config.sync.max_retries,
        ));
        let listener = Arc::new(RealtimeListener::new(
            channel,
            dashboard.clone(),
            Duration::from_secs(config.sync.reconnect_delay_secs),
            Duration::from_secs(config.sync.refetch_interval_secs),
        ));

        Ok(Self {
            config,
            connectivity,
            dashboard,
            capture,
            reconciler,
            listener,
            background: tokio::sync::Mutex::new(Vec::new()),
        })
    }

    /// Start the realtime subscriptions, the reconnection-driven sync
    /// trigger, and (when configured) the periodic sync timer.
    pub async fn start_background_tasks(&self) {
        self.listener.start().await;

        let mut background = self.background.lock().await;
        background.push(
            self.reconciler
                .clone()
                .drive_on_signal(self.connectivity.subscribe()),
        );
        if self.config.sync.auto_sync {
            background.push(
                self.reconciler
                    .clone()
                    .schedule(Duration::from_secs(self.config.sync.sync_interval_secs)),
            );
        }
    }

    pub async fn shutdown(&self) {
        self.listener.shutdown().await;
        let mut background = self.background.lock().await;
        for task in background.drain(..) {
            task.abort();
        }
    }

    pub fn is_syncing(&self) -> bool {
        self.reconciler.is_syncing()
    }
}
